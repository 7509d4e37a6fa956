//! Control flow for the interpreter.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    /// Fall through to the next statement
    Normal,
    /// Leave the innermost loop
    Break,
    /// Skip to the next loop iteration
    Continue,
}
