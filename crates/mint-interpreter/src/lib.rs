//! Mint interpreter: executes a checked AST by walking it directly.
//!
//! Every nested block runs on a copy of the enclosing variable tables. When
//! the block ends, only variables that already held a value before it ran
//! receive the block's final values; anything declared inside is dropped.

pub mod env;
mod flow;
pub mod interpreter;
pub mod value;

pub use env::{Scope, ValueTable};
pub use interpreter::{run, Interpreter};
pub use value::{format_double, Value};
