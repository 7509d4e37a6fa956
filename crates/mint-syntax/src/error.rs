//! Error handling types and diagnostic rendering for the Mint toolchain.
//!
//! Every pass (lexer, parser, semantic analyzer, interpreter) reports failures
//! through the single [`Error`] type defined here. Errors are fail-fast: the
//! first one aborts the pipeline, and the command-line front end renders it
//! with [`Error::render`].
//!
//! # Diagnostic format
//!
//! ```text
//! demo.mt:3:9: Error: Unexpected token found ')'.
//!     print();
//!           ^
//! Expected: expression
//! ```
//!
//! # Examples
//!
//! ```rust
//! use mint_syntax::error::{Error, ErrorKind, Result, error_at};
//!
//! fn check_positive(n: i64, line: usize, col: usize) -> Result<i64> {
//!     if n < 0 {
//!         error_at(ErrorKind::Semantic, line, col, "Value must be positive")
//!     } else {
//!         Ok(n)
//!     }
//! }
//!
//! let err = check_positive(-1, 2, 5).unwrap_err();
//! assert_eq!(err.kind, ErrorKind::Semantic);
//! assert_eq!(err.line, Some(2));
//! ```

use std::fmt;

use thiserror::Error;

use crate::token::{Span, Token};

/// The pass that rejected the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A character outside the token alphabet
    Lex,
    /// A token sequence that matches no grammar production
    Syntax,
    /// A type or scope violation, statically or at run time
    Semantic,
    /// The program output sink could not be written
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Lex => "LexError",
            ErrorKind::Syntax => "SyntaxError",
            ErrorKind::Semantic => "SemanticError",
            ErrorKind::Io => "IoError",
        };
        f.write_str(name)
    }
}

/// An error that occurred while processing a Mint program.
///
/// # Fields
///
/// - `kind`: which pass failed
/// - `msg`: human-readable description, without trailing period
/// - `line` / `col`: optional 1-based source position
/// - `expected`: optional hint naming what the grammar wanted instead
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {msg}")]
pub struct Error {
    pub kind: ErrorKind,
    pub msg: String,
    pub line: Option<usize>,
    pub col: Option<usize>,
    pub expected: Option<String>,
}

impl Error {
    /// Creates an error without source location.
    pub fn new(kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self {
            kind,
            msg: msg.into(),
            line: None,
            col: None,
            expected: None,
        }
    }

    /// Creates an error pointing at a 1-based line and column.
    pub fn with_span(kind: ErrorKind, msg: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            kind,
            msg: msg.into(),
            line: Some(line),
            col: Some(col),
            expected: None,
        }
    }

    /// Creates a semantic error located at an AST span.
    pub fn semantic(span: Span, msg: impl Into<String>) -> Self {
        Self::with_span(ErrorKind::Semantic, msg, span.line, span.col)
    }

    /// Creates the syntax error reported for an offending token.
    pub fn unexpected(token: &Token) -> Self {
        Self::with_span(
            ErrorKind::Syntax,
            format!("Unexpected token found '{}'", token.text),
            token.span.line,
            token.span.col,
        )
    }

    /// Attaches an "Expected: …" hint.
    pub fn expecting(mut self, hint: impl Into<String>) -> Self {
        let hint = hint.into();
        if !hint.is_empty() {
            self.expected = Some(hint);
        }
        self
    }

    /// Renders the full diagnostic: location header, offending source line,
    /// caret under the column and the optional expected hint.
    pub fn render(&self, file: &str, source: &str) -> String {
        let mut out = match (self.line, self.col) {
            (Some(line), Some(col)) => {
                let mut s = format!("{}:{}:{}: Error: {}.", file, line, col, self.msg);
                let src_line = source.split('\n').nth(line.saturating_sub(1)).unwrap_or("");
                s.push_str(&format!("\n    {}", src_line.trim_end_matches('\r')));
                s.push_str(&format!("\n    {}^", " ".repeat(col.saturating_sub(1))));
                s
            }
            _ => format!("{}: Error: {}.", file, self.msg),
        };
        if let Some(hint) = &self.expected {
            out.push_str(&format!("\nExpected: {}", hint));
        }
        out
    }
}

/// A specialized `Result` type for Mint operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Convenience function to create an error result without location.
pub fn error<T>(kind: ErrorKind, msg: impl Into<String>) -> Result<T> {
    Err(Error::new(kind, msg))
}

/// Convenience function to create an error result with source location.
///
/// ```rust
/// use mint_syntax::error::{ErrorKind, Result, error_at};
///
/// fn reject(line: usize, col: usize) -> Result<()> {
///     error_at(ErrorKind::Lex, line, col, "Unexpected character found: '$'")
/// }
/// assert!(reject(1, 4).is_err());
/// ```
pub fn error_at<T>(kind: ErrorKind, line: usize, col: usize, msg: impl Into<String>) -> Result<T> {
    Err(Error::with_span(kind, msg, line, col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_header_source_line_and_caret() {
        let err = Error::with_span(ErrorKind::Semantic, "Undefined variable: `y`", 2, 7);
        let rendered = err.render("demo.mt", "int x = 1;\nx = x + y;\n");
        assert_eq!(
            rendered,
            "demo.mt:2:7: Error: Undefined variable: `y`.\n    x = x + y;\n          ^"
        );
    }

    #[test]
    fn renders_expected_hint_after_caret() {
        let err = Error::with_span(ErrorKind::Syntax, "Unexpected token found ')'", 1, 7).expecting("expression");
        let rendered = err.render("a.mt", "print();");
        assert!(rendered.ends_with("      ^\nExpected: expression"));
    }

    #[test]
    fn empty_hint_is_dropped() {
        let err = Error::new(ErrorKind::Syntax, "Unexpected end of input").expecting("");
        assert_eq!(err.expected, None);
        assert_eq!(err.render("a.mt", ""), "a.mt: Error: Unexpected end of input.");
    }

    #[test]
    fn display_names_the_kind() {
        let err = Error::new(ErrorKind::Lex, "Unexpected character found: '$'");
        assert_eq!(err.to_string(), "LexError: Unexpected character found: '$'");
    }
}
