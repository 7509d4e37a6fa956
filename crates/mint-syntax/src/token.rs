//! Token definitions and keyword/operator tables for the Mint language.
//!
//! Tokens are the smallest meaningful units of Mint source code. Every token
//! keeps the exact source text it was read from together with its position,
//! so later passes can point diagnostics at the offending lexeme.
//!
//! # Token Categories
//!
//! - **Keywords**: reserved words, refined by [`KeywordKind`] (`int`, `if`, `for`, `print`)
//! - **Identifiers**: variable names (`count`, `total2`)
//! - **Literals**: refined by [`LiteralKind`] (`42`, `-3.5`, `"hi"`, `true`)
//! - **Operators**: arithmetic (`+`, `=`, `++`), comparison/ternary (`<`, `?`, `:`)
//!   and logical (`&&`, `||`)
//! - **Separators**: `;`, `,`, `(`, `)`, `{`, `}`
//! - **Dots**: runs of `.`, which no grammar rule accepts
//!
//! # Examples
//!
//! ```rust
//! use mint_syntax::{keyword_kind, KeywordKind, Span, Token, TokenKind};
//!
//! let token = Token {
//!     kind: TokenKind::Keyword(KeywordKind::DataType),
//!     text: "int".to_string(),
//!     span: Span { start: 0, end: 3, line: 1, col: 1 },
//!     file: "main.mt".to_string(),
//! };
//! assert!(token.is_keyword("int"));
//! assert_eq!(keyword_kind("while"), Some(KeywordKind::Loop));
//! ```

use serde::Serialize;

/// Keywords naming the four data types.
pub const DATA_TYPE_KEYWORDS: [&str; 4] = ["int", "double", "str", "bool"];

/// Keywords that open or continue conditional statements.
pub const CONDITIONAL_KEYWORDS: [&str; 6] = ["if", "elif", "else", "switch", "case", "default"];

/// Keywords that open loops.
pub const LOOP_KEYWORDS: [&str; 3] = ["for", "while", "do"];

/// Remaining reserved words.
pub const OTHER_KEYWORDS: [&str; 5] = ["break", "continue", "return", "pass", "print"];

/// Literal words that lex as boolean values rather than identifiers.
pub const BOOLEAN_LITERALS: [&str; 2] = ["true", "false"];

/// Characters that may appear in an operator run.
pub const OPERATOR_CHARS: [char; 11] = ['+', '-', '*', '/', '=', '?', ':', '<', '>', '&', '|'];

/// Operator runs classified as comparison or ternary operators.
pub const COMPARISON_OPERATORS: [&str; 7] = ["==", "?", ":", "<", ">", "<=", ">="];

/// Operator runs classified as logical operators.
pub const LOGICAL_OPERATORS: [&str; 2] = ["&&", "||"];

/// Single-character separators.
pub const SEPARATORS: [char; 6] = [';', ',', '(', ')', '{', '}'];

/// Refines [`TokenKind::Keyword`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordKind {
    /// `int`, `double`, `str`, `bool`
    DataType,
    /// `if`, `elif`, `else`, `switch`, `case`, `default`
    Conditional,
    /// `for`, `while`, `do`
    Loop,
    /// `break`, `continue`, `return`, `pass`, `print`
    Other,
}

/// Refines [`TokenKind::Literal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LiteralKind {
    Integer,
    Double,
    String,
    Boolean,
}

/// The syntactic category of a token.
///
/// Unlike a fully decoded token model, the operator and separator variants do
/// not carry the operator itself: the grammar reads it from [`Token::text`].
/// This keeps unknown operator runs (such as `+=`) representable, so they are
/// rejected by the parser with a precise "Unexpected token" diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Keyword(KeywordKind),
    Identifier,
    Literal(LiteralKind),
    /// `+ - * / = ++ --` and any operator run not classified otherwise
    ArithmeticOperator,
    /// `== < > <= >= ? :`
    ComparisonOperator,
    /// `&& ||`
    LogicalOperator,
    Separator,
    Dot,
}

/// Source position of a token or AST node.
///
/// `start`/`end` are character offsets into the source; `line` and `col`
/// are 1-based and refer to the first character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub col: usize,
}

/// A classified lexeme with its source location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    /// Category (and keyword/literal subkind) of the lexeme
    pub kind: TokenKind,
    /// Exact source text; string literals exclude their quotes
    pub text: String,
    /// Position of the lexeme in its source file
    pub span: Span,
    /// Path of the source file the token was read from
    pub file: String,
}

impl Token {
    /// Returns true if this token is the keyword `word`.
    pub fn is_keyword(&self, word: &str) -> bool {
        matches!(self.kind, TokenKind::Keyword(_)) && self.text == word
    }

    /// Returns true if this token is the separator `sep`.
    pub fn is_separator(&self, sep: &str) -> bool {
        self.kind == TokenKind::Separator && self.text == sep
    }

    /// Returns true if this token is an operator (of any class) spelled `op`.
    pub fn is_operator(&self, op: &str) -> bool {
        matches!(
            self.kind,
            TokenKind::ArithmeticOperator | TokenKind::ComparisonOperator | TokenKind::LogicalOperator
        ) && self.text == op
    }
}

/// Classifies a word as a keyword, if it is reserved.
pub fn keyword_kind(word: &str) -> Option<KeywordKind> {
    if DATA_TYPE_KEYWORDS.contains(&word) {
        Some(KeywordKind::DataType)
    } else if CONDITIONAL_KEYWORDS.contains(&word) {
        Some(KeywordKind::Conditional)
    } else if LOOP_KEYWORDS.contains(&word) {
        Some(KeywordKind::Loop)
    } else if OTHER_KEYWORDS.contains(&word) {
        Some(KeywordKind::Other)
    } else {
        None
    }
}

/// Classifies a maximal run of operator characters.
pub fn operator_kind(run: &str) -> TokenKind {
    if COMPARISON_OPERATORS.contains(&run) {
        TokenKind::ComparisonOperator
    } else if LOGICAL_OPERATORS.contains(&run) {
        TokenKind::LogicalOperator
    } else {
        TokenKind::ArithmeticOperator
    }
}
