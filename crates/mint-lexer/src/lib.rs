//! Mint lexer: converts source text into classified tokens.
use log::debug;
use mint_syntax::error::{error_at, ErrorKind, Result};
use mint_syntax::token::{
    keyword_kind, operator_kind, LiteralKind, Span, Token, TokenKind, BOOLEAN_LITERALS,
    OPERATOR_CHARS, SEPARATORS,
};

/// Character scanner that produces tokens with positions.
pub struct Lexer {
    src: Vec<char>,
    file: String,
    pos: usize,
    line: usize,
    col: usize,
}

impl Lexer {
    /// Create a new lexer over `input`, attributing tokens to `file`.
    pub fn new(input: &str, file: impl Into<String>) -> Self {
        Self {
            src: input.chars().collect(),
            file: file.into(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.src.get(self.pos).copied()
    }
    fn peek_next(&self) -> Option<char> {
        self.src.get(self.pos + 1).copied()
    }
    fn advance(&mut self) -> Option<char> {
        let ch = self.src.get(self.pos).copied();
        if let Some(c) = ch {
            self.pos += 1;
            if c == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
        ch
    }

    /// Consumes characters while `pred` holds and returns them.
    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut s = String::new();
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            s.push(c);
            self.advance();
        }
        s
    }

    fn token(&self, kind: TokenKind, text: String, start: usize, line: usize, col: usize) -> Token {
        Token {
            kind,
            text,
            span: Span {
                start,
                end: self.pos,
                line,
                col,
            },
            file: self.file.clone(),
        }
    }

    fn at_comment(&self) -> bool {
        match self.peek() {
            Some('#') => true,
            Some('/') => self.peek_next() == Some('/'),
            _ => false,
        }
    }

    fn skip_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn read_word(&mut self) -> (TokenKind, String) {
        let word = self.take_while(|c| c.is_alphanumeric());
        let kind = if BOOLEAN_LITERALS.contains(&word.as_str()) {
            TokenKind::Literal(LiteralKind::Boolean)
        } else if let Some(kw) = keyword_kind(&word) {
            TokenKind::Keyword(kw)
        } else {
            TokenKind::Identifier
        };
        (kind, word)
    }

    fn read_number(&mut self) -> (TokenKind, String) {
        let mut s = String::new();
        if self.peek() == Some('-') {
            s.push('-');
            self.advance();
        }
        let mut seen_dot = false;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                s.push(c);
            } else if c == '.' && !seen_dot {
                seen_dot = true;
                s.push(c);
            } else {
                break;
            }
            self.advance();
        }
        let kind = if seen_dot { LiteralKind::Double } else { LiteralKind::Integer };
        (TokenKind::Literal(kind), s)
    }

    /// Reads a string body after its opening quote. The text is kept raw;
    /// a quote preceded by a backslash does not close the literal.
    fn read_string(&mut self, quote: char, line: usize, col: usize) -> Result<String> {
        let mut s = String::new();
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
            if c == quote && !s.ends_with('\\') {
                return Ok(s);
            }
            s.push(c);
        }
        error_at(ErrorKind::Lex, line, col, "Unterminated string literal")
    }

    /// Tokenize the entire input.
    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
                continue;
            }
            if self.at_comment() {
                self.skip_comment();
                continue;
            }
            let start = self.pos;
            let line = self.line;
            let col = self.col;
            let (kind, text) = if c.is_alphabetic() {
                self.read_word()
            } else if c.is_ascii_digit() || (c == '-' && self.peek_next().map_or(false, |n| n.is_ascii_digit())) {
                self.read_number()
            } else if c == '"' || c == '\'' {
                self.advance();
                let body = self.read_string(c, line, col)?;
                (TokenKind::Literal(LiteralKind::String), body)
            } else if SEPARATORS.contains(&c) {
                self.advance();
                (TokenKind::Separator, c.to_string())
            } else if c == '.' {
                let dots = self.take_while(|c| c == '.');
                (TokenKind::Dot, dots)
            } else if OPERATOR_CHARS.contains(&c) {
                let run = self.take_while(|c| OPERATOR_CHARS.contains(&c));
                (operator_kind(&run), run)
            } else {
                return error_at(ErrorKind::Lex, line, col, format!("Unexpected character found: '{}'", c));
            };
            tokens.push(self.token(kind, text, start, line, col));
        }
        debug!("lexed {} tokens from {}", tokens.len(), self.file);
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mint_syntax::token::KeywordKind;

    fn lex(input: &str) -> Vec<Token> {
        Lexer::new(input, "test.mt").tokenize().expect("Lexing should succeed")
    }

    fn kinds(input: &str) -> Vec<(TokenKind, String)> {
        lex(input).into_iter().map(|t| (t.kind, t.text)).collect()
    }

    #[test]
    fn test_declaration_tokens() {
        assert_eq!(
            kinds("int x = 42;"),
            vec![
                (TokenKind::Keyword(KeywordKind::DataType), "int".to_string()),
                (TokenKind::Identifier, "x".to_string()),
                (TokenKind::ArithmeticOperator, "=".to_string()),
                (TokenKind::Literal(LiteralKind::Integer), "42".to_string()),
                (TokenKind::Separator, ";".to_string()),
            ]
        );
    }

    #[test]
    fn test_keyword_subkinds() {
        let toks = lex("if while print switch double true");
        assert_eq!(toks[0].kind, TokenKind::Keyword(KeywordKind::Conditional));
        assert_eq!(toks[1].kind, TokenKind::Keyword(KeywordKind::Loop));
        assert_eq!(toks[2].kind, TokenKind::Keyword(KeywordKind::Other));
        assert_eq!(toks[3].kind, TokenKind::Keyword(KeywordKind::Conditional));
        assert_eq!(toks[4].kind, TokenKind::Keyword(KeywordKind::DataType));
        assert_eq!(toks[5].kind, TokenKind::Literal(LiteralKind::Boolean));
    }

    #[test]
    fn test_numbers() {
        let toks = lex("3.25 -7 10");
        assert_eq!(toks[0].kind, TokenKind::Literal(LiteralKind::Double));
        assert_eq!(toks[0].text, "3.25");
        assert_eq!(toks[1].kind, TokenKind::Literal(LiteralKind::Integer));
        assert_eq!(toks[1].text, "-7");
        assert_eq!(toks[2].text, "10");
    }

    #[test]
    fn test_minus_before_digit_is_a_negative_literal() {
        let toks = kinds("x-1");
        assert_eq!(toks[1], (TokenKind::Literal(LiteralKind::Integer), "-1".to_string()));
        let spaced = kinds("x - 1");
        assert_eq!(spaced[1], (TokenKind::ArithmeticOperator, "-".to_string()));
    }

    #[test]
    fn test_operator_runs() {
        let toks = kinds("a <= b && c ? d : e ++ += ||");
        let ops: Vec<_> = toks.into_iter().filter(|(k, _)| *k != TokenKind::Identifier).collect();
        assert_eq!(
            ops,
            vec![
                (TokenKind::ComparisonOperator, "<=".to_string()),
                (TokenKind::LogicalOperator, "&&".to_string()),
                (TokenKind::ComparisonOperator, "?".to_string()),
                (TokenKind::ComparisonOperator, ":".to_string()),
                (TokenKind::ArithmeticOperator, "++".to_string()),
                (TokenKind::ArithmeticOperator, "+=".to_string()),
                (TokenKind::LogicalOperator, "||".to_string()),
            ]
        );
    }

    #[test]
    fn test_strings_keep_raw_text() {
        let toks = lex(r#"'single' "dou\"ble""#);
        assert_eq!(toks[0].kind, TokenKind::Literal(LiteralKind::String));
        assert_eq!(toks[0].text, "single");
        assert_eq!(toks[1].text, r#"dou\"ble"#);
    }

    #[test]
    fn test_comments_are_skipped() {
        let toks = lex("# header\nint a; // trailing\nprint(a);");
        assert_eq!(toks.len(), 8);
        assert!(toks[0].is_keyword("int"));
        assert_eq!(toks[3].span.line, 3);
    }

    #[test]
    fn test_positions() {
        let toks = lex("int x;\n  x = 1;");
        let x = &toks[3];
        assert_eq!(x.text, "x");
        assert_eq!((x.span.line, x.span.col), (2, 3));
        assert_eq!((x.span.start, x.span.end), (9, 10));
        assert_eq!(x.file, "test.mt");
    }

    #[test]
    fn test_dots() {
        let toks = kinds("a..b");
        assert_eq!(toks[1], (TokenKind::Dot, "..".to_string()));
    }

    #[test]
    fn test_errors() {
        let err = Lexer::new("int x = 1;\nx = $;", "t.mt").tokenize().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Lex);
        assert_eq!(err.msg, "Unexpected character found: '$'");
        assert_eq!((err.line, err.col), (Some(2), Some(5)));

        assert!(Lexer::new("my_var", "t.mt").tokenize().is_err());
        let unterminated = Lexer::new("str s = \"abc\n", "t.mt").tokenize().unwrap_err();
        assert_eq!(unterminated.msg, "Unterminated string literal");
    }
}
