//! Recursive-descent parser producing the Mint AST.

use log::{debug, trace};
use mint_syntax::ast::*;
use mint_syntax::error::{error_at, Error, ErrorKind, Result};
use mint_syntax::token::{KeywordKind, LiteralKind, Span, Token, TokenKind};

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    /// Error reported when the stream runs out, placed at the last token.
    fn end_of_input(&self, hint: &str) -> Error {
        let (line, col) = self
            .tokens
            .last()
            .map(|t| (t.span.line, t.span.col))
            .unwrap_or((1, 1));
        Error::with_span(ErrorKind::Syntax, "Unexpected end of input", line, col).expecting(hint)
    }

    fn next(&mut self, hint: &str) -> Result<Token> {
        match self.tokens.get(self.pos) {
            Some(tok) => {
                let tok = tok.clone();
                self.pos += 1;
                Ok(tok)
            }
            None => Err(self.end_of_input(hint)),
        }
    }

    /// Consumes the next token if `pred` accepts it, otherwise reports it
    /// with `hint` as the expected form.
    fn expect(&mut self, pred: impl Fn(&Token) -> bool, hint: &str) -> Result<Token> {
        match self.peek() {
            Some(tok) if pred(tok) => self.next(hint),
            Some(tok) => Err(Error::unexpected(tok).expecting(hint)),
            None => Err(self.end_of_input(hint)),
        }
    }

    fn expect_separator(&mut self, sep: &str) -> Result<Token> {
        self.expect(|t| t.is_separator(sep), sep)
    }

    fn expect_keyword(&mut self, kw: &str) -> Result<Token> {
        self.expect(|t| t.is_keyword(kw), kw)
    }

    fn at_keyword(&self, kw: &str) -> bool {
        self.peek().map_or(false, |t| t.is_keyword(kw))
    }

    fn at_operator(&self, op: &str) -> bool {
        self.peek().map_or(false, |t| t.is_operator(op))
    }

    /// Parses a whole token stream. An empty stream is rejected.
    pub fn parse_program(&mut self) -> Result<Program> {
        if self.tokens.is_empty() {
            return error_at(ErrorKind::Syntax, 1, 1, "Unexpected end of input");
        }
        let mut statements = Vec::new();
        while self.peek().is_some() {
            statements.push(self.parse_terminated()?);
        }
        debug!("parsed {} top-level statements", statements.len());
        Ok(Program { statements })
    }

    /// A statement plus its `;`, unless its form already closes itself.
    fn parse_terminated(&mut self) -> Result<Stmt> {
        let stmt = self.parse_stmt()?;
        if !stmt.is_self_terminated() {
            self.expect_separator(";")?;
        }
        Ok(stmt)
    }

    fn parse_block(&mut self) -> Result<Vec<Stmt>> {
        self.expect_separator("{")?;
        let mut body = Vec::new();
        loop {
            match self.peek() {
                Some(t) if t.is_separator("}") => {
                    self.pos += 1;
                    return Ok(body);
                }
                Some(_) => body.push(self.parse_terminated()?),
                None => return Err(self.end_of_input("}")),
            }
        }
    }

    pub fn parse_stmt(&mut self) -> Result<Stmt> {
        let tok = match self.peek() {
            Some(t) => t.clone(),
            None => return Err(self.end_of_input("statement")),
        };
        trace!("statement at {}:{}", tok.span.line, tok.span.col);
        match tok.kind {
            TokenKind::Keyword(_) => match tok.text.as_str() {
                "int" | "double" | "str" | "bool" => self.parse_declaration(),
                "print" => {
                    self.pos += 1;
                    self.expect_separator("(")?;
                    let expr = self.parse_expr()?;
                    self.expect_separator(")")?;
                    Ok(Stmt::new(StmtKind::Print(expr), tok.span))
                }
                "break" | "continue" | "pass" => {
                    self.pos += 1;
                    let kind = match tok.text.as_str() {
                        "break" => StmtKind::Break,
                        "continue" => StmtKind::Continue,
                        _ => StmtKind::Pass,
                    };
                    Ok(Stmt::new(kind, tok.span))
                }
                "if" => Ok(Stmt::new(StmtKind::If(self.parse_if_chain()?), tok.span)),
                "switch" => self.parse_switch(),
                "for" => self.parse_for(),
                "while" => self.parse_while(),
                "do" => self.parse_do_while(),
                _ => Err(Error::unexpected(&tok).expecting("statement")),
            },
            TokenKind::Identifier => self.parse_ident_stmt(),
            _ => Err(Error::unexpected(&tok).expecting("statement")),
        }
    }

    fn parse_declaration(&mut self) -> Result<Stmt> {
        let ty_tok = self.next("data type")?;
        let ty = Type::from_keyword(&ty_tok.text).ok_or_else(|| Error::unexpected(&ty_tok).expecting("data type"))?;
        let name = self.expect(|t| t.kind == TokenKind::Identifier, "identifier")?.text;
        let init = if self.at_operator("=") {
            self.pos += 1;
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(Stmt::new(StmtKind::Declare { ty, name, init }, ty_tok.span))
    }

    /// `x = expr`, an expression led by `x` and an arithmetic operator, or a
    /// lone `x`.
    fn parse_ident_stmt(&mut self) -> Result<Stmt> {
        let ident = self.next("identifier")?;
        match self.peek() {
            Some(t) if t.is_operator("=") => {
                self.pos += 1;
                let expr = self.parse_expr()?;
                Ok(Stmt::new(StmtKind::Assign { name: ident.text, expr }, ident.span))
            }
            Some(t) if t.kind == TokenKind::ArithmeticOperator => {
                self.pos -= 1;
                let expr = self.parse_expr()?;
                Ok(Stmt::new(StmtKind::Expr(expr), ident.span))
            }
            _ => Ok(Stmt::new(StmtKind::Ident(ident.text), ident.span)),
        }
    }

    /// `if`/`elif` header and body, then any continuation of the chain.
    fn parse_if_chain(&mut self) -> Result<IfChain> {
        let head = self.next("if")?;
        self.expect_separator("(")?;
        let cond = self.parse_expr()?;
        self.expect_separator(")")?;
        let body = self.parse_block()?;
        let otherwise = if self.at_keyword("elif") {
            Some(Box::new(Otherwise::Elif(self.parse_if_chain()?)))
        } else if self.at_keyword("else") {
            self.pos += 1;
            Some(Box::new(Otherwise::Else(self.parse_block()?)))
        } else {
            None
        };
        Ok(IfChain {
            cond,
            body,
            otherwise,
            span: head.span,
        })
    }

    fn parse_switch(&mut self) -> Result<Stmt> {
        let head = self.expect_keyword("switch")?;
        self.expect_separator("(")?;
        let scrutinee = self.parse_expr()?;
        self.expect_separator(")")?;
        self.expect_separator("{")?;
        let mut arms = Vec::new();
        let mut seen_default = false;
        loop {
            let tok = match self.peek() {
                Some(t) => t.clone(),
                None => return Err(self.end_of_input("}")),
            };
            if tok.is_separator("}") {
                self.pos += 1;
                break;
            }
            if tok.is_keyword("case") {
                self.pos += 1;
                let label = self.parse_case_label()?;
                self.expect(|t| t.is_operator(":"), ":")?;
                let body = Box::new(self.parse_arm_body()?);
                arms.push(SwitchArm::Case { label, body });
            } else if tok.is_keyword("default") && !seen_default {
                self.pos += 1;
                seen_default = true;
                self.expect(|t| t.is_operator(":"), ":")?;
                let body = Box::new(self.parse_arm_body()?);
                arms.push(SwitchArm::Default { body });
            } else {
                return Err(Error::unexpected(&tok).expecting("case"));
            }
            // An arm may close with `break;`, which has no effect.
            if self.at_keyword("break") {
                self.pos += 1;
                self.expect_separator(";")?;
            }
        }
        Ok(Stmt::new(StmtKind::Switch { scrutinee, arms }, head.span))
    }

    /// An arm body always ends in `;`, even when it closes with a block.
    fn parse_arm_body(&mut self) -> Result<Stmt> {
        let body = self.parse_terminated()?;
        if body.is_self_terminated() && self.peek().map_or(false, |t| t.is_separator(";")) {
            self.pos += 1;
        }
        Ok(body)
    }

    fn parse_case_label(&mut self) -> Result<Expr> {
        match self.peek() {
            Some(t) if matches!(t.kind, TokenKind::Literal(_) | TokenKind::Identifier) => self.parse_factor(),
            Some(t) => Err(Error::unexpected(t).expecting("literal")),
            None => Err(self.end_of_input("literal")),
        }
    }

    fn parse_for(&mut self) -> Result<Stmt> {
        let head = self.expect_keyword("for")?;
        self.expect_separator("(")?;
        let init = match self.peek() {
            Some(t) if t.kind == TokenKind::Keyword(KeywordKind::DataType) => self.parse_declaration()?,
            Some(t) => return Err(Error::unexpected(t).expecting("data type")),
            None => return Err(self.end_of_input("data type")),
        };
        self.expect_separator(";")?;
        let cond = self.parse_expr()?;
        self.expect_separator(";")?;
        let step = self.parse_expr()?;
        self.expect_separator(")")?;
        let body = self.parse_block()?;
        let header = LoopHeader {
            init: Box::new(init),
            cond,
            step,
        };
        Ok(Stmt::new(StmtKind::For { header, body }, head.span))
    }

    fn parse_while(&mut self) -> Result<Stmt> {
        let head = self.expect_keyword("while")?;
        self.expect_separator("(")?;
        let cond = self.parse_expr()?;
        self.expect_separator(")")?;
        let body = self.parse_block()?;
        Ok(Stmt::new(StmtKind::While { cond, body }, head.span))
    }

    fn parse_do_while(&mut self) -> Result<Stmt> {
        let head = self.expect_keyword("do")?;
        let body = self.parse_block()?;
        self.expect_keyword("while")?;
        self.expect_separator("(")?;
        let cond = self.parse_expr()?;
        self.expect_separator(")")?;
        self.expect_separator(";")?;
        Ok(Stmt::new(StmtKind::DoWhile { body, cond }, head.span))
    }

    // Expressions

    pub fn parse_expr(&mut self) -> Result<Expr> {
        let mut lhs = self.parse_comparison()?;
        while let Some(tok) = self.peek() {
            if tok.kind != TokenKind::LogicalOperator {
                break;
            }
            let op = match tok.text.as_str() {
                "&&" => LogicalOp::And,
                "||" => LogicalOp::Or,
                _ => return Err(Error::unexpected(tok)),
            };
            let span = tok.span;
            self.pos += 1;
            let rhs = self.parse_comparison()?;
            lhs = Expr::new(
                ExprKind::Logical {
                    op,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                },
                span,
            );
        }
        Ok(lhs)
    }

    /// At most one relational operator, or a `? :` ternary whose three parts
    /// are terms.
    fn parse_comparison(&mut self) -> Result<Expr> {
        let lhs = self.parse_term()?;
        let tok = match self.peek() {
            Some(t) if t.kind == TokenKind::ComparisonOperator => t.clone(),
            _ => return Ok(lhs),
        };
        let op = match tok.text.as_str() {
            "<" => CompareOp::Lt,
            ">" => CompareOp::Gt,
            "<=" => CompareOp::Le,
            ">=" => CompareOp::Ge,
            "==" => CompareOp::Eq,
            "?" => {
                self.pos += 1;
                let then_branch = self.parse_term()?;
                self.expect(|t| t.is_operator(":"), ":")?;
                let else_branch = self.parse_term()?;
                return Ok(Expr::new(
                    ExprKind::Ternary {
                        cond: Box::new(lhs),
                        then_branch: Box::new(then_branch),
                        else_branch: Box::new(else_branch),
                    },
                    tok.span,
                ));
            }
            _ => return Err(Error::unexpected(&tok)),
        };
        self.pos += 1;
        let rhs = self.parse_term()?;
        Ok(Expr::new(
            ExprKind::Compare {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
            tok.span,
        ))
    }

    /// `+ - * /` share one level and fold left. A trailing `++`/`--` ends the
    /// term and applies to the identifier before it.
    fn parse_term(&mut self) -> Result<Expr> {
        let mut lhs = self.parse_factor()?;
        while let Some(tok) = self.peek() {
            if tok.kind != TokenKind::ArithmeticOperator {
                break;
            }
            let op = match tok.text.as_str() {
                "+" => ArithOp::Add,
                "-" => ArithOp::Sub,
                "*" => ArithOp::Mul,
                "/" => ArithOp::Div,
                "++" | "--" => {
                    let step = if tok.text == "++" { StepOp::Incr } else { StepOp::Decr };
                    let name = match &lhs.kind {
                        ExprKind::Ident(name) => name.clone(),
                        _ => return Err(Error::unexpected(tok).expecting("identifier")),
                    };
                    self.pos += 1;
                    return Ok(Expr::new(ExprKind::Postfix { op: step, name }, lhs.span));
                }
                _ => break,
            };
            let span = tok.span;
            self.pos += 1;
            let rhs = self.parse_factor()?;
            lhs = Expr::new(
                ExprKind::Arith {
                    op,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                },
                span,
            );
        }
        Ok(lhs)
    }

    fn parse_factor(&mut self) -> Result<Expr> {
        let tok = self.next("expression")?;
        let kind = match tok.kind {
            TokenKind::Literal(lit) => ExprKind::Literal(literal(&tok, lit)?),
            TokenKind::Identifier => ExprKind::Ident(tok.text.clone()),
            TokenKind::Separator if tok.text == "(" => {
                let inner = self.parse_expr()?;
                self.expect_separator(")")?;
                return Ok(inner);
            }
            _ => return Err(Error::unexpected(&tok).expecting("expression")),
        };
        Ok(Expr::new(kind, tok.span))
    }
}

fn literal(tok: &Token, kind: LiteralKind) -> Result<Literal> {
    let out_of_range = |span: Span| Error::with_span(ErrorKind::Syntax, format!("Invalid number literal '{}'", tok.text), span.line, span.col);
    Ok(match kind {
        LiteralKind::Integer => Literal::Int(tok.text.parse().map_err(|_| out_of_range(tok.span))?),
        LiteralKind::Double => Literal::Double(tok.text.parse().map_err(|_| out_of_range(tok.span))?),
        LiteralKind::String => Literal::Str(tok.text.clone()),
        LiteralKind::Boolean => Literal::Bool(tok.text == "true"),
    })
}
