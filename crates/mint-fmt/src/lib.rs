//! Canonical source printer for Mint programs.
//!
//! Output re-parses to the same AST, so formatting is idempotent: operands
//! are parenthesized only where the grammar would otherwise group them
//! differently.

use mint_lexer::Lexer;
use mint_parser::Parser;
use mint_syntax::ast::*;
use mint_syntax::error::Result;

const INDENT: usize = 4;

/// Lexes, parses and prints `src` in canonical form.
pub fn format_source(src: &str, file: &str) -> Result<String> {
    let tokens = Lexer::new(src, file).tokenize()?;
    let program = Parser::new(tokens).parse_program()?;
    Ok(format_program(&program))
}

pub fn format_program(p: &Program) -> String {
    p.statements.iter().map(|s| format_stmt(s, 0)).collect()
}

/// One statement, including its `;` and trailing newline.
pub fn format_stmt(s: &Stmt, indent: usize) -> String {
    let pad = " ".repeat(indent);
    let mut out = String::new();
    match &s.kind {
        StmtKind::If(chain) => {
            out.push_str(&pad);
            format_if_chain(&mut out, chain, indent);
        }
        StmtKind::Switch { scrutinee, arms } => {
            out.push_str(&format!("{}switch ({}) {{\n", pad, format_expr(scrutinee)));
            let arm_pad = " ".repeat(indent + INDENT);
            for arm in arms {
                let (head, body) = match arm {
                    SwitchArm::Case { label, body } => (format!("case {}:", format_expr(label)), body),
                    SwitchArm::Default { body } => ("default:".to_string(), body),
                };
                let body = format_stmt(body, indent + INDENT);
                out.push_str(&format!("{}{} {}", arm_pad, head, body.trim_start()));
            }
            out.push_str(&format!("{}}}\n", pad));
        }
        StmtKind::For { header, body } => {
            out.push_str(&format!(
                "{}for ({}; {}; {}) {{\n",
                pad,
                simple_stmt(&header.init),
                format_expr(&header.cond),
                format_expr(&header.step)
            ));
            format_body(&mut out, body, indent);
            out.push_str(&format!("{}}}\n", pad));
        }
        StmtKind::While { cond, body } => {
            out.push_str(&format!("{}while ({}) {{\n", pad, format_expr(cond)));
            format_body(&mut out, body, indent);
            out.push_str(&format!("{}}}\n", pad));
        }
        StmtKind::DoWhile { body, cond } => {
            out.push_str(&format!("{}do {{\n", pad));
            format_body(&mut out, body, indent);
            out.push_str(&format!("{}}} while ({});\n", pad, format_expr(cond)));
        }
        _ => out.push_str(&format!("{}{};\n", pad, simple_stmt(s))),
    }
    out
}

fn format_body(out: &mut String, body: &[Stmt], indent: usize) {
    for st in body {
        out.push_str(&format_stmt(st, indent + INDENT));
    }
}

fn format_if_chain(out: &mut String, chain: &IfChain, indent: usize) {
    let pad = " ".repeat(indent);
    out.push_str(&format!("if ({}) {{\n", format_expr(&chain.cond)));
    format_body(out, &chain.body, indent);
    out.push_str(&pad);
    out.push('}');
    match chain.otherwise.as_deref() {
        Some(Otherwise::Elif(next)) => {
            out.push_str(" el");
            format_if_chain(out, next, indent);
        }
        Some(Otherwise::Else(body)) => {
            out.push_str(" else {\n");
            format_body(out, body, indent);
            out.push_str(&pad);
            out.push_str("}\n");
        }
        None => out.push('\n'),
    }
}

/// Statements that fit on one line, without their terminator.
fn simple_stmt(s: &Stmt) -> String {
    match &s.kind {
        StmtKind::Declare { ty, name, init: Some(e) } => format!("{} {} = {}", ty, name, format_expr(e)),
        StmtKind::Declare { ty, name, init: None } => format!("{} {}", ty, name),
        StmtKind::Assign { name, expr } => format!("{} = {}", name, format_expr(expr)),
        StmtKind::Ident(name) => name.clone(),
        StmtKind::Expr(e) => format_expr(e),
        StmtKind::Print(e) => format!("print({})", format_expr(e)),
        StmtKind::Break => "break".to_string(),
        StmtKind::Continue => "continue".to_string(),
        StmtKind::Pass => "pass".to_string(),
        _ => format_stmt(s, 0).trim_end().to_string(),
    }
}

/// Binding strength: logical 1, comparison and ternary 2, term 3, atom 4.
fn level(e: &Expr) -> u8 {
    match e.kind {
        ExprKind::Logical { .. } => 1,
        ExprKind::Compare { .. } | ExprKind::Ternary { .. } => 2,
        ExprKind::Arith { .. } | ExprKind::Postfix { .. } => 3,
        ExprKind::Literal(_) | ExprKind::Ident(_) => 4,
    }
}

fn wrap_below(e: &Expr, min: u8) -> String {
    if level(e) < min {
        format!("({})", format_expr(e))
    } else {
        format_expr(e)
    }
}

pub fn format_expr(e: &Expr) -> String {
    match &e.kind {
        ExprKind::Literal(lit) => format_literal(lit),
        ExprKind::Ident(name) => name.clone(),
        ExprKind::Postfix { op, name } => format!("{}{}", name, op.symbol()),
        ExprKind::Arith { op, lhs, rhs } => {
            // Arithmetic folds left, so a left operand that is itself
            // arithmetic needs no parentheses.
            let left = match lhs.kind {
                ExprKind::Arith { .. } => format_expr(lhs),
                _ => wrap_below(lhs, 4),
            };
            format!("{} {} {}", left, op.symbol(), wrap_below(rhs, 4))
        }
        ExprKind::Compare { op, lhs, rhs } => {
            format!("{} {} {}", wrap_below(lhs, 3), op.symbol(), wrap_below(rhs, 3))
        }
        ExprKind::Logical { op, lhs, rhs } => {
            format!("{} {} {}", format_expr(lhs), op.symbol(), wrap_below(rhs, 2))
        }
        ExprKind::Ternary {
            cond,
            then_branch,
            else_branch,
        } => format!(
            "{} ? {} : {}",
            wrap_below(cond, 3),
            wrap_below(then_branch, 3),
            wrap_below(else_branch, 3)
        ),
    }
}

fn format_literal(lit: &Literal) -> String {
    match lit {
        Literal::Int(n) => n.to_string(),
        Literal::Double(d) => {
            let s = d.to_string();
            if s.contains('.') {
                s
            } else {
                format!("{}.0", s)
            }
        }
        Literal::Str(s) => {
            let quote = if closes_safely(s, '"') { '"' } else { '\'' };
            format!("{}{}{}", quote, s, quote)
        }
        Literal::Bool(b) => b.to_string(),
    }
}

/// True when every `quote` in `text` is escaped, so it can delimit `text`.
fn closes_safely(text: &str, quote: char) -> bool {
    let mut prev = None;
    for c in text.chars() {
        if c == quote && prev != Some('\\') {
            return false;
        }
        prev = Some(c);
    }
    true
}
