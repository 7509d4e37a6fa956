//! Static type and scope checking over the Mint AST.
//!
//! Nested blocks are checked by a fresh [`Analyzer`] seeded with a copy of
//! the enclosing symbol table, so declarations made inside a block never
//! leak out of it.

use std::slice;

use log::{debug, trace};
use mint_syntax::ast::*;
use mint_syntax::error::{Error, Result};
use mint_syntax::token::Span;

const BAD_STATEMENT: &str = "Error while evaluating statement";
const BAD_EXPRESSION: &str = "Error while evaluating expression";

fn fail<T>(span: Span, msg: impl Into<String>) -> Result<T> {
    Err(Error::semantic(span, msg))
}

fn not_bool(span: Span, found: Type) -> Error {
    Error::semantic(span, format!("`{}` is not a type of `bool`", found))
}

/// Checks `statements` against a copy of `inherited` and returns the table
/// as it stands after the last statement.
pub fn check(statements: &[Stmt], inherited: &SymbolTable) -> Result<SymbolTable> {
    let symbols = Analyzer::new(inherited.clone()).check_block(statements)?;
    debug!("semantic check passed, {} symbols in scope", symbols.len());
    Ok(symbols)
}

#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    symbols: SymbolTable,
    /// Set while checking a loop body; enables `break` and `continue`
    in_loop: bool,
}

impl Analyzer {
    pub fn new(symbols: SymbolTable) -> Self {
        Self {
            symbols,
            in_loop: false,
        }
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    fn nested(&self, in_loop: bool) -> Analyzer {
        Analyzer {
            symbols: self.symbols.clone(),
            in_loop,
        }
    }

    /// Checks a statement sequence and hands back the resulting table.
    pub fn check_block(mut self, statements: &[Stmt]) -> Result<SymbolTable> {
        for stmt in statements {
            self.check_stmt(stmt)?;
        }
        Ok(self.symbols)
    }

    fn declare(&mut self, name: &str, ty: Type, span: Span) -> Result<()> {
        if self.symbols.contains_key(name) {
            return fail(span, format!("Variable `{}` is already defined", name));
        }
        trace!("declare {}: {}", name, ty);
        self.symbols.insert(name.to_string(), ty);
        Ok(())
    }

    fn expect_assignable(&self, target: Type, value: &Expr, span: Span) -> Result<()> {
        let found = self.type_of(value)?;
        if found != target {
            return fail(
                span,
                format!("A value of type `{}` can't be assigned to a variable of type `{}`", found, target),
            );
        }
        Ok(())
    }

    fn expect_bool(&self, cond: &Expr) -> Result<()> {
        match self.type_of(cond)? {
            Type::Bool => Ok(()),
            other => Err(not_bool(cond.span, other)),
        }
    }

    pub fn check_stmt(&mut self, stmt: &Stmt) -> Result<()> {
        match &stmt.kind {
            StmtKind::Declare { ty, name, init } => {
                // The name is visible to its own initializer.
                self.declare(name, *ty, stmt.span)?;
                if let Some(init) = init {
                    self.expect_assignable(*ty, init, stmt.span)?;
                }
            }
            StmtKind::Assign { name, expr } => {
                let target = match self.symbols.get(name) {
                    Some(ty) => *ty,
                    None => return fail(stmt.span, format!("Undefined variable: `{}`", name)),
                };
                self.expect_assignable(target, expr, stmt.span)?;
            }
            StmtKind::Ident(name) => {
                if !self.symbols.contains_key(name) {
                    return fail(stmt.span, format!("Undefined variable: `{}`", name));
                }
            }
            StmtKind::Expr(expr) | StmtKind::Print(expr) => {
                self.type_of(expr)?;
            }
            StmtKind::Break | StmtKind::Continue => {
                if !self.in_loop {
                    return fail(stmt.span, BAD_STATEMENT);
                }
            }
            StmtKind::Pass => {}
            StmtKind::If(chain) => self.check_if_chain(chain)?,
            StmtKind::Switch { scrutinee, arms } => {
                let expected = self.type_of(scrutinee)?;
                for arm in arms {
                    let body = match arm {
                        SwitchArm::Case { label, body } => {
                            let found = self.type_of(label)?;
                            if found != expected {
                                return fail(label.span, format!("`{}` is not a type of `{}`", found, expected));
                            }
                            body
                        }
                        SwitchArm::Default { body } => body,
                    };
                    self.nested(false).check_block(slice::from_ref(body.as_ref()))?;
                }
            }
            StmtKind::For { header, body } => {
                let loop_vars = Analyzer::default().check_block(slice::from_ref(header.init.as_ref()))?;
                let mut scope = self.nested(true);
                for (name, ty) in loop_vars {
                    if ty != Type::Int {
                        return fail(header.init.span, BAD_STATEMENT);
                    }
                    scope.declare(&name, ty, header.init.span)?;
                }
                scope.expect_bool(&header.cond)?;
                scope.type_of(&header.step)?;
                scope.check_block(body)?;
            }
            StmtKind::While { cond, body } => {
                self.expect_bool(cond)?;
                self.nested(true).check_block(body)?;
            }
            StmtKind::DoWhile { body, cond } => {
                self.expect_bool(cond)?;
                self.nested(true).check_block(body)?;
            }
        }
        Ok(())
    }

    fn check_if_chain(&self, chain: &IfChain) -> Result<()> {
        self.expect_bool(&chain.cond)?;
        self.nested(self.in_loop).check_block(&chain.body)?;
        match chain.otherwise.as_deref() {
            Some(Otherwise::Elif(next)) => self.check_if_chain(next),
            Some(Otherwise::Else(body)) => self.nested(self.in_loop).check_block(body).map(|_| ()),
            None => Ok(()),
        }
    }

    /// Computes the static type of an expression.
    pub fn type_of(&self, expr: &Expr) -> Result<Type> {
        match &expr.kind {
            ExprKind::Literal(lit) => Ok(lit.ty()),
            ExprKind::Ident(name) => match self.symbols.get(name) {
                Some(ty) => Ok(*ty),
                None => fail(expr.span, format!("variable `{}` is not defined", name)),
            },
            ExprKind::Postfix { name, .. } => match self.symbols.get(name) {
                Some(Type::Int) => Ok(Type::Int),
                Some(_) => fail(expr.span, BAD_EXPRESSION),
                None => fail(expr.span, format!("variable `{}` is not defined", name)),
            },
            ExprKind::Arith { op, lhs, rhs } => {
                let l = self.type_of(lhs)?;
                let r = self.type_of(rhs)?;
                arith_result(*op, l, r).ok_or_else(|| Error::semantic(lhs.span, BAD_EXPRESSION))
            }
            ExprKind::Compare { lhs, rhs, .. } => {
                if self.type_of(lhs)? == self.type_of(rhs)? {
                    Ok(Type::Bool)
                } else {
                    fail(lhs.span, BAD_EXPRESSION)
                }
            }
            ExprKind::Ternary {
                cond,
                then_branch,
                else_branch,
            } => {
                self.expect_bool(cond)?;
                let then_ty = self.type_of(then_branch)?;
                if then_ty != self.type_of(else_branch)? {
                    return fail(then_branch.span, BAD_EXPRESSION);
                }
                Ok(then_ty)
            }
            ExprKind::Logical { lhs, rhs, .. } => {
                let l = self.type_of(lhs)?;
                let r = self.type_of(rhs)?;
                if l != Type::Bool {
                    return Err(not_bool(lhs.span, l));
                }
                if r != Type::Bool {
                    return Err(not_bool(rhs.span, r));
                }
                Ok(Type::Bool)
            }
        }
    }
}

/// Result type of `+ - * /`, or `None` when the operands don't combine.
pub fn arith_result(op: ArithOp, l: Type, r: Type) -> Option<Type> {
    use Type::*;
    match (op, l, r) {
        (_, Bool, _) | (_, _, Bool) => None,
        (ArithOp::Add, Str, Str) | (ArithOp::Mul, Str, Int) | (ArithOp::Mul, Int, Str) => Some(Str),
        (_, Str, _) | (_, _, Str) => None,
        (_, l, r) if l == r => Some(l),
        (_, Int, Double) | (_, Double, Int) => Some(Double),
        _ => None,
    }
}
