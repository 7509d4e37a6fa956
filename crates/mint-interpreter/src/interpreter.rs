//! Main interpreter engine.

use std::io::Write;
use std::mem;
use std::slice;

use log::{debug, trace};
use mint_syntax::ast::*;
use mint_syntax::error::{Error, ErrorKind, Result};
use mint_syntax::token::Span;

use crate::env::Scope;
use crate::flow::Flow;
use crate::value::{Value, BAD_EXPRESSION};

const BAD_STATEMENT: &str = "Error while evaluating statement";
const NOT_BOOL: &str = "Expression should be type of `bool`";

/// Executes a program against an empty scope, writing `print` output to `out`.
pub fn run<W: Write>(statements: &[Stmt], out: W) -> Result<Scope> {
    Interpreter::new(out).run(statements)
}

pub struct Interpreter<W: Write> {
    /// Tables of the block currently executing
    scope: Scope,
    /// Sink for `print`
    out: W,
}

impl<W: Write> Interpreter<W> {
    pub fn new(out: W) -> Self {
        Self::with_scope(out, Scope::default())
    }

    /// Starts from inherited tables, as a nested block does.
    pub fn with_scope(out: W, scope: Scope) -> Self {
        Self { scope, out }
    }

    /// Runs `statements` and returns the final snapshot.
    pub fn run(mut self, statements: &[Stmt]) -> Result<Scope> {
        match self.exec_block(statements)? {
            Flow::Normal => {}
            Flow::Break | Flow::Continue => return Err(Error::new(ErrorKind::Semantic, BAD_STATEMENT)),
        }
        self.out
            .flush()
            .map_err(|e| Error::new(ErrorKind::Io, e.to_string()))?;
        debug!("run finished with {} variables", self.scope.symbols.len());
        Ok(self.scope)
    }

    fn exec_block(&mut self, body: &[Stmt]) -> Result<Flow> {
        for stmt in body {
            match self.exec_stmt(stmt)? {
                Flow::Normal => {}
                flow => return Ok(flow),
            }
        }
        Ok(Flow::Normal)
    }

    /// Runs `body` on a copy of the current tables, then merges back values of
    /// names that were already set before it ran.
    fn run_nested(&mut self, body: &[Stmt]) -> Result<Flow> {
        trace!("enter block ({} statements)", body.len());
        let parent = self.scope.clone();
        let flow = self.exec_block(body);
        let inner = mem::replace(&mut self.scope, parent);
        self.scope.merge_from(inner.values);
        trace!("leave block");
        flow
    }

    fn exec_stmt(&mut self, stmt: &Stmt) -> Result<Flow> {
        match &stmt.kind {
            StmtKind::Declare { ty, name, init } => {
                if self.scope.is_declared(name) {
                    return Err(Error::semantic(stmt.span, format!("Variable `{}` is already defined", name)));
                }
                self.scope.declare(name, *ty);
                if let Some(init) = init {
                    let v = self.eval(init)?;
                    self.scope.set(name, v);
                }
            }
            StmtKind::Assign { name, expr } => {
                if !self.scope.is_declared(name) {
                    return Err(undefined(stmt.span, name));
                }
                let v = self.eval(expr)?;
                self.scope.set(name, v);
            }
            StmtKind::Ident(name) => {
                if !self.scope.is_declared(name) {
                    return Err(undefined(stmt.span, name));
                }
            }
            StmtKind::Expr(expr) => {
                self.eval(expr)?;
            }
            StmtKind::Print(expr) => {
                let v = self.eval(expr)?;
                writeln!(self.out, "{}", v).map_err(|e| Error::with_span(ErrorKind::Io, e.to_string(), stmt.span.line, stmt.span.col))?;
            }
            StmtKind::Break => return Ok(Flow::Break),
            StmtKind::Continue => return Ok(Flow::Continue),
            StmtKind::Pass => {}
            StmtKind::If(chain) => return self.exec_if_chain(chain),
            StmtKind::Switch { scrutinee, arms } => {
                let v = self.eval(scrutinee)?;
                for arm in arms {
                    match arm {
                        SwitchArm::Case { label, body } => {
                            if v.loose_eq(&self.eval(label)?) {
                                return self.run_nested(slice::from_ref(body.as_ref()));
                            }
                        }
                        // Arms after a default are never reached.
                        SwitchArm::Default { body } => return self.run_nested(slice::from_ref(body.as_ref())),
                    }
                }
            }
            StmtKind::For { header, body } => self.exec_for(header, body)?,
            StmtKind::While { cond, body } => {
                while self.eval_bool(cond)? {
                    if self.run_nested(body)? == Flow::Break {
                        break;
                    }
                }
            }
            StmtKind::DoWhile { body, cond } => loop {
                if self.run_nested(body)? == Flow::Break || !self.eval_bool(cond)? {
                    break;
                }
            },
        }
        Ok(Flow::Normal)
    }

    fn exec_if_chain(&mut self, chain: &IfChain) -> Result<Flow> {
        let mut link = chain;
        loop {
            if self.eval_bool(&link.cond)? {
                return self.run_nested(&link.body);
            }
            match link.otherwise.as_deref() {
                Some(Otherwise::Elif(next)) => link = next,
                Some(Otherwise::Else(body)) => return self.run_nested(body),
                None => return Ok(Flow::Normal),
            }
        }
    }

    /// The init clause runs against empty tables; its variable then joins the
    /// current scope for the life of the loop.
    fn exec_for(&mut self, header: &LoopHeader, body: &[Stmt]) -> Result<()> {
        let saved = mem::take(&mut self.scope);
        let init = self.exec_stmt(&header.init);
        let loop_vars = mem::replace(&mut self.scope, saved);
        init?;
        self.scope.symbols.extend(loop_vars.symbols.clone());
        self.scope.values.extend(loop_vars.values);

        while self.eval_bool(&header.cond)? {
            if self.run_nested(body)? == Flow::Break {
                break;
            }
            self.eval(&header.step)?;
        }

        for name in loop_vars.symbols.keys() {
            self.scope.remove(name);
        }
        Ok(())
    }

    fn lookup(&self, name: &str, span: Span) -> Result<Value> {
        self.scope
            .get(name)
            .ok_or_else(|| Error::semantic(span, format!("variable `{}` is not defined", name)))
    }

    fn eval_bool(&mut self, expr: &Expr) -> Result<bool> {
        match self.eval(expr)? {
            Value::Bool(b) => Ok(b),
            _ => Err(Error::semantic(expr.span, NOT_BOOL)),
        }
    }

    fn eval(&mut self, expr: &Expr) -> Result<Value> {
        match &expr.kind {
            ExprKind::Literal(lit) => Ok(Value::from(lit)),
            ExprKind::Ident(name) => self.lookup(name, expr.span),
            ExprKind::Postfix { op, name } => {
                let old = self.lookup(name, expr.span)?;
                let new = match &old {
                    Value::Int(n) => n
                        .checked_add(op.delta())
                        .map(Value::Int)
                        .ok_or_else(|| Error::semantic(expr.span, "Integer overflow"))?,
                    Value::Double(d) => Value::Double(d + op.delta() as f64),
                    _ => return Err(Error::semantic(expr.span, BAD_EXPRESSION)),
                };
                self.scope.set(name, new);
                Ok(old)
            }
            ExprKind::Arith { op, lhs, rhs } => {
                let l = self.eval(lhs)?;
                let r = self.eval(rhs)?;
                Value::arith(*op, l, r).map_err(|msg| Error::semantic(expr.span, msg))
            }
            ExprKind::Compare { op, lhs, rhs } => {
                let l = self.eval(lhs)?;
                let r = self.eval(rhs)?;
                if *op == CompareOp::Eq {
                    return Ok(Value::Bool(l.loose_eq(&r)));
                }
                let ord = l.order(&r).map_err(|msg| Error::semantic(expr.span, msg))?;
                Ok(Value::Bool(ord.map_or(false, |o| match op {
                    CompareOp::Lt => o.is_lt(),
                    CompareOp::Gt => o.is_gt(),
                    CompareOp::Le => o.is_le(),
                    CompareOp::Ge => o.is_ge(),
                    CompareOp::Eq => o.is_eq(),
                })))
            }
            ExprKind::Logical { op, lhs, rhs } => {
                // Both sides always run.
                let l = self.eval(lhs)?;
                let r = self.eval(rhs)?;
                match (l, r) {
                    (Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(match op {
                        LogicalOp::And => a && b,
                        LogicalOp::Or => a || b,
                    })),
                    _ => Err(Error::semantic(expr.span, NOT_BOOL)),
                }
            }
            ExprKind::Ternary {
                cond,
                then_branch,
                else_branch,
            } => {
                if self.eval_bool(cond)? {
                    self.eval(then_branch)
                } else {
                    self.eval(else_branch)
                }
            }
        }
    }
}

fn undefined(span: Span, name: &str) -> Error {
    Error::semantic(span, format!("Undefined variable: `{}`", name))
}
