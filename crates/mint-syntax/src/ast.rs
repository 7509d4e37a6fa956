//! AST (abstract syntax tree) types for the Mint language.
//!
//! One variant per statement or expression form; every node carries the
//! [`Span`] of the token it was built from so the semantic analyzer and the
//! interpreter can report diagnostics at the right place.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::token::Span;

/// The four static types of Mint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Type {
    Int,
    Double,
    Str,
    Bool,
}

impl Type {
    /// Parses a data-type keyword.
    pub fn from_keyword(word: &str) -> Option<Type> {
        match word {
            "int" => Some(Type::Int),
            "double" => Some(Type::Double),
            "str" => Some(Type::Str),
            "bool" => Some(Type::Bool),
            _ => None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Type::Int => "int",
            Type::Double => "double",
            Type::Str => "str",
            Type::Bool => "bool",
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Identifier → declared type, ordered so snapshots are deterministic.
pub type SymbolTable = BTreeMap<String, Type>;

/// A literal value as written in source.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Literal {
    Int(i64),
    Double(f64),
    Str(String),
    Bool(bool),
}

impl Literal {
    pub fn ty(&self) -> Type {
        match self {
            Literal::Int(_) => Type::Int,
            Literal::Double(_) => Type::Double,
            Literal::Str(_) => Type::Str,
            Literal::Bool(_) => Type::Bool,
        }
    }
}

/// `+ - * /`, all sharing one precedence level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl ArithOp {
    pub fn symbol(self) -> &'static str {
        match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
        }
    }
}

/// `< > <= >= ==`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CompareOp {
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
}

impl CompareOp {
    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::Lt => "<",
            CompareOp::Gt => ">",
            CompareOp::Le => "<=",
            CompareOp::Ge => ">=",
            CompareOp::Eq => "==",
        }
    }
}

/// `&& ||`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LogicalOp {
    And,
    Or,
}

impl LogicalOp {
    pub fn symbol(self) -> &'static str {
        match self {
            LogicalOp::And => "&&",
            LogicalOp::Or => "||",
        }
    }
}

/// Postfix `++` / `--`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StepOp {
    Incr,
    Decr,
}

impl StepOp {
    pub fn symbol(self) -> &'static str {
        match self {
            StepOp::Incr => "++",
            StepOp::Decr => "--",
        }
    }

    pub fn delta(self) -> i64 {
        match self {
            StepOp::Incr => 1,
            StepOp::Decr => -1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

/// Expressions (literals, names and operator applications).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ExprKind {
    Literal(Literal),
    Ident(String),
    Arith {
        op: ArithOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Compare {
        op: CompareOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Logical {
        op: LogicalOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Ternary {
        cond: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    /// `name++` / `name--`: yields the old value, then steps the variable
    Postfix { op: StepOp, name: String },
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

/// Statements (declarations, assignments, control flow, output).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum StmtKind {
    Declare {
        ty: Type,
        name: String,
        init: Option<Expr>,
    },
    Assign {
        name: String,
        expr: Expr,
    },
    /// A lone identifier; only checks that the name is declared
    Ident(String),
    Expr(Expr),
    Print(Expr),
    Break,
    Continue,
    Pass,
    If(IfChain),
    Switch {
        scrutinee: Expr,
        arms: Vec<SwitchArm>,
    },
    For {
        header: LoopHeader,
        body: Vec<Stmt>,
    },
    While {
        cond: Expr,
        body: Vec<Stmt>,
    },
    DoWhile {
        body: Vec<Stmt>,
        cond: Expr,
    },
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// True for statements whose source form ends with a closing brace or
    /// supplies its own `;`, so no separate terminator follows them.
    pub fn is_self_terminated(&self) -> bool {
        matches!(
            self.kind,
            StmtKind::If(_)
                | StmtKind::Switch { .. }
                | StmtKind::For { .. }
                | StmtKind::While { .. }
                | StmtKind::DoWhile { .. }
        )
    }
}

/// `if (cond) { body }` followed by an optional `elif`/`else` continuation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IfChain {
    pub cond: Expr,
    pub body: Vec<Stmt>,
    pub otherwise: Option<Box<Otherwise>>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Otherwise {
    Elif(IfChain),
    Else(Vec<Stmt>),
}

/// One arm of a `switch`, kept in source order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SwitchArm {
    Case { label: Expr, body: Box<Stmt> },
    Default { body: Box<Stmt> },
}

/// The three clauses between the parentheses of a `for` loop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoopHeader {
    /// Always a [`StmtKind::Declare`]
    pub init: Box<Stmt>,
    pub cond: Expr,
    pub step: Expr,
}

/// Entire program: top-level statements in source order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    pub statements: Vec<Stmt>,
}
