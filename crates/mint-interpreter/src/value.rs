//! Runtime values and the operators defined over them.

use std::cmp::Ordering;
use std::fmt;

use mint_syntax::ast::{ArithOp, Literal};
use serde::Serialize;

pub(crate) const BAD_EXPRESSION: &str = "Error while evaluating expression";

/// Longest string `str * int` may produce, in bytes.
const MAX_REPEAT_LEN: usize = 1 << 30;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// A 64-bit signed integer value
    Int(i64),
    /// A 64-bit floating point value
    Double(f64),
    /// A UTF-8 encoded string value
    Str(String),
    /// A boolean value (true or false)
    Bool(bool),
    /// What a declared but never assigned variable reads as
    Null,
}

impl From<&Literal> for Value {
    fn from(lit: &Literal) -> Self {
        match lit {
            Literal::Int(n) => Value::Int(*n),
            Literal::Double(d) => Value::Double(*d),
            Literal::Str(s) => Value::Str(s.clone()),
            Literal::Bool(b) => Value::Bool(*b),
        }
    }
}

impl Value {
    fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Double(d) => Some(*d),
            _ => None,
        }
    }

    /// Equality as `==` and `switch` see it: numbers compare by value
    /// regardless of representation.
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            },
        }
    }

    /// Ordering for `< > <= >=`. `Ok(None)` means unordered (NaN).
    pub fn order(&self, other: &Value) -> Result<Option<Ordering>, &'static str> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Ok(Some(a.cmp(b))),
            (Value::Str(a), Value::Str(b)) => Ok(Some(a.cmp(b))),
            (Value::Bool(a), Value::Bool(b)) => Ok(Some(a.cmp(b))),
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => Ok(x.partial_cmp(&y)),
                _ => Err(BAD_EXPRESSION),
            },
        }
    }

    /// Applies `+ - * /`. Division is always real division.
    pub fn arith(op: ArithOp, lhs: Value, rhs: Value) -> Result<Value, &'static str> {
        match (op, lhs, rhs) {
            (ArithOp::Div, Value::Int(_), Value::Int(0)) => Err("Division by zero"),
            (ArithOp::Div, Value::Int(a), Value::Int(b)) => Ok(Value::Double(a as f64 / b as f64)),
            (op, Value::Int(a), Value::Int(b)) => {
                let out = match op {
                    ArithOp::Add => a.checked_add(b),
                    ArithOp::Sub => a.checked_sub(b),
                    _ => a.checked_mul(b),
                };
                out.map(Value::Int).ok_or("Integer overflow")
            }
            (ArithOp::Add, Value::Str(a), Value::Str(b)) => Ok(Value::Str(a + &b)),
            (ArithOp::Mul, Value::Str(s), Value::Int(n)) | (ArithOp::Mul, Value::Int(n), Value::Str(s)) => {
                let count = usize::try_from(n).unwrap_or(0);
                match s.len().checked_mul(count) {
                    Some(len) if len <= MAX_REPEAT_LEN => Ok(Value::Str(s.repeat(count))),
                    _ => Err("String repetition too large"),
                }
            }
            (op, a, b) => {
                let (x, y) = match (a.as_f64(), b.as_f64()) {
                    (Some(x), Some(y)) => (x, y),
                    _ => return Err(BAD_EXPRESSION),
                };
                Ok(Value::Double(match op {
                    ArithOp::Add => x + y,
                    ArithOp::Sub => x - y,
                    ArithOp::Mul => x * y,
                    ArithOp::Div if y == 0.0 => return Err("Division by zero"),
                    ArithOp::Div => x / y,
                }))
            }
        }
    }
}

/// Shortest round-trip form, always with a fractional part or exponent:
/// `2.0`, `3.5`, `1e+16`, `1.5e-05`.
pub fn format_double(d: f64) -> String {
    if d.is_nan() {
        return "nan".to_string();
    }
    if d.is_infinite() {
        return if d > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let abs = d.abs();
    if abs != 0.0 && !(1e-4..1e16).contains(&abs) {
        let sci = format!("{:e}", d);
        let (mantissa, exp) = sci.split_once('e').unwrap_or((&sci, "0"));
        let exp: i32 = exp.parse().unwrap_or(0);
        let sign = if exp < 0 { '-' } else { '+' };
        return format!("{}e{}{:02}", mantissa, sign, exp.abs());
    }
    let s = d.to_string();
    if s.contains('.') {
        s
    } else {
        format!("{}.0", s)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Double(d) => f.write_str(&format_double(*d)),
            Value::Str(s) => write!(f, "{}", s),
            Value::Bool(b) => write!(f, "{}", if *b { "true" } else { "false" }),
            Value::Null => f.write_str("null"),
        }
    }
}
