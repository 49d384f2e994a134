use std::fmt;

use super::env::Environment;

/// A function value: the name of a top-level function together with the
/// environment it was captured in.
#[derive(Debug, Clone)]
pub struct Closure {
    pub function: String,
    pub env: Environment,
}

/// Runtime value representation
#[derive(Debug, Clone)]
pub enum Value {
    Int(i64),
    String(String),
    Bool(bool),
    Unit,
    Closure(Closure),
}

impl Value {
    pub fn closure(function: impl Into<String>, env: Environment) -> Self {
        Value::Closure(Closure {
            function: function.into(),
            env,
        })
    }

    /// Structural equality on first-order values. Functions (and values of
    /// different shapes, which a checked program never compares) have no
    /// answer.
    pub fn equals(&self, other: &Value) -> Option<bool> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Some(a == b),
            (Value::String(a), Value::String(b)) => Some(a == b),
            (Value::Bool(a), Value::Bool(b)) => Some(a == b),
            (Value::Unit, Value::Unit) => Some(true),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Value::Int(_) => "Int",
            Value::String(_) => "String",
            Value::Bool(_) => "Bool",
            Value::Unit => "()",
            Value::Closure(_) => "function",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Closure(a), Value::Closure(b)) => a.function == b.function,
            _ => self.equals(other).unwrap_or(false),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Unit => write!(f, "()"),
            Value::Closure(closure) => write!(f, "<function {}>", closure.function),
        }
    }
}
