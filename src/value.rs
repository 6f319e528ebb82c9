use std::fmt;
use std::rc::Rc;

use crate::function::Function;

/// A runtime value. Cloning a `Function` value shares the same `Function`.
#[derive(Debug, Clone)]
pub enum Value {
    Integer(i64),
    Function(Rc<Function>),
}

impl Value {
    pub fn as_function(&self) -> Option<&Rc<Function>> {
        match self {
            Value::Function(function) => Some(function),
            Value::Integer(_) => None,
        }
    }
}

/// The result of an empty body.
impl Default for Value {
    fn default() -> Self {
        Value::Integer(0)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            // Identity, not structure: two `def f` runs give two functions.
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),

            Value::Function(function) => write!(f, "<fn {}>", function.name()),
        }
    }
}
