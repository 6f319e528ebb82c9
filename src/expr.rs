use serde::{Deserialize, Serialize};

/// In a program file an integer is a literal and a string is a variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Expr {
    // Integer literal, evaluated without touching the environment
    Literal(i64),

    // Variable reference, resolved along the environment chain
    Variable(String),
}

impl Expr {
    pub fn variable<S: Into<String>>(name: S) -> Self {
        Expr::Variable(name.into())
    }
}
