use serde::{Deserialize, Serialize};

use crate::expr::Expr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stmt {
    Assign(String, Expr), // name, value

    Print(Expr),

    Call(String), // function name

    Def(String, Vec<Stmt>), // name, body
}

impl Stmt {
    pub fn assign<S: Into<String>>(name: S, expr: Expr) -> Self {
        Stmt::Assign(name.into(), expr)
    }

    pub fn print(expr: Expr) -> Self {
        Stmt::Print(expr)
    }

    pub fn call<S: Into<String>>(name: S) -> Self {
        Stmt::Call(name.into())
    }

    pub fn def<S: Into<String>>(name: S, body: Vec<Stmt>) -> Self {
        Stmt::Def(name.into(), body)
    }
}
