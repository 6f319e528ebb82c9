//! Programs handed to the interpreter, either built in or loaded from JSON.
//!
//! A program file looks like
//!
//! ```json
//! {
//!   "statements": [
//!     { "assign": ["x", 10] },
//!     { "def": ["f", [{ "print": "x" }]] },
//!     { "def": ["g", [{ "assign": ["x", 20] }, { "call": "f" }]] }
//!   ],
//!   "calls": ["g"]
//! }
//! ```
//!
//! In an expression position a JSON integer is a literal and a JSON string is
//! a variable reference.

use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::expr::Expr;
use crate::interpreter::{Interpreter, ScopingMode};
use crate::output::Output;
use crate::stmt::Stmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    /// Executed in order against the root environment.
    pub statements: Vec<Stmt>,

    /// Functions called from the root environment once `statements` is done.
    #[serde(default)]
    pub calls: Vec<String>,
}

impl Program {
    pub fn new(statements: Vec<Stmt>, calls: Vec<String>) -> Self {
        Program { statements, calls }
    }

    /// ```text
    /// x = 10
    /// def f():
    ///     print(x)
    /// def g():
    ///     x = 20
    ///     f()
    /// g()
    /// ```
    pub fn example() -> Self {
        Program {
            statements: vec![
                Stmt::assign("x", Expr::Literal(10)),
                Stmt::def("f", vec![Stmt::print(Expr::variable("x"))]),
                Stmt::def("g", vec![Stmt::assign("x", Expr::Literal(20)), Stmt::call("f")]),
            ],
            calls: vec!["g".to_string()],
        }
    }

    pub fn from_json(source: &str) -> Result<Self> {
        let program: Program = serde_json::from_str(source)?;
        debug!(
            "Decoded program with {} statements and {} calls",
            program.statements.len(),
            program.calls.len()
        );
        Ok(program)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading program from {:?}", path);
        let source = fs::read_to_string(path)?;
        Program::from_json(&source)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Runs the program on a fresh interpreter. The interpreter is returned
    /// on success so its output and globals can be inspected.
    pub fn run<O: Output>(&self, mode: ScopingMode, output: O) -> Result<Interpreter<O>> {
        self.run_with(Interpreter::with_output(mode, output))
    }

    /// Like [`Program::run`], on an interpreter the caller configured.
    pub fn run_with<O: Output>(&self, mut interpreter: Interpreter<O>) -> Result<Interpreter<O>> {
        info!("Running program in {} scoping mode", interpreter.mode());
        interpreter.interpret(&self.statements)?;
        for name in &self.calls {
            interpreter.call(name)?;
        }
        info!("Program finished in {} scoping mode", interpreter.mode());
        Ok(interpreter)
    }
}
