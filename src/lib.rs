pub mod environment;
pub mod error;
pub mod expr;
pub mod function;
pub mod interpreter;
pub mod output;
pub mod printer;
pub mod program;
pub mod stmt;
pub mod value;
