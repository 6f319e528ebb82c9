//! Centralised error hierarchy for the **scoping interpreter**.
//!
//! Every failure the runtime or the program loader can produce is one of the
//! variants defined here, so the whole crate shares a single `Result<T>` alias
//! and the binary can lift anything into `anyhow` with `?`.
//!
//! The module **does not** print diagnostics itself.

use std::io;
use thiserror::Error;

use log::info;

/// Canonical error type used throughout the interpreter.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ScopeError {
    /// No environment on the lookup chain binds the name.
    #[error("Undefined variable '{0}'.")]
    UnboundVariable(String),

    /// A `call` resolved to something that is not a function.
    #[error("'{0}' is not a function.")]
    NotAFunction(String),

    /// `print` was handed a function; the output sink only takes integers.
    #[error("Cannot print function '{0}'.")]
    NotAnInteger(String),

    /// Invocation depth went past the configured bound.
    #[error("Maximum call depth {limit} exceeded while calling '{name}'.")]
    RecursionLimitExceeded { name: String, limit: usize },

    /// Wrapper around `std::io::Error` (transparent).  Enables `?` on I/O ops.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Malformed program file.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ScopeError {
    /// Helper constructor for failed lookups.
    pub fn unbound<S: Into<String>>(name: S) -> Self {
        let name: String = name.into();

        info!("Creating UnboundVariable error: name={}", name);

        ScopeError::UnboundVariable(name)
    }

    /// Helper constructor for calls on non-function bindings.
    pub fn not_a_function<S: Into<String>>(name: S) -> Self {
        let name: String = name.into();

        info!("Creating NotAFunction error: name={}", name);

        ScopeError::NotAFunction(name)
    }

    /// Helper constructor for `print` of a function value.
    pub fn not_an_integer<S: Into<String>>(name: S) -> Self {
        let name: String = name.into();

        info!("Creating NotAnInteger error: name={}", name);

        ScopeError::NotAnInteger(name)
    }

    /// Helper constructor for the invocation depth guard.
    pub fn recursion_limit<S: Into<String>>(name: S, limit: usize) -> Self {
        let name: String = name.into();

        info!(
            "Creating RecursionLimitExceeded error: name={}, limit={}",
            name, limit
        );

        ScopeError::RecursionLimitExceeded { name, limit }
    }

    /// `true` for failures raised while evaluating a program, as opposed to
    /// failures loading one.
    pub fn is_runtime(&self) -> bool {
        !matches!(self, ScopeError::Io(_) | ScopeError::Json(_))
    }
}

/// Crate‑wide `Result` alias.
pub type Result<T> = std::result::Result<T, ScopeError>;
