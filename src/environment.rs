use crate::error::{Result, ScopeError};
use crate::function::Function;
use crate::value::Value;
use log::debug;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// One scope: local bindings plus an optional link to the enclosing scope.
#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    enclosing: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: None,
        }
    }

    pub fn with_enclosing(enclosing: Rc<RefCell<Environment>>) -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: Some(enclosing),
        }
    }

    pub fn enclosing(&self) -> Option<&Rc<RefCell<Environment>>> {
        self.enclosing.as_ref()
    }

    /// Binds `name` in this scope only. Never writes through to an enclosing
    /// scope, so an outer binding of the same name is shadowed from here down.
    pub fn set(&mut self, name: &str, value: Value) {
        debug!("Binding '{}' = {}", name, value);
        self.values.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Result<Value> {
        if let Some(value) = self.values.get(name) {
            Ok(value.clone())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow().get(name)
        } else {
            Err(ScopeError::unbound(name))
        }
    }

    /// Functions bound in this scope, one entry per binding.
    pub fn functions(&self) -> impl Iterator<Item = &Rc<Function>> {
        self.values.values().filter_map(Value::as_function)
    }

    pub fn contains_local(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Drops every local binding. The enclosing link is kept.
    pub fn clear(&mut self) {
        self.values.clear();
    }
}
