use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::environment::Environment;
use crate::stmt::Stmt;

/// A user function created by running a `def` statement.
///
/// `closure` is the environment the `def` ran in. It is held by reference, so
/// bindings added to that environment after the definition are still seen.
pub struct Function {
    name: String,
    body: Vec<Stmt>,
    closure: Rc<RefCell<Environment>>,
}

impl Function {
    pub fn new(name: &str, body: &[Stmt], closure: Rc<RefCell<Environment>>) -> Self {
        Function {
            name: name.to_string(),
            body: body.to_vec(),
            closure,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn body(&self) -> &[Stmt] {
        &self.body
    }

    pub fn closure(&self) -> &Rc<RefCell<Environment>> {
        &self.closure
    }
}

// The closure usually binds this very function, so it is left out.
impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}
