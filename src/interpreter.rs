use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use log::{debug, info};

use crate::environment::Environment;
use crate::error::{Result, ScopeError};
use crate::expr::Expr;
use crate::function::Function;
use crate::output::{Output, Stdout};
use crate::stmt::Stmt;
use crate::value::Value;

/// Invocation depth allowed before a call fails instead of blowing the stack.
pub const DEFAULT_MAX_DEPTH: usize = 200;

/// Which environment a called function's body is evaluated under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopingMode {
    /// Free variables resolve where the function was defined.
    Static,
    /// Free variables resolve where the function was called from.
    Dynamic,
}

impl ScopingMode {
    pub fn title(&self) -> &'static str {
        match self {
            ScopingMode::Static => "Static",
            ScopingMode::Dynamic => "Dynamic",
        }
    }
}

impl fmt::Display for ScopingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopingMode::Static => write!(f, "static"),
            ScopingMode::Dynamic => write!(f, "dynamic"),
        }
    }
}

/// One run of a program under a fixed scoping mode.
///
/// The interpreter owns the root environment. A call frame in which a `def`
/// ran is kept alive by the functions bound in it. When nothing outside the
/// frame still refers to it or to those functions, the frame is cleared:
/// at the end of the call, or at the next top-level `interpret`/`call` if a
/// function value escaped and was dropped since. Whatever is left is cleared
/// when the interpreter is dropped.
pub struct Interpreter<O: Output = Stdout> {
    mode: ScopingMode,
    globals: Rc<RefCell<Environment>>,
    output: O,
    depth: usize,
    max_depth: usize,
    escaped: Vec<Weak<RefCell<Environment>>>,
}

impl Interpreter<Stdout> {
    /// Creates an interpreter that prints to standard output.
    pub fn new(mode: ScopingMode) -> Self {
        Interpreter::with_output(mode, Stdout)
    }
}

impl<O: Output> Interpreter<O> {
    pub fn with_output(mode: ScopingMode, output: O) -> Self {
        info!("Initializing Interpreter in {} scoping mode", mode);

        Interpreter {
            mode,
            globals: Rc::new(RefCell::new(Environment::new())),
            output,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
            escaped: Vec::new(),
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        debug!("Setting maximum call depth to {}", max_depth);
        self.max_depth = max_depth;
        self
    }

    pub fn mode(&self) -> ScopingMode {
        self.mode
    }

    pub fn globals(&self) -> &Rc<RefCell<Environment>> {
        &self.globals
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    /// Number of call frames that outlived their call and are still alive.
    pub fn live_frames(&self) -> usize {
        self.escaped.iter().filter(|weak| weak.strong_count() > 0).count()
    }

    /// Runs `statements` against the root environment and returns the value
    /// of the last one.
    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<Value> {
        debug!("Interpreting {} statements", statements.len());
        self.collect_frames();
        let globals = Rc::clone(&self.globals);
        let value = self.execute_block(statements, &globals)?;
        info!("Interpretation completed successfully");
        Ok(value)
    }

    /// Calls a function bound in the root environment, as a top-level `call`.
    pub fn call(&mut self, name: &str) -> Result<Value> {
        debug!("Top-level call of '{}'", name);
        self.collect_frames();
        let globals = Rc::clone(&self.globals);
        self.execute(&Stmt::Call(name.to_string()), &globals)
    }

    /// Executes `statements` in order in `env`. The result is the value of the
    /// last statement executed, or `Value::default()` when there are none.
    pub fn execute_block(
        &mut self,
        statements: &[Stmt],
        env: &Rc<RefCell<Environment>>,
    ) -> Result<Value> {
        let mut last = Value::default();
        for stmt in statements {
            last = self.execute(stmt, env)?;
        }
        Ok(last)
    }

    /// Executes a single statement.
    pub fn execute(&mut self, stmt: &Stmt, env: &Rc<RefCell<Environment>>) -> Result<Value> {
        debug!("Executing statement: {:?}", stmt);
        match stmt {
            Stmt::Assign(name, expr) => {
                let value = self.evaluate(expr, env)?;
                env.borrow_mut().set(name, value.clone());
                info!("Assigned value {} to '{}'", value, name);
                Ok(value)
            }

            Stmt::Print(expr) => {
                let value = self.evaluate(expr, env)?;
                match &value {
                    Value::Integer(n) => self.output.emit(*n),
                    Value::Function(function) => {
                        let name = match expr {
                            Expr::Variable(name) => name.as_str(),
                            Expr::Literal(_) => function.name(),
                        };
                        debug!("Error: cannot print function bound to '{}'", name);
                        return Err(ScopeError::not_an_integer(name));
                    }
                }
                info!("Printed value: {}", value);
                Ok(value)
            }

            Stmt::Call(name) => {
                let callee = env.borrow().get(name)?;
                let Value::Function(function) = callee else {
                    return Err(ScopeError::not_a_function(name.as_str()));
                };
                self.invoke(&function, env)
            }

            Stmt::Def(name, body) => {
                debug!("Defining function '{}'", name);
                let function = Rc::new(Function::new(name, body, Rc::clone(env)));
                let value = Value::Function(function);
                env.borrow_mut().set(name, value.clone());
                info!(
                    "Function '{}' defined with {} statements",
                    name,
                    body.len()
                );
                Ok(value)
            }
        }
    }

    /// Evaluates an expression and returns a Value.
    pub fn evaluate(&self, expr: &Expr, env: &Rc<RefCell<Environment>>) -> Result<Value> {
        let value = match expr {
            Expr::Literal(n) => Value::Integer(*n),

            Expr::Variable(name) => {
                debug!("Looking up variable '{}'", name);
                env.borrow().get(name)?
            }
        };
        debug!("Expression evaluated to: {}", value);
        Ok(value)
    }

    /// Runs `function`'s body in a fresh frame.
    ///
    /// The frame's parent is the function's closure under static scoping and
    /// `call_site` under dynamic scoping. Nothing else about a call differs
    /// between the two modes.
    pub fn invoke(
        &mut self,
        function: &Rc<Function>,
        call_site: &Rc<RefCell<Environment>>,
    ) -> Result<Value> {
        if self.depth >= self.max_depth {
            debug!(
                "Error: call depth {} reached calling '{}'",
                self.depth,
                function.name()
            );
            return Err(ScopeError::recursion_limit(function.name(), self.max_depth));
        }

        let parent = match self.mode {
            ScopingMode::Static => Rc::clone(function.closure()),
            ScopingMode::Dynamic => Rc::clone(call_site),
        };
        let frame = Rc::new(RefCell::new(Environment::with_enclosing(parent)));

        debug!(
            "Calling '{}' at depth {} ({} scoping)",
            function.name(),
            self.depth,
            self.mode
        );
        self.depth += 1;
        let result = self.execute_block(function.body(), &frame);
        self.depth -= 1;

        if release_if_unreachable(&frame) {
            debug!("Released frame of '{}'", function.name());
        } else {
            debug!("Frame of '{}' outlives the call", function.name());
            self.track(&frame);
        }

        match &result {
            Ok(value) => info!("Function '{}' returned: {}", function.name(), value),
            Err(e) => debug!("Function '{}' failed: {}", function.name(), e),
        }
        result
    }

    /// Drops frames that died and clears frames nothing can reach anymore.
    pub fn collect_frames(&mut self) {
        let before = self.escaped.len();
        self.escaped.retain(|weak| match weak.upgrade() {
            Some(frame) => !release_if_unreachable(&frame),
            None => false,
        });
        if self.escaped.len() != before {
            debug!(
                "Collected {} frames, {} still tracked",
                before - self.escaped.len(),
                self.escaped.len()
            );
        }
    }

    // Each frame is tracked once, when its call returns. Sweeping only when
    // the buffer is full keeps pushes amortised O(1).
    fn track(&mut self, frame: &Rc<RefCell<Environment>>) {
        if self.escaped.len() == self.escaped.capacity() {
            self.collect_frames();
        }
        self.escaped.push(Rc::downgrade(frame));
    }
}

/// Clears `env` when the only references to it are held by functions bound in
/// `env` itself, and those functions are referenced from nowhere else. Such an
/// environment plus its functions form a cycle no program or host can reach.
fn release_if_unreachable(env: &Rc<RefCell<Environment>>) -> bool {
    let unreachable = {
        let Ok(scope) = env.try_borrow() else {
            return false;
        };

        // Distinct functions closing over `env`, with their binding counts.
        let mut own: Vec<(&Rc<Function>, usize)> = Vec::new();
        for function in scope.functions() {
            if !Rc::ptr_eq(function.closure(), env) {
                continue;
            }
            match own.iter_mut().find(|(f, _)| Rc::ptr_eq(f, function)) {
                Some((_, bindings)) => *bindings += 1,
                None => own.push((function, 1)),
            }
        }

        // One reference is the caller's handle.
        Rc::strong_count(env) == 1 + own.len()
            && own
                .iter()
                .all(|(function, bindings)| Rc::strong_count(function) == *bindings)
    };

    if unreachable {
        if let Ok(mut scope) = env.try_borrow_mut() {
            scope.clear();
        }
    }
    unreachable
}

impl<O: Output> fmt::Debug for Interpreter<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interpreter")
            .field("mode", &self.mode)
            .field("depth", &self.depth)
            .field("max_depth", &self.max_depth)
            .finish_non_exhaustive()
    }
}

// Functions hold their defining environment while that environment binds
// them, so the cycle is broken here at the end of the run.
impl<O: Output> Drop for Interpreter<O> {
    fn drop(&mut self) {
        debug!("Releasing globals and {} tracked frames", self.escaped.len());
        if let Ok(mut globals) = self.globals.try_borrow_mut() {
            globals.clear();
        }
        for weak in self.escaped.drain(..) {
            let Some(env) = weak.upgrade() else {
                continue;
            };
            let Ok(mut scope) = env.try_borrow_mut() else {
                continue;
            };
            scope.clear();
        }
    }
}
