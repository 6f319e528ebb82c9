#[cfg(test)]
mod environment_tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use scoping_interpreter as scoping;

    use scoping::environment::Environment;
    use scoping::error::ScopeError;
    use scoping::value::Value;

    fn chain() -> (Rc<RefCell<Environment>>, Environment) {
        let root = Rc::new(RefCell::new(Environment::new()));
        root.borrow_mut().set("x", Value::Integer(10));
        root.borrow_mut().set("y", Value::Integer(1));
        let child = Environment::with_enclosing(Rc::clone(&root));
        (root, child)
    }

    #[test]
    fn local_binding_shadows_enclosing() {
        let (root, mut child) = chain();

        child.set("x", Value::Integer(20));

        assert_eq!(child.get("x").unwrap(), Value::Integer(20));
        assert_eq!(root.borrow().get("x").unwrap(), Value::Integer(10));
    }

    #[test]
    fn set_overwrites_locally() {
        let mut env = Environment::new();

        env.set("a", Value::Integer(1));
        env.set("a", Value::Integer(2));

        assert_eq!(env.get("a").unwrap(), Value::Integer(2));
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn miss_delegates_to_enclosing() {
        let (_root, child) = chain();

        assert!(!child.contains_local("y"));
        assert_eq!(child.get("y").unwrap(), Value::Integer(1));
    }

    #[test]
    fn delegation_walks_the_whole_chain() {
        let (root, child) = chain();
        let middle = Rc::new(RefCell::new(child));
        let leaf = Environment::with_enclosing(Rc::clone(&middle));

        assert_eq!(leaf.get("x").unwrap(), Value::Integer(10));

        // Bindings added upstream later are visible through the reference.
        root.borrow_mut().set("z", Value::Integer(5));
        assert_eq!(leaf.get("z").unwrap(), Value::Integer(5));
    }

    #[test]
    fn set_never_writes_through() {
        let (root, mut child) = chain();

        child.set("y", Value::Integer(99));

        assert_eq!(root.borrow().get("y").unwrap(), Value::Integer(1));
        assert!(child.contains_local("y"));
    }

    #[test]
    fn unbound_at_root_fails() {
        let (_root, child) = chain();

        match child.get("missing") {
            Err(ScopeError::UnboundVariable(name)) => assert_eq!(name, "missing"),
            other => panic!("expected UnboundVariable, got {:?}", other),
        }
    }

    #[test]
    fn clear_keeps_enclosing_link() {
        let (_root, mut child) = chain();
        child.set("local", Value::Integer(3));

        child.clear();

        assert!(child.is_empty());
        assert!(child.enclosing().is_some());
        assert_eq!(child.get("x").unwrap(), Value::Integer(10));
    }
}
