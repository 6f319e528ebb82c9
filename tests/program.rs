#[cfg(test)]
mod program_tests {
    use std::path::PathBuf;

    use scoping_interpreter as scoping;

    use scoping::error::ScopeError;
    use scoping::expr::Expr;
    use scoping::interpreter::{Interpreter, ScopingMode};
    use scoping::program::Program;
    use scoping::stmt::Stmt;

    fn demo(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("demos")
            .join(name)
    }

    fn output_of(program: &Program, mode: ScopingMode) -> Vec<i64> {
        let sink: Vec<i64> = Vec::new();
        program.run(mode, sink).unwrap().output().clone()
    }

    #[test]
    fn example_prints_ten_then_twenty() {
        let program = Program::example();

        assert_eq!(output_of(&program, ScopingMode::Static), vec![10]);
        assert_eq!(output_of(&program, ScopingMode::Dynamic), vec![20]);
    }

    #[test]
    fn example_file_matches_builtin() {
        let program = Program::load(demo("scoping.json")).unwrap();

        assert_eq!(program, Program::example());
    }

    #[test]
    fn nested_demo_diverges_by_mode() {
        let program = Program::load(demo("nested.json")).unwrap();

        assert_eq!(output_of(&program, ScopingMode::Static), vec![1, 1, 1]);
        assert_eq!(output_of(&program, ScopingMode::Dynamic), vec![3, 2, 1]);
    }

    #[test]
    fn json_expressions_are_untagged() {
        let program =
            Program::from_json(r#"{"statements": [{"assign": ["a", 3]}, {"print": "a"}]}"#)
                .unwrap();

        assert_eq!(
            program.statements,
            vec![
                Stmt::assign("a", Expr::Literal(3)),
                Stmt::print(Expr::variable("a")),
            ]
        );
        assert!(program.calls.is_empty());
    }

    #[test]
    fn json_survives_a_write_and_read() {
        let program = Program::example();

        let json = program.to_json().unwrap();

        assert!(json.contains("\"def\""));
        assert_eq!(Program::from_json(&json).unwrap(), program);
    }

    #[test]
    fn malformed_json_is_a_load_error() {
        let err = Program::from_json(r#"{"statements": [{"loop": []}]}"#).unwrap_err();

        assert!(matches!(err, ScopeError::Json(_)));
        assert!(!err.is_runtime());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Program::load(demo("does-not-exist.json")).unwrap_err();

        assert!(matches!(err, ScopeError::Io(_)));
    }

    #[test]
    fn each_run_gets_its_own_globals() {
        let program = Program::example();
        let first: Vec<i64> = Vec::new();
        let second: Vec<i64> = Vec::new();

        let a = program.run(ScopingMode::Static, first).unwrap();
        let b = program.run(ScopingMode::Static, second).unwrap();

        assert!(!std::rc::Rc::ptr_eq(a.globals(), b.globals()));
        assert_eq!(a.output(), b.output());
    }

    #[test]
    fn failing_run_does_not_affect_another() {
        let broken = Program::new(
            vec![Stmt::print(Expr::variable("undefined"))],
            Vec::new(),
        );
        let sink: Vec<i64> = Vec::new();

        assert!(broken.run(ScopingMode::Dynamic, sink).is_err());
        assert_eq!(output_of(&Program::example(), ScopingMode::Dynamic), vec![20]);
    }

    #[test]
    fn calls_run_after_statements() {
        let program = Program::new(
            vec![
                Stmt::def("f", vec![Stmt::print(Expr::variable("x"))]),
                Stmt::assign("x", Expr::Literal(4)),
            ],
            vec!["f".to_string(), "f".to_string()],
        );

        assert_eq!(output_of(&program, ScopingMode::Static), vec![4, 4]);
    }

    #[test]
    fn run_with_honours_interpreter_config() {
        let program = Program::new(
            vec![Stmt::def("f", vec![Stmt::call("f")])],
            vec!["f".to_string()],
        );
        let sink: Vec<i64> = Vec::new();
        let interpreter = Interpreter::with_output(ScopingMode::Static, sink).with_max_depth(8);

        let err = program.run_with(interpreter).unwrap_err();

        assert!(matches!(
            err,
            ScopeError::RecursionLimitExceeded { limit: 8, .. }
        ));
    }
}
