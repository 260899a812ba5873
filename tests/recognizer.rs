#[cfg(test)]
mod integration_tests {
    use formrec::{
        build_grammar, parse_grammar, recognize_context_free, recognize_regular, Acceptance,
        ContextFreeRecognizer, Grammar, GrammarError, GrammarForm, Production, RegularOptions,
        RegularRecognizer, Symbol,
    };

    const CNF_EXAMPLE: &str = r#"
%terminals a b
%nonterminals A B C
%start S

S -> A B | B C
B -> C C
C -> A B
A -> B A
B -> b
C -> a
A -> a
"#;

    const REGULAR_EXAMPLE: &str = r#"
%terminals a b
%nonterminals A B
%start A

A -> a
B -> b A
A -> a B
"#;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn cnf() -> Grammar {
        parse_grammar(CNF_EXAMPLE, GrammarForm::ChomskyNormal).expect("invalid grammar")
    }

    fn regular() -> Grammar {
        parse_grammar(REGULAR_EXAMPLE, GrammarForm::RightLinear).expect("invalid grammar")
    }

    #[test]
    fn context_free_example() {
        init_logging();
        let g = cnf();
        assert!(recognize_context_free(&g, "baababaab"));
        assert!(recognize_context_free(&g, "ab"));
        assert!(!recognize_context_free(&g, "aab"));
        assert!(!recognize_context_free(&g, ""));
    }

    #[test]
    fn context_free_table_is_exposed() {
        init_logging();
        let g = cnf();
        let recognition = ContextFreeRecognizer::new(&g)
            .unwrap()
            .parse_table("baababaab");
        assert!(recognition.accepted);
        assert_eq!(recognition.table.len(), 9);
        assert!(recognition.table.derives(0, 8, "S"));
        assert_eq!(recognition.table.to_string().lines().count(), 9);
    }

    #[test]
    fn out_of_alphabet_is_false() {
        init_logging();
        assert!(!recognize_context_free(&cnf(), "abc"));
        assert!(!recognize_regular(&regular(), "abc"));
    }

    #[test]
    fn regular_example() {
        init_logging();
        let g = regular();
        assert!(recognize_regular(&g, "ababababa"));
        assert!(!recognize_regular(&g, ""));
        assert!(!recognize_regular(&g, "abab"));
    }

    #[test]
    fn regular_start_symbol_option() {
        init_logging();
        let g = regular();
        let strict = RegularRecognizer::new(
            &g,
            RegularOptions::with_acceptance(Acceptance::StartSymbol),
        )
        .unwrap();
        assert!(strict.recognize("ababababa"));
        assert!(!strict.recognize("ba"));
        assert!(recognize_regular(&g, "ba"));
    }

    #[test]
    fn single_character_start() {
        let g = build_grammar(
            GrammarForm::ChomskyNormal,
            ["a"],
            Vec::<&str>::new(),
            [Production::new(Symbol::nonterminal("C"), vec![Symbol::terminal("a")]).unwrap()],
            Some("C"),
        )
        .unwrap();
        let recognition = ContextFreeRecognizer::new(&g).unwrap().parse_table("a");
        assert!(recognition.accepted);
        let cell: Vec<&str> = recognition
            .table
            .cell(0, 0)
            .unwrap()
            .iter()
            .map(|s| s.token())
            .collect();
        assert_eq!(cell, vec!["C"]);
    }

    #[test]
    fn invalid_definitions_abort() {
        let err = parse_grammar(
            "%terminals a\n%nonterminals A\nA -> a A A",
            GrammarForm::RightLinear,
        )
        .unwrap_err();
        match err {
            GrammarError::InDefinition { source, .. } => {
                assert!(matches!(*source, GrammarError::MalformedProduction { .. }))
            }
            other => panic!("unexpected error: {}", other),
        }

        let err = parse_grammar("%terminals a\n%nonterminals a", GrammarForm::RightLinear)
            .unwrap_err();
        assert_eq!(err, GrammarError::AmbiguousToken("a".into()));
    }

    #[test]
    fn cnf_grammar_through_the_regular_recognizer() {
        init_logging();
        // the backward pass only follows `N -> t M` rules, which CNF lacks
        let g = cnf();
        let rec = RegularRecognizer::new(&g, RegularOptions::default()).unwrap();
        assert!(rec.recognize("a"));
        assert!(!rec.recognize("ab"));
    }
}
