use chumsky::Parser;

use crate::grammar_parser::definition;

#[cfg(test)]
mod invalid_input_tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use std::path::Path;

    fn log_errors(
        test_name: &str,
        input: &str,
        errors: impl IntoIterator<Item = impl std::fmt::Display>,
    ) {
        let folder = Path::new("target/test_errors");
        if !folder.exists() {
            fs::create_dir_all(folder).unwrap();
        }
        let file_path = folder.join(format!("{}.log", test_name));
        let mut file = File::create(&file_path).unwrap();
        writeln!(file, "Input:\n{}\n", input).unwrap();
        writeln!(file, "Errors:").unwrap();
        for e in errors {
            writeln!(file, "  - {}", e).unwrap();
        }
        println!("Parse errors logged to {:?}", file_path);
    }

    #[test]
    fn test_wrong_arrow() {
        let input = "S => A B";
        let result = definition().parse(input);

        assert!(result.has_errors(), "Expected parser to fail on `=>`");
        log_errors("wrong_arrow", input, result.errors());
    }

    #[test]
    fn test_missing_right_side() {
        let input = "S ->";
        let result = definition().parse(input);

        assert!(
            result.has_errors(),
            "Expected parser to fail on a rule without alternatives"
        );
        log_errors("missing_right_side", input, result.errors());
    }

    #[test]
    fn test_empty_alternative() {
        let input = "S -> A B | | b";
        let result = definition().parse(input);

        assert!(
            result.has_errors(),
            "Expected parser to fail on an empty alternative"
        );
        log_errors("empty_alternative", input, result.errors());
    }

    #[test]
    fn test_unknown_directive() {
        let input = "%alphabet a b";
        let result = definition().parse(input);

        assert!(
            result.has_errors(),
            "Expected parser to fail on an unknown directive"
        );
        log_errors("unknown_directive", input, result.errors());
    }

    #[test]
    fn test_directive_glued_to_symbol() {
        let input = "%terminalsa b";
        let result = definition().parse(input);

        assert!(
            result.has_errors(),
            "Expected parser to fail when the directive runs into a symbol"
        );
        log_errors("directive_glued_to_symbol", input, result.errors());
    }

    #[test]
    fn test_missing_left_side() {
        let input = "-> a";
        let result = definition().parse(input);

        assert!(
            result.has_errors(),
            "Expected parser to fail on a rule without a left side"
        );
        log_errors("missing_left_side", input, result.errors());
    }
}
