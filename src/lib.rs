use chumsky::Parser;
use thiserror::Error;
use unicode_segmentation::UnicodeSegmentation;

pub mod cyk;
pub mod grammar;
pub mod grammar_parser;
pub mod regular;
pub mod render;
pub mod symbol;

pub use cyk::{ContextFreeRecognizer, CykTable, Recognition};
pub use grammar::{Grammar, GrammarForm};
pub use regular::{Acceptance, RegularOptions, RegularRecognizer, RegularRun};
pub use symbol::{Production, Symbol, SymbolKind};

/// Everything that can go wrong while building a grammar. Recognition
/// itself never fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("left side `{0}` is not a nonterminal")]
    TerminalLhs(String),
    #[error("production for `{0}` has an empty right side")]
    EmptyRhs(String),
    #[error("symbol `{0}` is not declared in the grammar")]
    UnknownSymbol(String),
    #[error("token `{0}` is declared both as a terminal and a nonterminal")]
    AmbiguousToken(String),
    #[error("production `{production}` is not {form}")]
    MalformedProduction {
        production: String,
        form: GrammarForm,
    },
    #[error("the grammar has no start symbol")]
    MissingStart,
    #[error("invalid start directive: {0}")]
    InvalidStart(String),
    #[error("Error(s) while parsing the grammar : {0}")]
    Syntax(String),
    #[error("{source} (at {start}..{end})")]
    InDefinition {
        start: usize,
        end: usize,
        #[source]
        source: Box<GrammarError>,
    },
}

/// Splits an input string into the tokens the recognizers consume: one
/// user-perceived character each.
pub fn tokenize(input: &str) -> Vec<&str> {
    input.graphemes(true).collect()
}

/// Builds a grammar in one go, failing on the first symbol-universe or
/// shape violation.
pub fn build_grammar<T, N, P>(
    form: GrammarForm,
    terminals: T,
    nonterminals: N,
    productions: P,
    start: Option<&str>,
) -> Result<Grammar, GrammarError>
where
    T: IntoIterator,
    T::Item: Into<String>,
    N: IntoIterator,
    N::Item: Into<String>,
    P: IntoIterator<Item = Production>,
{
    let mut grammar = Grammar::new(form, terminals, nonterminals)?;
    if let Some(start) = start {
        grammar = grammar.with_start(start)?;
    }
    for production in productions {
        grammar.add_production(production)?;
    }
    log::debug!(
        "built {} grammar: {} terminals, {} nonterminals, {} productions",
        form,
        grammar.terminals().len(),
        grammar.nonterminals().len(),
        grammar.productions().len()
    );
    Ok(grammar)
}

/// Parses a textual grammar definition (see [`grammar_parser`]).
pub fn parse_grammar(text: &str, form: GrammarForm) -> Result<Grammar, GrammarError> {
    let (lines, errors) = grammar_parser::definition().parse(text).into_output_errors();
    if !errors.is_empty() {
        let mut error_string = String::new();
        for e in errors {
            error_string += &format!("\n{} at {}", e, e.span());
        }
        return Err(GrammarError::Syntax(error_string));
    }
    let lines = lines.ok_or_else(|| GrammarError::Syntax("no output".to_string()))?;
    grammar_parser::build(&lines, form)
}

/// Runs the backward right-linear recognizer with default options.
pub fn recognize_regular(grammar: &Grammar, input: &str) -> bool {
    match RegularRecognizer::new(grammar, RegularOptions::default()) {
        Ok(recognizer) => recognizer.recognize(input),
        Err(e) => {
            log::warn!("cannot run backward recognition: {}", e);
            false
        }
    }
}

/// Runs CYK. A grammar without a start symbol recognizes nothing.
pub fn recognize_context_free(grammar: &Grammar, input: &str) -> bool {
    match ContextFreeRecognizer::new(grammar) {
        Ok(recognizer) => recognizer.recognize(input),
        Err(e) => {
            log::warn!("cannot run CYK: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_splits_graphemes() {
        assert_eq!(tokenize("ab"), vec!["a", "b"]);
        assert_eq!(tokenize("e\u{301}x"), vec!["e\u{301}", "x"]);
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn build_grammar_stops_on_the_first_violation() {
        let prods = vec![
            Production::new(Symbol::nonterminal("A"), vec![Symbol::terminal("a")]).unwrap(),
            Production::new(Symbol::nonterminal("A"), vec![Symbol::terminal("z")]).unwrap(),
        ];
        let err = build_grammar(GrammarForm::RightLinear, ["a"], ["A"], prods, None).unwrap_err();
        assert_eq!(err, GrammarError::UnknownSymbol("z".into()));
    }

    #[test]
    fn context_free_without_start_recognizes_nothing() {
        let g = parse_grammar("%terminals a\n%nonterminals C\nC -> a", GrammarForm::ChomskyNormal)
            .unwrap();
        assert!(!recognize_context_free(&g, "a"));
    }

    #[test]
    fn regular_without_start_uses_any_survivor() {
        let g = parse_grammar(
            "%terminals a b\n%nonterminals A B\nA -> a | a B\nB -> b A",
            GrammarForm::RightLinear,
        )
        .unwrap();
        assert!(g.start().is_none());
        assert!(recognize_regular(&g, "aba"));
        assert!(recognize_regular(&g, "ba"));
        assert!(!recognize_regular(&g, "ab"));
    }

    #[test]
    fn syntax_errors_are_reported() {
        let err = parse_grammar("%terminals a\nA => a", GrammarForm::RightLinear).unwrap_err();
        assert!(matches!(err, GrammarError::Syntax(_)));
    }
}
