//! Backward recognition for right-linear grammars.
//!
//! The input is consumed from its last grapheme to its first. The frontier
//! at position `i` is the set of nonterminals that derive the suffix
//! starting at `i`: the last grapheme seeds it through `N -> t` rules, and
//! every earlier grapheme `t` lifts it through `N -> t M` rules where `M`
//! is in the previous frontier.

use std::collections::BTreeSet;

use log::{debug, trace, warn};

use crate::grammar::{Grammar, GrammarForm};
use crate::symbol::Symbol;
use crate::{tokenize, GrammarError};

/// What a surviving frontier must contain for the input to be accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Acceptance {
    /// Some nonterminal derives the whole input.
    #[default]
    AnySurvivor,
    /// The grammar's start symbol derives the whole input.
    StartSymbol,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegularOptions {
    pub acceptance: Acceptance,
}

impl RegularOptions {
    pub fn with_acceptance(acceptance: Acceptance) -> Self {
        Self { acceptance }
    }
}

pub struct RegularRecognizer<'g> {
    grammar: &'g Grammar,
    options: RegularOptions,
}

/// The outcome of one backward pass.
///
/// `frontiers[i]` holds the nonterminals deriving `tokens[i..]`. Both are
/// empty when the input is empty or contains a grapheme outside the
/// grammar's alphabet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegularRun<'g, 'inp> {
    pub tokens: Vec<&'inp str>,
    pub frontiers: Vec<BTreeSet<&'g Symbol>>,
    pub accepted: bool,
}

impl<'g, 'inp> RegularRun<'g, 'inp> {
    fn rejected(tokens: Vec<&'inp str>) -> Self {
        Self {
            tokens,
            frontiers: vec![],
            accepted: false,
        }
    }

    pub fn accepted(&self) -> bool {
        self.accepted
    }

    /// Nonterminals deriving the entire input.
    pub fn derivable(&self) -> Option<&BTreeSet<&'g Symbol>> {
        self.frontiers.first()
    }
}

impl<'g> RegularRecognizer<'g> {
    pub fn new(grammar: &'g Grammar, options: RegularOptions) -> Result<Self, GrammarError> {
        if options.acceptance == Acceptance::StartSymbol && grammar.start().is_none() {
            return Err(GrammarError::MissingStart);
        }
        if grammar.form() != GrammarForm::RightLinear {
            warn!("backward recognition on a grammar {}", grammar.form());
        }
        Ok(Self { grammar, options })
    }

    pub fn recognize(&self, input: &str) -> bool {
        self.run(input).accepted
    }

    pub fn run<'inp>(&self, input: &'inp str) -> RegularRun<'g, 'inp> {
        let grammar = self.grammar;
        let tokens = tokenize(input);

        let Some((&last, rest)) = tokens.split_last() else {
            debug!("empty input is not recognized");
            return RegularRun::rejected(tokens);
        };
        if let Some(foreign) = tokens.iter().find(|t| !grammar.contains_token(t)) {
            debug!("`{}` is outside the alphabet", foreign);
            return RegularRun::rejected(tokens);
        }

        let mut frontier = grammar.productions_matching(&[last]);
        let mut frontiers = Vec::with_capacity(tokens.len());
        trace!("[{}] {} -> {} nonterminals", tokens.len() - 1, last, frontier.len());

        for (pos, &token) in rest.iter().enumerate().rev() {
            let mut next = BTreeSet::new();
            for nt in &frontier {
                next.extend(grammar.productions_matching(&[token, nt.token()]));
            }
            frontiers.push(std::mem::replace(&mut frontier, next));
            trace!("[{}] {} -> {} nonterminals", pos, token, frontier.len());
        }
        frontiers.push(frontier);
        frontiers.reverse();

        let whole = &frontiers[0];
        let accepted = match self.options.acceptance {
            Acceptance::AnySurvivor => !whole.is_empty(),
            Acceptance::StartSymbol => grammar.start().is_some_and(|s| whole.contains(s)),
        };
        debug!("{} graphemes, accepted: {}", tokens.len(), accepted);

        RegularRun {
            tokens,
            frontiers,
            accepted,
        }
    }
}
