//! CYK recognition for grammars in Chomsky Normal Form.

use std::collections::BTreeSet;

use log::{debug, trace, warn};

use crate::grammar::{Grammar, GrammarForm};
use crate::symbol::Symbol;
use crate::{tokenize, GrammarError};

pub type Cell<'g> = BTreeSet<&'g Symbol>;

/// Triangular table of derivable nonterminals.
///
/// Row `start` holds one cell per span: `cell(start, span)` is the set of
/// nonterminals deriving the `span + 1` graphemes beginning at `start`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CykTable<'g> {
    rows: Vec<Vec<Cell<'g>>>,
}

impl<'g> CykTable<'g> {
    fn with_len(n: usize) -> Self {
        Self {
            rows: (0..n).map(|start| vec![Cell::new(); n - start]).collect(),
        }
    }

    /// Length of the input the table was built for.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn cell(&self, start: usize, span: usize) -> Option<&Cell<'g>> {
        self.rows.get(start)?.get(span)
    }

    pub fn derives(&self, start: usize, span: usize, token: &str) -> bool {
        self.cell(start, span)
            .is_some_and(|cell| cell.iter().any(|s| s.token() == token))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell<'g>]> {
        self.rows.iter().map(Vec::as_slice)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recognition<'g> {
    pub accepted: bool,
    pub table: CykTable<'g>,
}

pub struct ContextFreeRecognizer<'g> {
    grammar: &'g Grammar,
    start: &'g Symbol,
}

impl<'g> ContextFreeRecognizer<'g> {
    pub fn new(grammar: &'g Grammar) -> Result<Self, GrammarError> {
        let start = grammar.start().ok_or(GrammarError::MissingStart)?;
        if grammar.form() != GrammarForm::ChomskyNormal {
            warn!("CYK on a grammar that is {}", grammar.form());
        }
        Ok(Self { grammar, start })
    }

    pub fn recognize(&self, input: &str) -> bool {
        self.parse_table(input).accepted
    }

    /// Fills the table and checks the start symbol against the full span.
    /// Empty input, or input holding a grapheme outside the grammar, gives
    /// an empty table and no acceptance.
    pub fn parse_table(&self, input: &str) -> Recognition<'g> {
        let tokens = tokenize(input);
        if tokens.is_empty() {
            debug!("empty input is not recognized");
            return Recognition {
                accepted: false,
                table: CykTable::default(),
            };
        }
        if let Some(foreign) = tokens.iter().find(|t| !self.grammar.contains_token(t)) {
            debug!("`{}` is outside the alphabet", foreign);
            return Recognition {
                accepted: false,
                table: CykTable::default(),
            };
        }

        let table = self.fill(&tokens);
        let n = tokens.len();
        let accepted = table.rows[0][n - 1].contains(self.start);
        debug!("{} graphemes, accepted: {}", n, accepted);
        Recognition { accepted, table }
    }

    /// Every span level is complete before the next one starts, since a
    /// cell only reads cells of strictly shorter spans.
    fn fill(&self, tokens: &[&str]) -> CykTable<'g> {
        let grammar = self.grammar;
        let n = tokens.len();
        let mut table = CykTable::with_len(n);

        for span in 0..n {
            for start in 0..n - span {
                let cell = if span == 0 {
                    grammar.productions_matching(&tokens[start..=start])
                } else {
                    let mut cell = Cell::new();
                    // the left part covers `k` graphemes, the right part the rest
                    for k in 1..=span {
                        let left = &table.rows[start][k - 1];
                        let right = &table.rows[start + k][span - k];
                        for &front in left {
                            for &back in right {
                                cell.extend(grammar.productions_matching(&[front, back]));
                            }
                        }
                    }
                    cell
                };
                trace!("T[{}][{}] = {:?}", start, span, cell);
                table.rows[start][span] = cell;
            }
        }
        table
    }
}
