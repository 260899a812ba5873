use std::collections::{BTreeSet, HashMap};

use log::trace;

use crate::symbol::{Production, Symbol};
use crate::GrammarError;

/// The shape every production of a grammar must take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrammarForm {
    /// `N -> t` or `N -> t M`
    RightLinear,
    /// `N -> t` or `N -> N1 N2`
    ChomskyNormal,
}

impl GrammarForm {
    fn admits(self, rhs: &[Symbol]) -> bool {
        match (self, rhs) {
            (_, [t]) => t.is_terminal(),
            (GrammarForm::RightLinear, [t, m]) => t.is_terminal() && !m.is_terminal(),
            (GrammarForm::ChomskyNormal, [n1, n2]) => !n1.is_terminal() && !n2.is_terminal(),
            _ => false,
        }
    }
}

impl std::fmt::Display for GrammarForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrammarForm::RightLinear => f.write_str("right-linear"),
            GrammarForm::ChomskyNormal => f.write_str("in Chomsky Normal Form"),
        }
    }
}

/// Terminals, nonterminals and productions of one grammar.
///
/// Symbols keep their declaration order for display, and are indexed by
/// token for lookup. Productions are indexed by the token of their first
/// right-hand symbol, which is all `productions_matching` needs to narrow
/// its candidates.
#[derive(Debug, Clone)]
pub struct Grammar {
    form: GrammarForm,
    terminals: Vec<Symbol>,
    nonterminals: Vec<Symbol>,
    by_token: HashMap<String, Symbol>,
    productions: Vec<Production>,
    by_first: HashMap<String, Vec<usize>>,
    start: Option<Symbol>,
}

impl Grammar {
    pub fn new<T, N>(form: GrammarForm, terminals: T, nonterminals: N) -> Result<Self, GrammarError>
    where
        T: IntoIterator,
        T::Item: Into<String>,
        N: IntoIterator,
        N::Item: Into<String>,
    {
        let mut grammar = Grammar {
            form,
            terminals: vec![],
            nonterminals: vec![],
            by_token: HashMap::new(),
            productions: vec![],
            by_first: HashMap::new(),
            start: None,
        };
        for token in terminals {
            grammar.declare(Symbol::terminal(token))?;
        }
        for token in nonterminals {
            grammar.declare(Symbol::nonterminal(token))?;
        }
        Ok(grammar)
    }

    /// Sets the distinguished start symbol. The token joins the nonterminal
    /// set if it was not declared there already.
    pub fn with_start(mut self, token: impl Into<String>) -> Result<Self, GrammarError> {
        let start = Symbol::nonterminal(token);
        self.declare(start.clone())?;
        self.start = Some(start);
        Ok(self)
    }

    fn declare(&mut self, symbol: Symbol) -> Result<(), GrammarError> {
        if let Some(existing) = self.by_token.get(symbol.token()) {
            if existing.kind() != symbol.kind() {
                return Err(GrammarError::AmbiguousToken(symbol.token().to_string()));
            }
            return Ok(());
        }
        if symbol.is_terminal() {
            self.terminals.push(symbol.clone());
        } else {
            self.nonterminals.push(symbol.clone());
        }
        self.by_token.insert(symbol.token().to_string(), symbol);
        Ok(())
    }

    pub fn form(&self) -> GrammarForm {
        self.form
    }

    pub fn terminals(&self) -> &[Symbol] {
        &self.terminals
    }

    pub fn nonterminals(&self) -> &[Symbol] {
        &self.nonterminals
    }

    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    pub fn start(&self) -> Option<&Symbol> {
        self.start.as_ref()
    }

    pub fn find_terminal(&self, token: &str) -> Option<&Symbol> {
        self.by_token.get(token).filter(|s| s.is_terminal())
    }

    /// The start symbol is found here too.
    pub fn find_nonterminal(&self, token: &str) -> Option<&Symbol> {
        self.by_token.get(token).filter(|s| !s.is_terminal())
    }

    /// Whether `token` names any symbol of this grammar.
    pub fn contains_token(&self, token: &str) -> bool {
        self.by_token.contains_key(token)
    }

    /// Adds a production after checking every symbol against the declared
    /// universe and the production's shape against the grammar form.
    pub fn add_production(&mut self, production: Production) -> Result<(), GrammarError> {
        let lhs = production.lhs();
        if self.find_nonterminal(lhs.token()).is_none() {
            return Err(match self.find_terminal(lhs.token()) {
                Some(_) => GrammarError::TerminalLhs(lhs.token().to_string()),
                None => GrammarError::UnknownSymbol(lhs.token().to_string()),
            });
        }

        let mut rhs = Vec::with_capacity(production.rhs().len());
        for sym in production.rhs() {
            match self.by_token.get(sym.token()) {
                Some(declared) => rhs.push(declared.clone()),
                None => return Err(GrammarError::UnknownSymbol(sym.token().to_string())),
            }
        }

        if !self.form.admits(&rhs) {
            return Err(GrammarError::MalformedProduction {
                production: production.to_string(),
                form: self.form,
            });
        }

        let production = Production::new(lhs.clone(), rhs)?;
        trace!("adding production {}", production);
        let id = self.productions.len();
        self.by_first
            .entry(production.rhs()[0].token().to_string())
            .or_default()
            .push(id);
        self.productions.push(production);
        Ok(())
    }

    /// Adds `lhs -> rhs...` given as tokens. Right-hand tokens resolve to a
    /// nonterminal first and fall back to a terminal.
    pub fn add_production_str(&mut self, lhs: &str, rhs: &[&str]) -> Result<(), GrammarError> {
        let left = match self.find_nonterminal(lhs) {
            Some(sym) => sym.clone(),
            None if self.find_terminal(lhs).is_some() => {
                return Err(GrammarError::TerminalLhs(lhs.to_string()))
            }
            None => return Err(GrammarError::UnknownSymbol(lhs.to_string())),
        };
        let right = rhs
            .iter()
            .map(|token| {
                self.find_nonterminal(token)
                    .or_else(|| self.find_terminal(token))
                    .cloned()
                    .ok_or_else(|| GrammarError::UnknownSymbol(token.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.add_production(Production::new(left, right)?)
    }

    /// Every distinct nonterminal with a production whose right side
    /// reverse-matches `args`.
    pub fn productions_matching<T: AsRef<str>>(&self, args: &[T]) -> BTreeSet<&Symbol> {
        let Some(first) = args.first() else {
            return BTreeSet::new();
        };
        self.by_first
            .get(first.as_ref())
            .into_iter()
            .flatten()
            .filter_map(|&id| self.productions[id].reverse_match(args))
            .collect()
    }
}
