use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use crate::GrammarError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Terminal,
    NonTerminal,
}

/// An atomic grammar element.
///
/// Identity is the token alone: two symbols with the same token compare
/// equal whatever their kind. A grammar never declares one token as both.
#[derive(Debug, Clone)]
pub struct Symbol {
    token: String,
    kind: SymbolKind,
}

impl Symbol {
    pub fn terminal(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            kind: SymbolKind::Terminal,
        }
    }

    pub fn nonterminal(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            kind: SymbolKind::NonTerminal,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    pub fn is_terminal(&self) -> bool {
        self.kind == SymbolKind::Terminal
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.token == other.token
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.token.hash(state);
    }
}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> Ordering {
        self.token.cmp(&other.token)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.token
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.token.fmt(f)
    }
}

/// A rewrite rule `lhs -> rhs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Production {
    lhs: Symbol,
    rhs: Vec<Symbol>,
}

impl Production {
    pub fn new(lhs: Symbol, rhs: Vec<Symbol>) -> Result<Self, GrammarError> {
        if lhs.is_terminal() {
            return Err(GrammarError::TerminalLhs(lhs.token));
        }
        if rhs.is_empty() {
            return Err(GrammarError::EmptyRhs(lhs.token));
        }
        Ok(Self { lhs, rhs })
    }

    pub fn lhs(&self) -> &Symbol {
        &self.lhs
    }

    pub fn rhs(&self) -> &[Symbol] {
        &self.rhs
    }

    /// Returns the left side if `args` spell out the right side token by
    /// token. `args` may be raw tokens or symbols.
    pub fn reverse_match<T: AsRef<str>>(&self, args: &[T]) -> Option<&Symbol> {
        if args.len() != self.rhs.len() {
            return None;
        }
        self.rhs
            .iter()
            .zip(args)
            .all(|(sym, arg)| sym.token == arg.as_ref())
            .then_some(&self.lhs)
    }
}

impl std::fmt::Display for Production {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ->", self.lhs)?;
        for sym in &self.rhs {
            write!(f, " {}", sym)?;
        }
        Ok(())
    }
}
