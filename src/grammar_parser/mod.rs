//! Line-oriented text format for grammars.
//!
//! ```text
//! # comment
//! %terminals a b
//! %nonterminals A B C
//! %start S
//! S -> A B | B C
//! B -> b
//! ```
//!
//! Directives may appear in any order and any number of times, except
//! `%start` which takes exactly one token. A symbol token is any run of
//! characters other than whitespace and `| # % - >`.

#[cfg(test)]
mod tests_rejections;

use chumsky::{
    prelude::*,
    text::{inline_whitespace, newline},
};

use crate::grammar::{Grammar, GrammarForm};
use crate::GrammarError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Str<'src> {
    pub text: &'src str,
    pub span: SimpleSpan,
}

impl<'src> Str<'src> {
    pub fn new(text: &'src str, span: SimpleSpan) -> Self {
        Self { text, span }
    }
}

impl<'src> PartialEq<&str> for Str<'src> {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    Terminals,
    NonTerminals,
    Start,
}

/// `lhs -> alt | alt ...`
#[derive(Debug, Clone)]
pub struct Rule<'src> {
    pub lhs: Str<'src>,
    pub alternatives: Vec<Vec<Str<'src>>>,
}

#[derive(Debug, Clone)]
pub enum Line<'src> {
    Directive {
        kind: DirectiveKind,
        tokens: Vec<Str<'src>>,
        span: SimpleSpan,
    },
    Rule(Rule<'src>),
}

type Extra<'src> = extra::Err<Rich<'src, char>>;

/// The whole definition: one optional directive or rule per line.
pub fn definition<'src>() -> impl Parser<'src, &'src str, Vec<Line<'src>>, Extra<'src>> {
    line()
        .separated_by(newline())
        .collect::<Vec<_>>()
        .then_ignore(end())
        .map(|lines| lines.into_iter().flatten().collect())
}

fn line<'src>() -> impl Parser<'src, &'src str, Option<Line<'src>>, Extra<'src>> {
    inline_whitespace()
        .ignore_then(choice((directive(), rule())).or_not())
        .then_ignore(inline_whitespace())
        .then_ignore(comment().or_not())
}

fn comment<'src>() -> impl Parser<'src, &'src str, (), Extra<'src>> {
    just('#').ignore_then(none_of("\r\n").repeated()).ignored()
}

fn token<'src>() -> impl Parser<'src, &'src str, Str<'src>, Extra<'src>> {
    any()
        .filter(|c: &char| !c.is_whitespace() && !matches!(*c, '|' | '#' | '%' | '-' | '>'))
        .repeated()
        .at_least(1)
        .to_slice()
        .map_with(|s, extra| Str::new(s, extra.span()))
}

fn directive<'src>() -> impl Parser<'src, &'src str, Line<'src>, Extra<'src>> {
    just('%')
        .ignore_then(choice((
            just("terminals").to(DirectiveKind::Terminals),
            just("nonterminals").to(DirectiveKind::NonTerminals),
            just("start").to(DirectiveKind::Start),
        )))
        .then(
            inline_whitespace()
                .at_least(1)
                .ignore_then(token())
                .repeated()
                .collect(),
        )
        .map_with(|(kind, tokens), extra| Line::Directive {
            kind,
            tokens,
            span: extra.span(),
        })
}

fn alternative<'src>() -> impl Parser<'src, &'src str, Vec<Str<'src>>, Extra<'src>> {
    token()
        .padded_by(inline_whitespace())
        .repeated()
        .at_least(1)
        .collect()
}

fn rule<'src>() -> impl Parser<'src, &'src str, Line<'src>, Extra<'src>> {
    token()
        .then_ignore(just("->").padded_by(inline_whitespace()))
        .then(alternative().separated_by(just('|')).at_least(1).collect())
        .map(|(lhs, alternatives)| Line::Rule(Rule { lhs, alternatives }))
}

fn located(span: SimpleSpan, source: GrammarError) -> GrammarError {
    GrammarError::InDefinition {
        start: span.start,
        end: span.end,
        source: Box::new(source),
    }
}

/// Turns parsed lines into a grammar of the given form. Declarations are
/// applied before any rule, so rules may precede the directives they use.
pub fn build(lines: &[Line<'_>], form: GrammarForm) -> Result<Grammar, GrammarError> {
    let mut terminals = vec![];
    let mut nonterminals = vec![];
    let mut start: Option<&Str<'_>> = None;

    for line in lines {
        let Line::Directive { kind, tokens, span } = line else {
            continue;
        };
        match kind {
            DirectiveKind::Terminals => terminals.extend(tokens.iter().map(|t| t.text)),
            DirectiveKind::NonTerminals => nonterminals.extend(tokens.iter().map(|t| t.text)),
            DirectiveKind::Start => match (start, tokens.as_slice()) {
                (None, [token]) => start = Some(token),
                (Some(_), [_]) => {
                    return Err(located(
                        *span,
                        GrammarError::InvalidStart("start symbol given twice".to_string()),
                    ))
                }
                _ => {
                    return Err(located(
                        *span,
                        GrammarError::InvalidStart("%start takes exactly one symbol".to_string()),
                    ))
                }
            },
        }
    }

    let mut grammar = Grammar::new(form, terminals, nonterminals)?;
    if let Some(start) = start {
        grammar = grammar
            .with_start(start.text)
            .map_err(|e| located(start.span, e))?;
    }

    for line in lines {
        let Line::Rule(rule) = line else {
            continue;
        };
        for alternative in &rule.alternatives {
            let rhs: Vec<&str> = alternative.iter().map(|t| t.text).collect();
            grammar
                .add_production_str(rule.lhs.text, &rhs)
                .map_err(|e| {
                    let end = alternative.last().map_or(rule.lhs.span.end, |t| t.span.end);
                    located(SimpleSpan::from(rule.lhs.span.start..end), e)
                })?;
        }
    }

    log::debug!(
        "parsed {} grammar with {} productions",
        form,
        grammar.productions().len()
    );
    Ok(grammar)
}
