// bramble. Grammars as values
// Copyright (c) 2018 Dragoș Tiselice
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

use core::fmt;
use core::ops::{BitOr, RangeInclusive};
use std::sync::Arc;

use crate::charset::CharSet;
use crate::Label;

/// A grammar term: a recursive value describing what to match.
///
/// Grammars are immutable and compare structurally. Subterms are shared
/// through [`Arc`], so composing grammars aliases instead of copying and a
/// term may appear in several places of the same grammar.
///
/// Terms are usually built with the constructor functions of this module
/// ([`lit`], [`seq`], [`any`], [`rule`], ...) rather than spelled out as
/// variants.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Grammar<L: Label> {
    /// Matches an exact string, e.g. `lit("let")`.
    Str(String),
    /// Matches any single scalar contained in the set.
    Charset(CharSet),
    /// Ordered choice; the first alternative that matches *and consumes
    /// input* wins.
    Choice(Vec<Arc<Grammar<L>>>),
    /// Matches every subterm in order.
    Seq(Vec<Arc<Grammar<L>>>),
    /// Matches the subterm, or matches nothing without consuming input.
    Opt(Arc<Grammar<L>>),
    /// Greedily matches the subterm zero or more times.
    Rep(Arc<Grammar<L>>),
    /// Collapses the subterm's whole match into a single token.
    Flatten(Arc<Grammar<L>>),
    /// Matches the subterm but produces an empty node.
    Discard(Arc<Grammar<L>>),
    /// Matches the subterm but produces a single token with fixed text.
    Replace(Arc<Grammar<L>>, String),
    /// Names the subterm; the node it produces is tagged with the label,
    /// and the label becomes referenceable within the subterm.
    Rule(L, Arc<Grammar<L>>),
    /// Stands for the nearest enclosing [`Rule`](Grammar::Rule) with the
    /// same label.
    Ref(L),
}

/// Creates a grammar matching an exact string.
pub fn lit<L: Label>(string: impl Into<String>) -> Grammar<L> {
    Grammar::Str(string.into())
}

/// Creates a grammar matching one scalar in a closed range.
pub fn range<L: Label>(range: RangeInclusive<char>) -> Grammar<L> {
    Grammar::Charset(CharSet::range(range))
}

/// Creates a grammar matching one of the scalars of `chars`.
pub fn one_of<L: Label>(chars: &str) -> Grammar<L> {
    Grammar::Charset(CharSet::of(chars))
}

/// Creates a grammar matching any single scalar *not* in `chars`.
pub fn none_of<L: Label>(chars: &str) -> Grammar<L> {
    Grammar::Charset(CharSet::except(chars))
}

/// Combines alternatives into an ordered choice.
///
/// Alternatives are combined with [`|`](BitOr), so nested choices are
/// flattened and adjacent character sets are unioned.
///
/// # Panics
///
/// Panics when given no alternatives.
///
/// # Examples
///
/// ```
/// # use bramble::{any, lit, Grammar};
/// let keyword: Grammar<()> = any([lit("let"), lit("if"), lit("else")]);
/// ```
pub fn any<L: Label>(alternatives: impl IntoIterator<Item = Grammar<L>>) -> Grammar<L> {
    alternatives
        .into_iter()
        .reduce(|lhs, rhs| lhs | rhs)
        .expect("alternation of no alternatives")
}

/// Combines subterms into a concatenation; all must match in order.
pub fn seq<L: Label>(terms: impl IntoIterator<Item = Grammar<L>>) -> Grammar<L> {
    Grammar::Seq(terms.into_iter().map(Arc::new).collect())
}

/// Matches `term`, or produces an empty match without consuming input.
pub fn opt<L: Label>(term: Grammar<L>) -> Grammar<L> {
    Grammar::Opt(Arc::new(term))
}

/// Greedily matches `term` zero or more times.
pub fn zero_or_more<L: Label>(term: Grammar<L>) -> Grammar<L> {
    Grammar::Rep(Arc::new(term))
}

/// Greedily matches `term` one or more times.
///
/// Derived: `term ~ term*`, with the subterm shared between both uses.
pub fn one_or_more<L: Label>(term: Grammar<L>) -> Grammar<L> {
    let term = Arc::new(term);

    Grammar::Seq(vec![term.clone(), Arc::new(Grammar::Rep(term))])
}

/// Matches one or more `item`s separated by `separator`.
///
/// Derived: `(item ~ separator)* ~ item`.
pub fn interleaved<L: Label>(item: Grammar<L>, separator: Grammar<L>) -> Grammar<L> {
    let item = Arc::new(item);
    let pair = Arc::new(Grammar::Seq(vec![item.clone(), Arc::new(separator)]));

    Grammar::Seq(vec![Arc::new(Grammar::Rep(pair)), item])
}

/// Replaces the subterm's match with a single token holding the
/// concatenated text of all its leaves.
pub fn flatten<L: Label>(term: Grammar<L>) -> Grammar<L> {
    Grammar::Flatten(Arc::new(term))
}

/// Matches `term` but produces an empty node with no tokens.
pub fn discard<L: Label>(term: Grammar<L>) -> Grammar<L> {
    Grammar::Discard(Arc::new(term))
}

/// Matches `term` but produces a single token with literal `text`.
pub fn replace<L: Label>(term: Grammar<L>, text: impl Into<String>) -> Grammar<L> {
    Grammar::Replace(Arc::new(term), text.into())
}

/// Names `term`; the node it produces is tagged with `label`, and `term`
/// may refer back to the rule with [`reference`].
pub fn rule<L: Label>(label: L, term: Grammar<L>) -> Grammar<L> {
    Grammar::Rule(label, Arc::new(term))
}

/// Refers to the nearest enclosing [`rule`] named `label`.
///
/// A reference that never resolves is a bug in the grammar: matching such a
/// grammar panics rather than reporting a parse failure.
pub fn reference<L: Label>(label: L) -> Grammar<L> {
    Grammar::Ref(label)
}

impl<L: Label> Grammar<L> {
    /// Returns `true` when the term can succeed without consuming input.
    ///
    /// This is diagnostic information only; it has no effect on matching.
    /// References report `false` since following them without cycle
    /// tracking would not terminate.
    pub fn is_optional(&self) -> bool {
        match self {
            Grammar::Opt(_) | Grammar::Rep(_) => true,
            Grammar::Seq(terms) => terms.iter().all(|term| term.is_optional()),
            Grammar::Choice(alternatives) => {
                alternatives.iter().any(|alternative| alternative.is_optional())
            }
            Grammar::Flatten(term)
            | Grammar::Discard(term)
            | Grammar::Replace(term, _)
            | Grammar::Rule(_, term) => term.is_optional(),
            Grammar::Str(_) | Grammar::Charset(_) | Grammar::Ref(_) => false,
        }
    }
}

impl<L: Label> BitOr for Grammar<L> {
    type Output = Grammar<L>;

    /// Combines two grammars into an ordered choice.
    ///
    /// Nested choices are flattened and two character sets are unioned into
    /// one, keeping alternation shallow:
    ///
    /// ```
    /// # use bramble::{lit, Grammar};
    /// let first: Grammar<()> = lit("a") | lit("b");
    /// let combined = first | lit("c");
    ///
    /// match combined {
    ///     Grammar::Choice(alternatives) => assert_eq!(alternatives.len(), 3),
    ///     _ => unreachable!(),
    /// }
    /// ```
    fn bitor(self, rhs: Grammar<L>) -> Grammar<L> {
        match (self, rhs) {
            (Grammar::Charset(lhs), Grammar::Charset(rhs)) => Grammar::Charset(lhs.union(&rhs)),
            (Grammar::Choice(mut lhs), Grammar::Choice(rhs)) => {
                lhs.extend(rhs);
                Grammar::Choice(lhs)
            }
            (Grammar::Choice(mut lhs), rhs) => {
                lhs.push(Arc::new(rhs));
                Grammar::Choice(lhs)
            }
            (lhs, Grammar::Choice(rhs)) => {
                let mut alternatives = Vec::with_capacity(rhs.len() + 1);
                alternatives.push(Arc::new(lhs));
                alternatives.extend(rhs);
                Grammar::Choice(alternatives)
            }
            (lhs, rhs) => Grammar::Choice(vec![Arc::new(lhs), Arc::new(rhs)]),
        }
    }
}

impl<L: Label> From<CharSet> for Grammar<L> {
    fn from(set: CharSet) -> Grammar<L> {
        Grammar::Charset(set)
    }
}

impl<L: Label> fmt::Display for Grammar<L> {
    /// Renders the term compactly for diagnostics. Rules and references
    /// render as their label alone, the way errors name them.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Grammar::Str(string) => write!(f, "{:?}", string),
            Grammar::Charset(set) => write!(f, "[{}]", set),
            Grammar::Choice(alternatives) => {
                write!(f, "(")?;
                for (i, alternative) in alternatives.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    write!(f, "{}", alternative)?;
                }
                write!(f, ")")
            }
            Grammar::Seq(terms) => {
                write!(f, "(")?;
                for (i, term) in terms.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ~ ")?;
                    }
                    write!(f, "{}", term)?;
                }
                write!(f, ")")
            }
            Grammar::Opt(term) => write!(f, "{}?", term),
            Grammar::Rep(term) => write!(f, "{}*", term),
            Grammar::Flatten(term) => write!(f, "@{}", term),
            Grammar::Discard(term) => write!(f, "_{}", term),
            Grammar::Replace(term, text) => write!(f, "({} -> {:?})", term, text),
            Grammar::Rule(label, _) => write!(f, "{:?}", label),
            Grammar::Ref(label) => write!(f, "{:?}", label),
        }
    }
}
