// bramble. Grammars as values
// Copyright (c) 2018 Dragoș Tiselice
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

use core::ops::Range;

use crate::Label;

/// The structured result of a successful match.
///
/// Leaves are [`Token`](Match::Token)s holding matched text; interior
/// [`Node`](Match::Node)s hold ordered children and are tagged with a label
/// when they were produced by a [`rule`](crate::rule).
///
/// Spans are half-open `[start, end)` ranges of scalar offsets into the
/// input. A token's span is absent when the token is synthetic, produced
/// by [`flatten`](crate::flatten) or [`replace`](crate::replace) over an
/// empty match.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Match<L: Label> {
    /// A leaf holding matched (or substituted) text.
    Token {
        /// The text this token carries.
        text: String,
        /// Where the text came from, when it came from anywhere.
        span: Option<Range<usize>>,
    },
    /// An interior node.
    Node {
        /// The label of the rule that produced this node, if any.
        label: Option<L>,
        /// The node's ordered children.
        children: Vec<Match<L>>,
    },
}

impl<L: Label> Match<L> {
    /// Creates a token.
    pub fn token(text: impl Into<String>, span: Option<Range<usize>>) -> Match<L> {
        Match::Token {
            text: text.into(),
            span,
        }
    }

    /// Creates a node.
    pub fn node(label: Option<L>, children: Vec<Match<L>>) -> Match<L> {
        Match::Node { label, children }
    }

    /// Returns the scalar-offset span this match covers.
    ///
    /// A node's span runs from its first spanned child's start to its last
    /// spanned child's end; it is absent when no child has a span.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bramble::{lit, seq, Grammar};
    /// let grammar: Grammar<()> = seq([lit("a"), lit("b")]);
    ///
    /// assert_eq!(grammar.parse("ab").unwrap().span(), Some(0..2));
    /// ```
    pub fn span(&self) -> Option<Range<usize>> {
        match self {
            Match::Token { span, .. } => span.clone(),
            Match::Node { children, .. } => {
                let mut spans = children.iter().filter_map(Match::span);
                let first = spans.next()?;
                let end = spans.last().map_or(first.end, |span| span.end);

                Some(first.start..end)
            }
        }
    }
}
