// bramble. Grammars as values
// Copyright (c) 2018 Dragoș Tiselice
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

use std::collections::HashMap;

use crate::charset::CharSet;
use crate::error::{Error, ErrorKind};
use crate::grammar::Grammar;
use crate::tree::Match;
use crate::Label;

impl<L: Label> Grammar<L> {
    /// Matches `input` against the grammar, producing a [`Match`] tree.
    ///
    /// The whole input must be consumed: a match that stops short fails
    /// with [`ErrorKind::UnexpectedToken`]. On failure the error is pinned
    /// at the farthest scalar offset any attempt reached, with the subterm
    /// that was expected there.
    ///
    /// # Panics
    ///
    /// Panics when a [`reference`](crate::reference) resolves to no
    /// enclosing [`rule`](crate::rule); an unbound reference is a bug in
    /// the grammar, not a property of the input.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bramble::{lit, Grammar, Match};
    /// let grammar: Grammar<()> = lit("foo");
    ///
    /// assert_eq!(grammar.parse("foo").unwrap(), Match::token("foo", Some(0..3)));
    /// assert!(grammar.parse("foobar").is_err());
    /// ```
    pub fn parse(&self, input: &str) -> Result<Match<L>, Error<L>> {
        let mut state = MatcherState::new(input);

        match state.tree(self) {
            Some(tree) if state.pos == state.scalars.len() => Ok(tree),
            Some(_) => match state.best_expected {
                // A failed attempt got farther than the final match did;
                // that attempt explains why the match stopped short.
                Some(expected) if state.best_pos > state.pos => Err(Error {
                    kind: ErrorKind::Expected(expected.clone()),
                    remaining: state.remaining_from(state.best_pos),
                    offset: Some(state.best_pos),
                }),
                _ => Err(Error {
                    kind: ErrorKind::UnexpectedToken,
                    remaining: state.remaining_from(state.pos),
                    offset: Some(state.pos),
                }),
            },
            None => {
                let expected = state.best_expected.unwrap_or(self);

                Err(Error {
                    kind: ErrorKind::Expected(expected.clone()),
                    remaining: state.remaining_from(state.best_pos),
                    offset: Some(state.best_pos),
                })
            }
        }
    }
}

/// The complete state of a single match: the input as a random-access
/// sequence of scalars, the cursor, the farthest failed attempt, and the
/// rule bindings seen on the way down.
struct MatcherState<'g, L: Label> {
    scalars: Vec<char>,
    pos: usize,
    best_pos: usize,
    best_expected: Option<&'g Grammar<L>>,
    env: HashMap<L, &'g Grammar<L>>,
}

impl<'g, L: Label> MatcherState<'g, L> {
    fn new(input: &str) -> MatcherState<'g, L> {
        MatcherState {
            scalars: input.chars().collect(),
            pos: 0,
            best_pos: 0,
            best_expected: None,
            env: HashMap::new(),
        }
    }

    /// Records a failed attempt. Only the farthest failure is kept; on a
    /// tie the earlier (innermost) attempt wins.
    fn fail(&mut self, expected: &'g Grammar<L>) {
        if self.best_expected.is_none() || self.pos > self.best_pos {
            self.best_pos = self.pos;
            self.best_expected = Some(expected);
        }
    }

    fn resolve(&self, label: &L) -> &'g Grammar<L> {
        match self.env.get(label).copied() {
            Some(term) => term,
            None => panic!("undefined rule reference {:?}", label),
        }
    }

    /// Consumes `string` scalar by scalar. On a mismatch, records the
    /// attempt at the scalar where it stopped and restores the cursor.
    fn eat(&mut self, expected: &'g Grammar<L>, string: &str) -> bool {
        let start = self.pos;

        for scalar in string.chars() {
            if self.scalars.get(self.pos) == Some(&scalar) {
                self.pos += 1;
            } else {
                self.fail(expected);
                self.pos = start;
                return false;
            }
        }

        true
    }

    /// Hot loop for repetition over a character set.
    fn eat_class(&mut self, set: &CharSet) {
        while let Some(&scalar) = self.scalars.get(self.pos) {
            if !set.contains(scalar) {
                break;
            }
            self.pos += 1;
        }
    }

    fn remaining_from(&self, offset: usize) -> String {
        self.scalars[offset..].iter().collect()
    }

    /// Evaluates `grammar` at the cursor, building the full match tree.
    ///
    /// On failure the cursor is left where it was; the farthest failed
    /// attempt is recorded in `best_pos`/`best_expected`.
    fn tree(&mut self, grammar: &'g Grammar<L>) -> Option<Match<L>> {
        match grammar {
            Grammar::Str(string) => {
                let start = self.pos;

                if self.eat(grammar, string) {
                    Some(Match::token(string.clone(), Some(start..self.pos)))
                } else {
                    None
                }
            }
            Grammar::Charset(set) => match self.scalars.get(self.pos) {
                Some(&scalar) if set.contains(scalar) => {
                    let offset = self.pos;
                    self.pos += 1;

                    Some(Match::token(scalar.to_string(), Some(offset..offset + 1)))
                }
                _ => {
                    self.fail(grammar);
                    None
                }
            },
            Grammar::Choice(alternatives) => {
                let start = self.pos;

                for alternative in alternatives {
                    if let Some(tree) = self.tree(alternative) {
                        if self.pos > start {
                            return Some(tree);
                        }
                        // A success that consumed nothing does not count as
                        // a match; later alternatives still get their turn.
                        self.pos = start;
                    }
                }

                self.fail(grammar);
                None
            }
            Grammar::Seq(terms) => {
                let start = self.pos;
                let mut children = Vec::with_capacity(terms.len());

                for term in terms {
                    match self.tree(term) {
                        Some(tree) => splice(&mut children, tree),
                        None => {
                            self.pos = start;
                            return None;
                        }
                    }
                }

                Some(Match::node(None, children))
            }
            Grammar::Opt(term) => match self.tree(term) {
                Some(tree) => Some(tree),
                None => Some(Match::node(None, vec![])),
            },
            Grammar::Rep(term) => {
                if let Grammar::Charset(set) = &**term {
                    let start = self.pos;
                    self.eat_class(set);

                    let children = (start..self.pos)
                        .map(|offset| {
                            Match::token(self.scalars[offset].to_string(), Some(offset..offset + 1))
                        })
                        .collect();

                    return Some(Match::node(None, children));
                }

                let mut children = Vec::new();

                loop {
                    let start = self.pos;
                    match self.tree(term) {
                        // An iteration that does not advance the cursor
                        // would repeat forever; stop instead.
                        Some(tree) if self.pos > start => splice(&mut children, tree),
                        _ => break,
                    }
                }

                Some(Match::node(None, children))
            }
            Grammar::Flatten(term) => {
                let start = self.pos;
                let text = self.text(term)?;
                let span = (self.pos > start).then(|| start..self.pos);

                Some(Match::token(text, span))
            }
            Grammar::Discard(term) => {
                if self.skip(term) {
                    Some(Match::node(None, vec![]))
                } else {
                    None
                }
            }
            Grammar::Replace(term, text) => {
                let start = self.pos;

                if self.skip(term) {
                    let span = (self.pos > start).then(|| start..self.pos);
                    Some(Match::token(text.clone(), span))
                } else {
                    None
                }
            }
            Grammar::Rule(label, term) => {
                self.env.insert(label.clone(), grammar);

                match self.tree(term)? {
                    Match::Node {
                        label: None,
                        children,
                    } => Some(Match::node(Some(label.clone()), children)),
                    // Tokens and already-labeled nodes become the sole
                    // child, so nested rules keep both labels.
                    tree => Some(Match::node(Some(label.clone()), vec![tree])),
                }
            }
            Grammar::Ref(label) => {
                let term = self.resolve(label);
                self.tree(term)
            }
        }
    }

    /// Evaluates `grammar` at the cursor, producing only the text it
    /// matches. Used under [`Grammar::Flatten`], where building the
    /// intermediate tree would be wasted work.
    fn text(&mut self, grammar: &'g Grammar<L>) -> Option<String> {
        match grammar {
            Grammar::Str(string) => {
                if self.eat(grammar, string) {
                    Some(string.clone())
                } else {
                    None
                }
            }
            Grammar::Charset(set) => match self.scalars.get(self.pos) {
                Some(&scalar) if set.contains(scalar) => {
                    self.pos += 1;
                    Some(scalar.to_string())
                }
                _ => {
                    self.fail(grammar);
                    None
                }
            },
            Grammar::Choice(alternatives) => {
                let start = self.pos;

                for alternative in alternatives {
                    if let Some(text) = self.text(alternative) {
                        if self.pos > start {
                            return Some(text);
                        }
                        self.pos = start;
                    }
                }

                self.fail(grammar);
                None
            }
            Grammar::Seq(terms) => {
                let start = self.pos;
                let mut text = String::new();

                for term in terms {
                    match self.text(term) {
                        Some(piece) => text.push_str(&piece),
                        None => {
                            self.pos = start;
                            return None;
                        }
                    }
                }

                Some(text)
            }
            Grammar::Opt(term) => Some(self.text(term).unwrap_or_default()),
            Grammar::Rep(term) => {
                if let Grammar::Charset(set) = &**term {
                    let start = self.pos;
                    self.eat_class(set);

                    return Some(self.scalars[start..self.pos].iter().collect());
                }

                let mut text = String::new();

                loop {
                    let start = self.pos;
                    match self.text(term) {
                        Some(piece) if self.pos > start => text.push_str(&piece),
                        _ => break,
                    }
                }

                Some(text)
            }
            Grammar::Flatten(term) => self.text(term),
            Grammar::Discard(term) => {
                if self.skip(term) {
                    Some(String::new())
                } else {
                    None
                }
            }
            Grammar::Replace(term, text) => {
                if self.skip(term) {
                    Some(text.clone())
                } else {
                    None
                }
            }
            Grammar::Rule(label, term) => {
                self.env.insert(label.clone(), grammar);
                self.text(term)
            }
            Grammar::Ref(label) => {
                let term = self.resolve(label);
                self.text(term)
            }
        }
    }

    /// Evaluates `grammar` at the cursor, keeping nothing but
    /// success/failure. Used under [`Grammar::Discard`] and
    /// [`Grammar::Replace`], and as the hot path of charset repetition.
    fn skip(&mut self, grammar: &'g Grammar<L>) -> bool {
        match grammar {
            Grammar::Str(string) => self.eat(grammar, string),
            Grammar::Charset(set) => match self.scalars.get(self.pos) {
                Some(&scalar) if set.contains(scalar) => {
                    self.pos += 1;
                    true
                }
                _ => {
                    self.fail(grammar);
                    false
                }
            },
            Grammar::Choice(alternatives) => {
                let start = self.pos;

                for alternative in alternatives {
                    if self.skip(alternative) {
                        if self.pos > start {
                            return true;
                        }
                        self.pos = start;
                    }
                }

                self.fail(grammar);
                false
            }
            Grammar::Seq(terms) => {
                let start = self.pos;

                for term in terms {
                    if !self.skip(term) {
                        self.pos = start;
                        return false;
                    }
                }

                true
            }
            Grammar::Opt(term) => {
                self.skip(term);
                true
            }
            Grammar::Rep(term) => {
                if let Grammar::Charset(set) = &**term {
                    self.eat_class(set);
                    return true;
                }

                loop {
                    let start = self.pos;
                    if !self.skip(term) || self.pos == start {
                        break;
                    }
                }

                true
            }
            Grammar::Flatten(term) | Grammar::Discard(term) | Grammar::Replace(term, _) => {
                self.skip(term)
            }
            Grammar::Rule(label, term) => {
                self.env.insert(label.clone(), grammar);
                self.skip(term)
            }
            Grammar::Ref(label) => {
                let term = self.resolve(label);
                self.skip(term)
            }
        }
    }
}

/// Appends `tree` to `children`, splicing the children of unlabeled nodes
/// directly into the parent. Tokens and labeled nodes are kept whole.
fn splice<L: Label>(children: &mut Vec<Match<L>>, tree: Match<L>) {
    match tree {
        Match::Node {
            label: None,
            children: inner,
        } => children.extend(inner),
        tree => children.push(tree),
    }
}
