// bramble. Grammars as values
// Copyright (c) 2018 Dragoș Tiselice
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! # bramble. Grammars as values
//!
//! bramble is a parser library where a grammar is an ordinary, inspectable,
//! comparable value. A [`Grammar`] is built out of literals, character sets,
//! and combinators, then run against an input string with
//! [`Grammar::parse`], which either produces a [`Match`] tree or an
//! [`Error`] pinned at the farthest point the match reached. A match tree
//! can in turn be folded into an application value with
//! [`Match::transform`].
//!
//! Rules are named with [`rule`] and may refer back to themselves (or to
//! any enclosing rule) with [`reference`], which is what makes recursive
//! grammars expressible as plain values.
//!
//! ```
//! use bramble::{lit, one_of, one_or_more, rule, seq};
//!
//! #[derive(Clone, Debug, Eq, Hash, PartialEq)]
//! enum Rule {
//!     Greeting,
//! }
//!
//! let word = one_or_more(one_of("abcdefghijklmnopqrstuvwxyz"));
//! let greeting = rule(Rule::Greeting, seq([lit("hello "), word]));
//!
//! let tree = greeting.parse("hello world").unwrap();
//! assert_eq!(tree.span(), Some(0..11));
//! ```
//!
//! The matcher is plain recursive backtracking: deterministic, with no
//! memoization, and worst-case exponential on pathological grammars. Inputs
//! are matched as sequences of unicode scalar values, and all spans are
//! half-open scalar-offset ranges.

#![doc(html_root_url = "https://docs.rs/bramble")]

use core::fmt::Debug;
use core::hash::Hash;

mod charset;
mod error;
mod grammar;
mod matcher;
mod transform;
mod tree;

pub use charset::CharSet;
pub use error::{Error, ErrorKind};
pub use grammar::{
    any, discard, flatten, interleaved, lit, none_of, one_of, one_or_more, opt, range, reference,
    replace, rule, seq, zero_or_more, Grammar,
};
pub use tree::Match;

/// A `trait` which label types must implement.
///
/// Labels name grammar rules and tag the nodes those rules produce; they are
/// typically a small `enum` or `&'static str`.
pub trait Label: Clone + Debug + Eq + Hash {}

impl<L: Clone + Debug + Eq + Hash> Label for L {}
