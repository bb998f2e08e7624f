// bramble. Grammars as values
// Copyright (c) 2018 Dragoș Tiselice
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

use core::fmt;
use core::iter;
use core::ops::Range;
use std::error;

use crate::grammar::Grammar;
use crate::Label;

/// An error produced by matching or transforming.
///
/// Carries what went wrong, the unmatched remainder of the input, and the
/// scalar offset the failure was pinned at. Errors raised by reducers start
/// without an offset; [`Match::transform`](crate::Match::transform) fills
/// it in from the node the reducer was running under.
#[derive(Debug)]
pub struct Error<L: Label> {
    /// What went wrong.
    pub kind: ErrorKind<L>,
    /// The unmatched remainder of the input.
    pub remaining: String,
    /// The scalar offset the error is pinned at.
    pub offset: Option<usize>,
}

/// The kinds of [`Error`].
#[derive(Debug)]
pub enum ErrorKind<L: Label> {
    /// The matcher exhausted its options; carries the subterm expected at
    /// the farthest point any attempt reached.
    Expected(Grammar<L>),
    /// The top-level term matched, but input remained.
    UnexpectedToken,
    /// An application error raised by a reducer.
    Custom(Box<dyn error::Error + Send + Sync>),
}

impl<L: Label> Error<L> {
    /// Wraps an application error for returning out of a reducer.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bramble::Error;
    /// let error: Error<()> = Error::custom("number out of range");
    ///
    /// assert_eq!(error.offset, None);
    /// ```
    pub fn custom(err: impl Into<Box<dyn error::Error + Send + Sync>>) -> Error<L> {
        Error {
            kind: ErrorKind::Custom(err.into()),
            remaining: String::new(),
            offset: None,
        }
    }

    /// Pins the error at the start of `span` when it has no offset yet.
    pub(crate) fn pin(mut self, span: Option<Range<usize>>) -> Error<L> {
        if self.offset.is_none() {
            self.offset = span.map(|span| span.start);
        }

        self
    }

    /// The offending token at the failure site: the first scalar when it is
    /// whitespace, otherwise the longest run of non-whitespace scalars.
    fn token(&self) -> String {
        let mut scalars = self.remaining.chars();

        match scalars.next() {
            Some(first) if first.is_whitespace() => first.to_string(),
            Some(first) => iter::once(first)
                .chain(scalars.take_while(|scalar| !scalar.is_whitespace()))
                .collect(),
            None => String::new(),
        }
    }
}

impl<L: Label> fmt::Display for Error<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::Expected(expected) => {
                if self.remaining.is_empty() {
                    write!(f, "Expected {}", expected)
                } else {
                    write!(
                        f,
                        "Unexpected token {:?} (expected {}) at {}",
                        self.token(),
                        expected,
                        self.offset.unwrap_or(0)
                    )
                }
            }
            ErrorKind::UnexpectedToken => write!(
                f,
                "Unexpected token {:?} at {}",
                self.token(),
                self.offset.unwrap_or(0)
            ),
            ErrorKind::Custom(inner) => match self.offset {
                Some(offset) => write!(f, "{} at {}", inner, offset),
                None => write!(f, "{}", inner),
            },
        }
    }
}

impl<L: Label> error::Error for Error<L> {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match &self.kind {
            ErrorKind::Custom(inner) => {
                let inner: &(dyn error::Error + 'static) = &**inner;
                Some(inner)
            }
            _ => None,
        }
    }
}
