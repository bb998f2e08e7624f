// bramble. Grammars as values
// Copyright (c) 2018 Dragoș Tiselice
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

use core::char;
use core::fmt;
use core::ops::RangeInclusive;

/// An immutable set of unicode scalar values.
///
/// Sets are kept in canonical form (sorted, disjoint, coalesced inclusive
/// ranges), so two sets compare equal exactly when they contain the same
/// scalars, regardless of how they were built.
///
/// # Examples
///
/// ```
/// # use bramble::CharSet;
/// let lower = CharSet::range('a'..='z');
///
/// assert!(lower.contains('q'));
/// assert!(!lower.contains('Q'));
/// assert_eq!(CharSet::of("cba"), CharSet::range('a'..='c'));
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct CharSet {
    ranges: Vec<(char, char)>,
}

impl CharSet {
    /// Creates a set containing a single scalar.
    pub fn single(scalar: char) -> CharSet {
        CharSet {
            ranges: vec![(scalar, scalar)],
        }
    }

    /// Creates a set containing every scalar in a closed range.
    ///
    /// # Panics
    ///
    /// Panics if the range is reversed; a reversed range is a bug in the
    /// grammar under construction, not a matchable set.
    pub fn range(range: RangeInclusive<char>) -> CharSet {
        let (start, end) = range.into_inner();
        assert!(start <= end, "reversed scalar range {:?}..={:?}", start, end);

        CharSet::normalize(vec![(start, end)])
    }

    /// Creates a set containing exactly the scalars of `chars`.
    pub fn of(chars: &str) -> CharSet {
        CharSet::normalize(chars.chars().map(|c| (c, c)).collect())
    }

    /// Creates the set of every scalar *not* in `chars`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bramble::CharSet;
    /// let not_quote = CharSet::except("\"\\");
    ///
    /// assert!(not_quote.contains('a'));
    /// assert!(!not_quote.contains('"'));
    /// ```
    pub fn except(chars: &str) -> CharSet {
        CharSet::of(chars).complement()
    }

    /// Returns `true` when the set contains `scalar`.
    #[inline]
    pub fn contains(&self, scalar: char) -> bool {
        let index = self.ranges.partition_point(|&(_, end)| end < scalar);

        match self.ranges.get(index) {
            Some(&(start, _)) => start <= scalar,
            None => false,
        }
    }

    /// Returns the union of two sets.
    pub fn union(&self, other: &CharSet) -> CharSet {
        let mut ranges = self.ranges.clone();
        ranges.extend_from_slice(&other.ranges);

        CharSet::normalize(ranges)
    }

    fn complement(&self) -> CharSet {
        let mut ranges = Vec::with_capacity(self.ranges.len() + 1);
        let mut next = Some('\0');

        for &(start, end) in &self.ranges {
            if let Some(from) = next {
                if from < start {
                    ranges.push((from, scalar_before(start)));
                }
            }
            next = scalar_after(end);
        }

        if let Some(from) = next {
            ranges.push((from, char::MAX));
        }

        CharSet { ranges }
    }

    /// Sorts, merges overlapping and adjacent ranges. Adjacency steps over
    /// the surrogate gap, so `'\u{D7FF}'` and `'\u{E000}'` coalesce.
    fn normalize(mut ranges: Vec<(char, char)>) -> CharSet {
        ranges.sort_unstable();

        let mut merged: Vec<(char, char)> = Vec::with_capacity(ranges.len());

        for (start, end) in ranges {
            match merged.last_mut() {
                Some(last) if scalar_after(last.1).map_or(true, |next| start <= next) => {
                    last.1 = last.1.max(end);
                }
                _ => merged.push((start, end)),
            }
        }

        CharSet { ranges: merged }
    }
}

impl fmt::Display for CharSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &(start, end)) in self.ranges.iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }

            if start == end {
                write!(f, "{:?}", start)?;
            } else {
                write!(f, "{:?}..={:?}", start, end)?;
            }
        }

        Ok(())
    }
}

/// The scalar directly after `scalar`, skipping the surrogate gap.
fn scalar_after(scalar: char) -> Option<char> {
    match scalar {
        '\u{D7FF}' => Some('\u{E000}'),
        char::MAX => None,
        _ => char::from_u32(scalar as u32 + 1),
    }
}

/// The scalar directly before `scalar`, skipping the surrogate gap.
fn scalar_before(scalar: char) -> char {
    match scalar {
        '\u{E000}' => '\u{D7FF}',
        '\0' => '\0',
        _ => char::from_u32(scalar as u32 - 1).expect("scalar has no predecessor"),
    }
}
