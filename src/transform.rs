// bramble. Grammars as values
// Copyright (c) 2018 Dragoș Tiselice
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

use crate::error::Error;
use crate::tree::Match;
use crate::Label;

impl<L: Label> Match<L> {
    /// Folds the match tree into an application value.
    ///
    /// Tokens yield their text and unlabeled nodes yield the list of their
    /// children's yields, so a tree without labels folds into a nested list
    /// of strings mirroring its shape. At a labeled node, `reducer` is
    /// called with the label and the collected child values, and whatever
    /// it returns is yielded instead. A reducer may return `Ok(None)`;
    /// such a yield is skipped in the parent's value list.
    ///
    /// A reducer error aborts the fold. Errors built with
    /// [`Error::custom`] carry no offset; the fold pins them at the start
    /// of the node the reducer ran under before returning them.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bramble::{flatten, one_of, one_or_more, rule, Grammar};
    /// #[derive(Clone, Debug, PartialEq)]
    /// enum Value {
    ///     Text(String),
    ///     List(Vec<Value>),
    /// }
    ///
    /// impl From<String> for Value {
    ///     fn from(text: String) -> Value {
    ///         Value::Text(text)
    ///     }
    /// }
    ///
    /// impl From<Vec<Value>> for Value {
    ///     fn from(values: Vec<Value>) -> Value {
    ///         Value::List(values)
    ///     }
    /// }
    ///
    /// let number: Grammar<&str> = rule("number", flatten(one_or_more(one_of("0123456789"))));
    /// let tree = number.parse("906").unwrap();
    ///
    /// let value = tree.transform(|label, values| {
    ///     assert_eq!(*label, "number");
    ///     Ok(values.into_iter().next())
    /// });
    ///
    /// assert_eq!(value.unwrap(), Some(Value::Text("906".to_owned())));
    /// ```
    pub fn transform<V, F>(&self, mut reducer: F) -> Result<Option<V>, Error<L>>
    where
        V: From<String> + From<Vec<V>>,
        F: FnMut(&L, Vec<V>) -> Result<Option<V>, Error<L>>,
    {
        self.fold(&mut reducer)
    }

    fn fold<V, F>(&self, reducer: &mut F) -> Result<Option<V>, Error<L>>
    where
        V: From<String> + From<Vec<V>>,
        F: FnMut(&L, Vec<V>) -> Result<Option<V>, Error<L>>,
    {
        match self {
            Match::Token { text, .. } => Ok(Some(V::from(text.clone()))),
            Match::Node { label, children } => {
                let mut values = Vec::with_capacity(children.len());

                for child in children {
                    if let Some(value) = child.fold(reducer)? {
                        values.push(value);
                    }
                }

                match label {
                    Some(label) => reducer(label, values).map_err(|error| error.pin(self.span())),
                    None => Ok(Some(V::from(values))),
                }
            }
        }
    }
}
