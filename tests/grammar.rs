// bramble. Grammars as values
// Copyright (c) 2018 Dragoș Tiselice
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

use pretty_assertions::assert_eq;

use bramble::{
    any, discard, flatten, interleaved, lit, one_of, one_or_more, opt, range, reference, replace,
    rule, seq, zero_or_more, ErrorKind, Grammar, Match,
};

fn token(text: &str, start: usize, end: usize) -> Match<&'static str> {
    Match::token(text, Some(start..end))
}

fn node(children: Vec<Match<&'static str>>) -> Match<&'static str> {
    Match::node(None, children)
}

#[test]
fn literal() {
    let grammar: Grammar<&str> = lit("foo");

    assert_eq!(grammar.parse("foo").unwrap(), token("foo", 0, 3));
}

#[test]
fn literal_offsets_are_scalars_not_bytes() {
    let grammar: Grammar<&str> = seq([lit("héllo"), lit("!")]);

    assert_eq!(
        grammar.parse("héllo!").unwrap(),
        node(vec![token("héllo", 0, 5), token("!", 5, 6)])
    );
}

#[test]
fn charset() {
    let grammar: Grammar<&str> = range('a'..='c');

    assert_eq!(grammar.parse("a").unwrap(), token("a", 0, 1));

    let error = grammar.parse("d").unwrap_err();

    assert!(matches!(error.kind, ErrorKind::Expected(_)));
    assert_eq!(error.offset, Some(0));
    assert_eq!(error.remaining, "d");
}

#[test]
fn sequence_splices_tokens() {
    let grammar: Grammar<&str> = seq([lit("a"), lit("b")]);

    assert_eq!(
        grammar.parse("ab").unwrap(),
        node(vec![token("a", 0, 1), token("b", 1, 2)])
    );
}

#[test]
fn sequence_splices_unlabeled_nodes() {
    let grammar: Grammar<&str> = seq([seq([lit("a"), lit("b")]), lit("c")]);

    assert_eq!(
        grammar.parse("abc").unwrap(),
        node(vec![token("a", 0, 1), token("b", 1, 2), token("c", 2, 3)])
    );
}

#[test]
fn sequence_keeps_labeled_nodes_whole() {
    let grammar: Grammar<&str> = seq([rule("ab", seq([lit("a"), lit("b")])), lit("c")]);

    assert_eq!(
        grammar.parse("abc").unwrap(),
        node(vec![
            Match::node(Some("ab"), vec![token("a", 0, 1), token("b", 1, 2)]),
            token("c", 2, 3),
        ])
    );
}

#[test]
fn optional_present() {
    let grammar: Grammar<&str> = seq([opt(lit("foo")), lit("bar")]);

    assert_eq!(
        grammar.parse("foobar").unwrap(),
        node(vec![token("foo", 0, 3), token("bar", 3, 6)])
    );
}

#[test]
fn optional_missing() {
    let grammar: Grammar<&str> = seq([opt(lit("foo")), lit("bar")]);

    assert_eq!(grammar.parse("bar").unwrap(), node(vec![token("bar", 0, 3)]));
}

#[test]
fn optional_on_empty_input() {
    let grammar: Grammar<&str> = opt(lit("foo"));

    assert_eq!(grammar.parse("").unwrap(), node(vec![]));
}

#[test]
fn repetition_zero_occurrences() {
    let grammar: Grammar<&str> = zero_or_more(lit("x"));

    assert_eq!(grammar.parse("").unwrap(), node(vec![]));
}

#[test]
fn repetition_accumulates() {
    let grammar: Grammar<&str> = zero_or_more(lit("xy"));

    assert_eq!(
        grammar.parse("xyxy").unwrap(),
        node(vec![token("xy", 0, 2), token("xy", 2, 4)])
    );
}

#[test]
fn repetition_terminates_on_empty_iteration() {
    let grammar: Grammar<&str> = zero_or_more(opt(lit("x")));

    assert_eq!(grammar.parse("").unwrap(), node(vec![]));
}

#[test]
fn repetition_charset_fast_path_parity() {
    let grammar: Grammar<&str> = zero_or_more(one_of("ab"));

    assert_eq!(
        grammar.parse("abba").unwrap(),
        node(vec![
            token("a", 0, 1),
            token("b", 1, 2),
            token("b", 2, 3),
            token("a", 3, 4),
        ])
    );
}

#[test]
fn choice_ordered() {
    let grammar: Grammar<&str> = any([lit("foo"), lit("bar")]);

    assert_eq!(grammar.parse("bar").unwrap(), token("bar", 0, 3));
    assert_eq!(grammar.parse("foo").unwrap(), token("foo", 0, 3));
}

#[test]
fn choice_prefers_first_consumer() {
    let grammar: Grammar<&str> = any([lit("foo"), lit("foobar")]);

    assert_eq!(grammar.parse("foo").unwrap(), token("foo", 0, 3));
    // The first alternative wins and the rest of the input is left over.
    assert!(grammar.parse("foobar").is_err());
}

#[test]
fn choice_skips_zero_width_alternatives() {
    let grammar: Grammar<&str> = any([opt(lit("x")), lit("y")]);

    assert_eq!(grammar.parse("y").unwrap(), token("y", 0, 1));
}

#[test]
fn choice_on_empty_input() {
    let grammar: Grammar<&str> = any([lit("foo"), lit("bar")]);
    let error = grammar.parse("").unwrap_err();

    assert!(matches!(error.kind, ErrorKind::Expected(_)));
    assert_eq!(error.offset, Some(0));
}

#[test]
fn flatten_concatenates_leaves() {
    let grammar: Grammar<&str> = flatten(seq([lit("foo"), lit("bar")]));

    assert_eq!(grammar.parse("foobar").unwrap(), token("foobar", 0, 6));
}

#[test]
fn flatten_over_empty_match_has_no_span() {
    let grammar: Grammar<&str> = flatten(opt(lit("foo")));

    assert_eq!(grammar.parse("").unwrap(), Match::token("", None));
}

#[test]
fn flatten_uses_produced_text() {
    // Replaced text counts as leaf content even when it differs from the
    // consumed input.
    let grammar: Grammar<&str> = flatten(seq([lit("a"), replace(lit("b"), "R")]));

    assert_eq!(grammar.parse("ab").unwrap(), token("aR", 0, 2));
}

#[test]
fn flatten_skips_discarded_content() {
    let grammar: Grammar<&str> = flatten(seq([lit("a"), discard(lit("b")), lit("c")]));

    assert_eq!(grammar.parse("abc").unwrap(), token("ac", 0, 3));
}

#[test]
fn discard_produces_empty_node() {
    let grammar: Grammar<&str> = discard(lit("foo"));

    assert_eq!(grammar.parse("foo").unwrap(), node(vec![]));
    assert!(grammar.parse("bar").is_err());
}

#[test]
fn replace_substitutes_text() {
    let grammar: Grammar<&str> = replace(lit("foo"), "R");

    assert_eq!(grammar.parse("foo").unwrap(), token("R", 0, 3));
}

#[test]
fn replace_over_empty_match_has_no_span() {
    let grammar: Grammar<&str> = replace(opt(lit("foo")), "R");

    assert_eq!(grammar.parse("").unwrap(), Match::token("R", None));
}

#[test]
fn rule_labels_unlabeled_result() {
    let grammar: Grammar<&str> = rule("pair", seq([lit("a"), lit("b")]));

    assert_eq!(
        grammar.parse("ab").unwrap(),
        Match::node(Some("pair"), vec![token("a", 0, 1), token("b", 1, 2)])
    );
}

#[test]
fn rule_wraps_token() {
    let grammar: Grammar<&str> = rule("word", lit("a"));

    assert_eq!(
        grammar.parse("a").unwrap(),
        Match::node(Some("word"), vec![token("a", 0, 1)])
    );
}

#[test]
fn rule_wraps_labeled_node() {
    // Nested rules keep both labels, the inner node becoming the sole
    // child of the outer one.
    let grammar: Grammar<&str> = rule("outer", rule("inner", lit("a")));

    assert_eq!(
        grammar.parse("a").unwrap(),
        Match::node(
            Some("outer"),
            vec![Match::node(Some("inner"), vec![token("a", 0, 1)])]
        )
    );
}

#[test]
fn reference_recurses() {
    let grammar: Grammar<&str> = rule(
        "parens",
        seq([lit("("), opt(reference("parens")), lit(")")]),
    );

    assert_eq!(
        grammar.parse("(())").unwrap(),
        Match::node(
            Some("parens"),
            vec![
                token("(", 0, 1),
                Match::node(Some("parens"), vec![token("(", 1, 2), token(")", 2, 3)]),
                token(")", 3, 4),
            ]
        )
    );
}

#[test]
#[should_panic(expected = "undefined rule reference")]
fn unbound_reference_panics() {
    let grammar: Grammar<&str> = reference("nowhere");

    let _ = grammar.parse("x");
}

#[test]
fn one_or_more_requires_one() {
    let grammar: Grammar<&str> = one_or_more(lit("foo"));

    assert_eq!(
        grammar.parse("foofoo").unwrap(),
        node(vec![token("foo", 0, 3), token("foo", 3, 6)])
    );
    assert!(grammar.parse("").is_err());
}

#[test]
fn interleaved_keeps_separators() {
    let grammar: Grammar<&str> = interleaved(lit("x"), lit(","));

    assert_eq!(
        grammar.parse("x,x,x").unwrap(),
        node(vec![
            token("x", 0, 1),
            token(",", 1, 2),
            token("x", 2, 3),
            token(",", 3, 4),
            token("x", 4, 5),
        ])
    );
    assert_eq!(grammar.parse("x").unwrap(), node(vec![token("x", 0, 1)]));
}

#[test]
fn trailing_input_is_rejected() {
    let grammar: Grammar<&str> = lit("foo");
    let error = grammar.parse("foobar").unwrap_err();

    assert!(matches!(error.kind, ErrorKind::UnexpectedToken));
    assert_eq!(error.remaining, "bar");
    assert_eq!(error.offset, Some(3));
}

#[test]
fn failure_is_pinned_at_farthest_progress() {
    let grammar: Grammar<&str> = seq([lit("foo"), lit("bar")]);
    let error = grammar.parse("foobaz").unwrap_err();

    match error.kind {
        ErrorKind::Expected(expected) => assert_eq!(expected, lit("bar")),
        kind => panic!("unexpected error kind {:?}", kind),
    }
    assert_eq!(error.offset, Some(5));
    assert_eq!(error.remaining, "z");
}

#[test]
fn trailing_input_defers_to_farther_failure() {
    // The optional's failed attempt reached offset 5; reporting it beats
    // complaining about the whole input being left over at offset 0.
    let grammar: Grammar<&str> = opt(lit("foobar"));
    let error = grammar.parse("foobaz").unwrap_err();

    match error.kind {
        ErrorKind::Expected(expected) => assert_eq!(expected, lit("foobar")),
        kind => panic!("unexpected error kind {:?}", kind),
    }
    assert_eq!(error.offset, Some(5));
}

#[test]
fn empty_input_against_literal() {
    let grammar: Grammar<&str> = lit("foo");
    let error = grammar.parse("").unwrap_err();

    assert!(matches!(error.kind, ErrorKind::Expected(_)));
    assert_eq!(error.offset, Some(0));
    assert_eq!(error.remaining, "");
}
