//! Unit tests for the regex-backed text surface.

use fluentic::error::FluentError;
use fluentic::value::Value;
use fluentic::{each, wrap};
use rstest::rstest;

// =============================================================================
// Matching
// =============================================================================

#[rstest]
fn find_all_collects_non_overlapping_matches() {
    let found = wrap("bazfoobar").find_all("ba[rz]").unwrap();
    assert_eq!(
        found.unwrap(),
        Value::list([Value::text("baz"), Value::text("bar")])
    );
}

#[rstest]
fn find_all_with_no_matches_wraps_an_empty_list() {
    let found = wrap("foo").find_all("ba[rz]").unwrap();
    assert_eq!(found.unwrap(), Value::list([]));
}

#[rstest]
fn search_wraps_the_first_match_or_none() {
    assert_eq!(
        wrap("bazfoobar").search("foo").unwrap().unwrap(),
        Value::text("foo")
    );
    assert!(wrap("baz").search("qux").unwrap().unwrap().is_none());
}

#[rstest]
fn matches_anchors_at_the_start() {
    assert_eq!(
        wrap("bazfoo").matches("baz").unwrap().unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        wrap("foobaz").matches("baz").unwrap().unwrap(),
        Value::Bool(false)
    );
}

// =============================================================================
// Splitting and replacing
// =============================================================================

#[rstest]
fn split_cuts_around_matches() {
    let pieces = wrap("a1b22c").split("[0-9]+").unwrap();
    assert_eq!(
        pieces.unwrap(),
        Value::list([Value::text("a"), Value::text("b"), Value::text("c")])
    );
}

#[rstest]
fn replace_substitutes_every_match() {
    let replaced = wrap("a1b2").replace("[0-9]", "_").unwrap();
    assert_eq!(replaced.unwrap(), Value::text("a_b_"));
}

// =============================================================================
// Failure modes
// =============================================================================

#[rstest]
fn a_malformed_pattern_is_reported() {
    let error = wrap("anything").find_all("[unclosed").unwrap_err();
    assert!(matches!(error, FluentError::InvalidPattern(_)));
}

#[rstest]
fn text_operations_on_non_text_are_unsupported() {
    let error = wrap(42).find_all("4").unwrap_err();
    assert!(matches!(error, FluentError::UnsupportedOperation { .. }));
}

// =============================================================================
// End to end
// =============================================================================

#[rstest]
fn match_transform_and_rejoin_in_one_expression() {
    let result = wrap("bazfoobar")
        .find_all("ba[rz]")
        .unwrap()
        .map(each().method().named("upper").args(vec![]).unwrap())
        .unwrap()
        .sorted()
        .unwrap()
        .join("/")
        .unwrap();
    assert_eq!(result.unwrap(), Value::text("BAR/BAZ"));
}

#[rstest]
fn text_indexes_by_character() {
    assert_eq!(wrap("héllo").item(1).unwrap().unwrap(), Value::text("é"));
    assert_eq!(wrap("héllo").item(-1).unwrap().unwrap(), Value::text("o"));
}

#[rstest]
fn text_bound_methods_transform_content() {
    assert_eq!(
        wrap("  Hi  ")
            .attr("trim")
            .unwrap()
            .call(fluentic::args![])
            .unwrap()
            .unwrap(),
        Value::text("Hi")
    );
    assert_eq!(
        wrap("héllo")
            .attr("len")
            .unwrap()
            .call(fluentic::args![])
            .unwrap()
            .unwrap(),
        Value::Int(5)
    );
}
