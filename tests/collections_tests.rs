//! Unit tests for the mapping and set surfaces and the built-in bound
//! methods of the collection categories.

use fluentic::error::FluentError;
use fluentic::value::Value;
use fluentic::{args, wrap};
use rstest::rstest;

fn inventory() -> Value {
    Value::map([
        (Value::text("apples"), Value::Int(3)),
        (Value::text("pears"), Value::Int(5)),
    ])
}

// =============================================================================
// Mapping surface
// =============================================================================

#[rstest]
fn keys_values_and_items_come_back_as_lists() {
    let node = wrap(inventory());
    assert_eq!(
        node.keys().unwrap().unwrap(),
        Value::list([Value::text("apples"), Value::text("pears")])
    );
    assert_eq!(
        node.values().unwrap().unwrap(),
        Value::list([Value::Int(3), Value::Int(5)])
    );
    assert_eq!(
        node.items().unwrap().unwrap(),
        Value::list([
            Value::list([Value::text("apples"), Value::Int(3)]),
            Value::list([Value::text("pears"), Value::Int(5)]),
        ])
    );
}

#[rstest]
fn get_falls_back_to_the_default() {
    let node = wrap(inventory());
    assert_eq!(node.get("apples", 0).unwrap().unwrap(), Value::Int(3));
    assert_eq!(node.get("plums", 0).unwrap().unwrap(), Value::Int(0));
}

#[rstest]
fn mapping_operations_on_a_list_are_unsupported() {
    let error = wrap(Value::list([])).keys().unwrap_err();
    assert!(matches!(error, FluentError::UnsupportedOperation { .. }));
}

#[rstest]
fn mapping_mutators_cascade() {
    let node = wrap(inventory());
    let after = node
        .attr("insert")
        .unwrap()
        .call(args!["plums", 1])
        .unwrap()
        .this();
    assert_eq!(
        after.keys().unwrap().unwrap(),
        Value::list([
            Value::text("apples"),
            Value::text("pears"),
            Value::text("plums"),
        ])
    );
}

#[rstest]
fn removing_a_missing_key_fails() {
    let error = wrap(inventory())
        .attr("remove")
        .unwrap()
        .call(args!["plums"])
        .unwrap_err();
    assert!(matches!(error, FluentError::MissingItem { .. }));
}

// =============================================================================
// Set surface
// =============================================================================

#[rstest]
fn set_membership_is_direct() {
    let node = wrap(Value::set([Value::Int(1), Value::Int(2)]));
    assert_eq!(node.contains(1).unwrap().unwrap(), Value::Bool(true));
    assert_eq!(node.contains(9).unwrap().unwrap(), Value::Bool(false));
}

#[rstest]
fn set_insert_deduplicates() {
    let node = wrap(Value::set([Value::Int(1)]));
    node.attr("insert").unwrap().call(args![1]).unwrap();
    node.attr("insert").unwrap().call(args![2]).unwrap();
    assert_eq!(node.len().unwrap().unwrap(), Value::Int(2));
}

#[rstest]
fn sets_iterate_in_value_order() {
    let node = wrap(Value::set([Value::Int(3), Value::Int(1), Value::Int(2)]));
    assert_eq!(
        node.freeze().unwrap().unwrap(),
        Value::list([Value::Int(1), Value::Int(2), Value::Int(3)])
    );
}

#[rstest]
fn contains_on_a_non_set_is_unsupported() {
    let error = wrap(Value::list([])).contains(1).unwrap_err();
    assert!(matches!(error, FluentError::UnsupportedOperation { .. }));
}

// =============================================================================
// List bound methods
// =============================================================================

#[rstest]
fn insert_places_at_a_position() {
    let node = wrap(Value::list([Value::Int(1), Value::Int(3)]));
    node.attr("insert").unwrap().call(args![1, 2]).unwrap();
    assert_eq!(
        node.unwrap(),
        Value::list([Value::Int(1), Value::Int(2), Value::Int(3)])
    );
}

#[rstest]
fn insert_out_of_bounds_fails() {
    let error = wrap(Value::list([]))
        .attr("insert")
        .unwrap()
        .call(args![5, Value::Int(0)])
        .unwrap_err();
    assert!(matches!(error, FluentError::MissingItem { .. }));
}

#[rstest]
fn remove_deletes_the_first_occurrence() {
    let node = wrap(Value::list([Value::Int(1), Value::Int(2), Value::Int(1)]));
    node.attr("remove").unwrap().call(args![1]).unwrap();
    assert_eq!(node.unwrap(), Value::list([Value::Int(2), Value::Int(1)]));
}

#[rstest]
fn extend_appends_another_collection() {
    let node = wrap(Value::list([Value::Int(1)]));
    node.attr("extend")
        .unwrap()
        .call(args![Value::list([Value::Int(2), Value::Int(3)])])
        .unwrap();
    assert_eq!(
        node.unwrap(),
        Value::list([Value::Int(1), Value::Int(2), Value::Int(3)])
    );
}

#[rstest]
fn extend_with_a_scalar_is_unsupported() {
    let error = wrap(Value::list([]))
        .attr("extend")
        .unwrap()
        .call(args![7])
        .unwrap_err();
    assert!(matches!(error, FluentError::UnsupportedOperation { .. }));
}

#[rstest]
fn bound_methods_see_later_mutations() {
    // A bound method holds the shared storage, not a snapshot.
    let node = wrap(Value::list([Value::Int(1)]));
    let length = node.attr("len").unwrap();
    node.attr("push").unwrap().call(args![2]).unwrap();
    assert_eq!(length.call(args![]).unwrap().unwrap(), Value::Int(2));
}

#[rstest]
fn method_arity_failures_report_counts() {
    let error = wrap(Value::list([]))
        .attr("push")
        .unwrap()
        .call(args![])
        .unwrap_err();
    assert!(matches!(
        error,
        FluentError::InsufficientArguments {
            required: 1,
            received: 0,
        }
    ));
}
