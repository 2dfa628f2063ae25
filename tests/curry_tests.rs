//! Unit tests for placeholder currying and composition.
//!
//! Tests cover:
//! - Left-filling holes and explicit index reordering
//! - Variadic collection and the variadic-last contract
//! - Arity failures and keyword handling
//! - Function composition

use fluentic::error::FluentError;
use fluentic::value::{Arguments, NativeFunction, Value};
use fluentic::{args, template, wrap};
use rstest::rstest;

/// Joins its positional arguments with `-`; the keyword argument `prefix`
/// (if present) is prepended.
fn join() -> NativeFunction {
    NativeFunction::new("join", |arguments: Arguments| {
        let mut rendered: Vec<String> = arguments
            .positional()
            .iter()
            .map(ToString::to_string)
            .collect();
        if let Some(prefix) = arguments.keyword("prefix") {
            rendered.insert(0, prefix.to_string());
        }
        Ok(Some(Value::text(rendered.join("-"))))
    })
}

// =============================================================================
// Holes
// =============================================================================

#[rstest]
fn hole_left_fills_from_the_actuals() {
    let curried = wrap(join()).curry(template![__, "foo"]).unwrap();
    let result = curried.call(args!["bar"]).unwrap();
    assert_eq!(result.unwrap(), Value::text("bar-foo"));
}

#[rstest]
fn holes_fill_in_template_order_regardless_of_position() {
    let curried = wrap(join()).curry(template!["a", __, "c", __]).unwrap();
    let result = curried.call(args!["b", "d"]).unwrap();
    assert_eq!(result.unwrap(), Value::text("a-b-c-d"));
}

#[rstest]
fn currying_twice_narrows_the_signature() {
    let once = wrap(join()).curry(template![__, __, "z"]).unwrap();
    let twice = once.curry(template!["x", __]).unwrap();
    let result = twice.call(args!["y"]).unwrap();
    assert_eq!(result.unwrap(), Value::text("x-y-z"));
}

// =============================================================================
// Indexed placeholders
// =============================================================================

#[rstest]
fn indexed_placeholders_reorder_the_actuals() {
    let curried = wrap(join()).curry(template![#1, #0]).unwrap();
    let result = curried.call(args!["first", "second"]).unwrap();
    assert_eq!(result.unwrap(), Value::text("second-first"));
}

#[rstest]
fn indexed_placeholders_can_duplicate_an_actual() {
    let curried = wrap(join()).curry(template![#0, #0]).unwrap();
    let result = curried.call(args!["echo"]).unwrap();
    assert_eq!(result.unwrap(), Value::text("echo-echo"));
}

#[rstest]
fn indexed_placeholders_do_not_advance_the_hole_cursor() {
    // The hole still takes the first actual even though #1 already read
    // the second.
    let curried = wrap(join()).curry(template![#1, __]).unwrap();
    let result = curried.call(args!["a", "b"]).unwrap();
    assert_eq!(result.unwrap(), Value::text("b-a"));
}

// =============================================================================
// Variadic placeholder
// =============================================================================

#[rstest]
fn rest_collects_remaining_actuals_into_one_list() {
    let first_and_rest = NativeFunction::new("first_and_rest", |arguments: Arguments| {
        Ok(Some(Value::list(arguments.positional().to_vec())))
    });
    let curried = wrap(first_and_rest).curry(template![__, _args]).unwrap();
    let result = curried.call(args![1, 2, 3]).unwrap();
    assert_eq!(
        result.unwrap(),
        Value::list([
            Value::Int(1),
            Value::list([Value::Int(2), Value::Int(3)]),
        ])
    );
}

#[rstest]
fn rest_before_another_placeholder_fails_at_curry_time() {
    let template = fluentic::curry::Template::new().rest().hole();
    let error = wrap(join()).curry(template).unwrap_err();
    assert!(matches!(error, FluentError::MisplacedVariadicPlaceholder));
}

#[rstest]
fn rest_before_a_literal_fails_at_curry_time() {
    let template = fluentic::curry::Template::new().rest().value("tail");
    let error = wrap(join()).curry(template).unwrap_err();
    assert!(matches!(error, FluentError::MisplacedVariadicPlaceholder));
}

// =============================================================================
// Arity
// =============================================================================

#[rstest]
fn too_few_actuals_for_the_holes_is_an_arity_failure() {
    let curried = wrap(join()).curry(template![__, __]).unwrap();
    let error = curried.call(args!["only"]).unwrap_err();
    assert!(matches!(
        error,
        FluentError::InsufficientArguments {
            required: 2,
            received: 1,
        }
    ));
}

#[rstest]
fn an_index_beyond_the_actuals_is_an_arity_failure() {
    let curried = wrap(join()).curry(template![#3]).unwrap();
    let error = curried.call(args!["a"]).unwrap_err();
    assert!(matches!(
        error,
        FluentError::InsufficientArguments {
            required: 4,
            received: 1,
        }
    ));
}

#[rstest]
fn leftover_actuals_are_appended_not_dropped() {
    let curried = wrap(join()).curry(template!["head", __]).unwrap();
    let result = curried.call(args!["a", "b", "c"]).unwrap();
    assert_eq!(result.unwrap(), Value::text("head-a-b-c"));
}

// =============================================================================
// Keywords
// =============================================================================

#[rstest]
fn keyword_slots_carry_literal_defaults() {
    let curried = wrap(join())
        .curry(template![__; prefix = ">"])
        .unwrap();
    let result = curried.call(args!["x"]).unwrap();
    assert_eq!(result.unwrap(), Value::text(">-x"));
}

#[rstest]
fn call_time_keywords_override_template_defaults() {
    let curried = wrap(join())
        .curry(template![__; prefix = ">"])
        .unwrap();
    let result = curried.call(args!["x"; prefix = "<"]).unwrap();
    assert_eq!(result.unwrap(), Value::text("<-x"));
}

#[rstest]
fn an_overridden_keyword_hole_consumes_no_actual() {
    // With the hole overridden, the single actual goes to the leftover
    // append instead of the keyword.
    let curried = wrap(join())
        .curry(template![; prefix = __])
        .unwrap();
    let result = curried.call(args!["spare"; prefix = "fixed"]).unwrap();
    assert_eq!(result.unwrap(), Value::text("fixed-spare"));
}

#[rstest]
fn keyword_holes_fill_from_the_shared_cursor() {
    let curried = wrap(join())
        .curry(template![__; prefix = __])
        .unwrap();
    let result = curried.call(args!["body", "lead"]).unwrap();
    assert_eq!(result.unwrap(), Value::text("lead-body"));
}

// =============================================================================
// Non-callables and composition
// =============================================================================

#[rstest]
fn currying_a_non_callable_is_unsupported() {
    let error = wrap(42).curry(template![__]).unwrap_err();
    assert!(matches!(error, FluentError::UnsupportedOperation { .. }));
}

#[rstest]
fn compose_applies_outer_after_inner() {
    let double = NativeFunction::unary("double", |value| match value {
        Value::Int(number) => Ok(Value::Int(number * 2)),
        other => Ok(other),
    });
    let increment = NativeFunction::unary("increment", |value| match value {
        Value::Int(number) => Ok(Value::Int(number + 1)),
        other => Ok(other),
    });
    let composed = wrap(double).compose(increment).unwrap();
    // increment(double(5)) == 11, not double(increment(5)) == 12.
    assert_eq!(composed.call(args![5]).unwrap().unwrap(), Value::Int(11));
}

#[rstest]
fn compose_rejects_a_non_callable_outer() {
    let error = wrap(join()).compose(Value::Int(1)).unwrap_err();
    assert!(matches!(error, FluentError::NotCallable { .. }));
}
