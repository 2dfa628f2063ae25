//! Operator semantics over raw values.
//!
//! Used by the combinator builder's operator terminals. Arithmetic promotes
//! int to float on mixed operands; `add` also concatenates text and lists.
//! Integer arithmetic is checked, overflow is
//! [`FluentError::ArithmeticOverflow`]; anything else is an
//! [`FluentError::UnsupportedOperation`].

use crate::capability::classify;
use crate::error::FluentError;
use crate::value::Value;

fn unsupported(operation: &'static str, value: &Value) -> FluentError {
    FluentError::UnsupportedOperation {
        operation,
        capability: classify(value),
    }
}

#[allow(clippy::cast_precision_loss)]
fn as_float(value: &Value) -> Option<f64> {
    match value {
        Value::Int(value) => Some(*value as f64),
        Value::Float(value) => Some(*value),
        _ => None,
    }
}

fn overflow(operation: &'static str) -> FluentError {
    FluentError::ArithmeticOverflow { operation }
}

pub(crate) fn add(left: &Value, right: &Value) -> Result<Value, FluentError> {
    match (left, right) {
        (Value::Int(first), Value::Int(second)) => first
            .checked_add(*second)
            .map(Value::Int)
            .ok_or_else(|| overflow("add")),
        (Value::Text(first), Value::Text(second)) => {
            Ok(Value::text(format!("{first}{second}")))
        }
        (Value::List(first), Value::List(second)) => {
            let mut combined = first.borrow().clone();
            combined.extend(second.borrow().iter().cloned());
            Ok(Value::from(combined))
        }
        (first, second) => match (as_float(first), as_float(second)) {
            (Some(first), Some(second)) => Ok(Value::Float(first + second)),
            _ => Err(unsupported("add", left)),
        },
    }
}

pub(crate) fn subtract(left: &Value, right: &Value) -> Result<Value, FluentError> {
    match (left, right) {
        (Value::Int(first), Value::Int(second)) => first
            .checked_sub(*second)
            .map(Value::Int)
            .ok_or_else(|| overflow("subtract")),
        (first, second) => match (as_float(first), as_float(second)) {
            (Some(first), Some(second)) => Ok(Value::Float(first - second)),
            _ => Err(unsupported("subtract", left)),
        },
    }
}

pub(crate) fn multiply(left: &Value, right: &Value) -> Result<Value, FluentError> {
    match (left, right) {
        (Value::Int(first), Value::Int(second)) => first
            .checked_mul(*second)
            .map(Value::Int)
            .ok_or_else(|| overflow("multiply")),
        (first, second) => match (as_float(first), as_float(second)) {
            (Some(first), Some(second)) => Ok(Value::Float(first * second)),
            _ => Err(unsupported("multiply", left)),
        },
    }
}

pub(crate) fn negate(value: &Value) -> Result<Value, FluentError> {
    match value {
        Value::Int(value) => value
            .checked_neg()
            .map(Value::Int)
            .ok_or_else(|| overflow("negate")),
        Value::Float(value) => Ok(Value::Float(-value)),
        other => Err(unsupported("negate", other)),
    }
}

pub(crate) fn not(value: &Value) -> Result<Value, FluentError> {
    Ok(Value::Bool(!value.is_truthy()))
}

/// Membership: does `haystack` contain `needle`?
pub(crate) fn contains(haystack: &Value, needle: &Value) -> Result<Value, FluentError> {
    match haystack {
        Value::List(items) => Ok(Value::Bool(items.borrow().contains(needle))),
        Value::Set(items) => Ok(Value::Bool(items.borrow().contains(needle))),
        Value::Map(entries) => Ok(Value::Bool(entries.borrow().contains_key(needle))),
        Value::Text(content) => match needle {
            Value::Text(fragment) => Ok(Value::Bool(content.contains(fragment))),
            _ => Ok(Value::Bool(false)),
        },
        other => Err(unsupported("membership", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_arithmetic_promotes_to_float() {
        assert_eq!(
            add(&Value::Int(1), &Value::Float(0.5)).unwrap(),
            Value::Float(1.5)
        );
    }

    #[test]
    fn add_concatenates_text() {
        assert_eq!(
            add(&Value::text("foo"), &Value::text("bar")).unwrap(),
            Value::text("foobar")
        );
    }

    #[test]
    fn membership_on_scalars_is_unsupported() {
        assert!(contains(&Value::Int(1), &Value::Int(1)).is_err());
    }

    #[test]
    fn integer_overflow_is_checked() {
        assert!(matches!(
            add(&Value::Int(i64::MAX), &Value::Int(1)),
            Err(FluentError::ArithmeticOverflow { operation: "add" })
        ));
        assert!(matches!(
            subtract(&Value::Int(i64::MIN), &Value::Int(1)),
            Err(FluentError::ArithmeticOverflow {
                operation: "subtract"
            })
        ));
        assert!(matches!(
            negate(&Value::Int(i64::MIN)),
            Err(FluentError::ArithmeticOverflow { operation: "negate" })
        ));
    }
}
