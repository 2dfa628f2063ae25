//! Capability classification for wrapped values.
//!
//! Every value wrapped by this crate is assigned exactly one
//! [`Capability`], chosen by evaluating an ordered list of type predicates
//! and taking the first match. The order is part of the contract: a mapping
//! also satisfies the iterable predicate, but it must classify as
//! [`Capability::Mapping`], never [`Capability::Iterable`]. Reordering the
//! predicate table silently changes behavior for such values.

use std::fmt;

use crate::value::Value;

/// The capability category a wrapped value belongs to.
///
/// The category decides which operation set a [`Chain`](crate::chain::Chain)
/// node exposes: mappings gain the mapping interface, text gains the regex
/// interface, callables gain `curry`/`compose`, and so on. Values that match
/// no predicate are [`Capability::Opaque`]; wrapping them is fine, but
/// category-specific operations on them fail with
/// [`FluentError::UnsupportedOperation`](crate::error::FluentError::UnsupportedOperation).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    /// A module: attribute access resolves registered imports.
    Module,
    /// Text: iterable over characters, plus regex operations.
    Text,
    /// A key/value mapping.
    Mapping,
    /// An unordered collection of unique elements.
    Set,
    /// A general iterable sequence.
    Iterable,
    /// A callable function.
    Callable,
    /// Anything else; only the universal proxy operations apply.
    Opaque,
}

impl fmt::Display for Capability {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Module => "module",
            Self::Text => "text",
            Self::Mapping => "mapping",
            Self::Set => "set",
            Self::Iterable => "iterable",
            Self::Callable => "callable",
            Self::Opaque => "opaque",
        };
        formatter.write_str(name)
    }
}

type Predicate = fn(&Value) -> bool;

/// The ordered predicate table. Most specific first; first match wins.
const PREDICATES: [(Predicate, Capability); 6] = [
    (is_module, Capability::Module),
    (is_text, Capability::Text),
    (is_mapping, Capability::Mapping),
    (is_set, Capability::Set),
    (is_iterable, Capability::Iterable),
    (is_callable, Capability::Callable),
];

/// Classifies a value into its capability category.
///
/// Pure and total: every value maps to exactly one category, with
/// [`Capability::Opaque`] as the default when no predicate matches.
///
/// # Examples
///
/// ```
/// use fluentic::capability::{classify, Capability};
/// use fluentic::value::Value;
///
/// assert_eq!(classify(&Value::text("hello")), Capability::Text);
/// assert_eq!(classify(&Value::Int(42)), Capability::Opaque);
///
/// // A mapping is also iterable, but mapping is checked first.
/// assert_eq!(classify(&Value::map([])), Capability::Mapping);
/// ```
#[must_use]
pub fn classify(value: &Value) -> Capability {
    for (predicate, capability) in PREDICATES {
        if predicate(value) {
            return capability;
        }
    }
    Capability::Opaque
}

fn is_module(value: &Value) -> bool {
    matches!(value, Value::Module(_))
}

fn is_text(value: &Value) -> bool {
    matches!(value, Value::Text(_))
}

fn is_mapping(value: &Value) -> bool {
    matches!(value, Value::Map(_))
}

fn is_set(value: &Value) -> bool {
    matches!(value, Value::Set(_))
}

fn is_iterable(value: &Value) -> bool {
    // Text, mappings and sets iterate too; they are caught earlier.
    matches!(
        value,
        Value::List(_) | Value::Map(_) | Value::Set(_) | Value::Text(_)
    )
}

fn is_callable(value: &Value) -> bool {
    matches!(value, Value::Function(_))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_wins_over_iterable() {
        let mapping = Value::map([]);
        assert!(is_iterable(&mapping));
        assert_eq!(classify(&mapping), Capability::Mapping);
    }

    #[test]
    fn set_wins_over_iterable() {
        let set = Value::set([]);
        assert!(is_iterable(&set));
        assert_eq!(classify(&set), Capability::Set);
    }

    #[test]
    fn scalars_are_opaque() {
        assert_eq!(classify(&Value::None), Capability::Opaque);
        assert_eq!(classify(&Value::Bool(true)), Capability::Opaque);
        assert_eq!(classify(&Value::Float(1.5)), Capability::Opaque);
    }
}
