//! Forwarding primitives shared by the chain and the combinator builder.
//!
//! These are the raw lookup/invoke operations a proxy node forwards to.
//! They never catch or reinterpret: a failed lookup surfaces as the error
//! the underlying value produces.

use crate::capability::classify;
use crate::error::FluentError;
use crate::value::{Arguments, Value, methods};

/// Attribute lookup on a raw value.
///
/// Resolution order: module import resolution, mapping text-key access,
/// object attribute bag, then the category's built-in bound methods.
pub(crate) fn attribute(value: &Value, name: &str) -> Result<Value, FluentError> {
    if let Value::Module(module) = value {
        return module.attribute(name);
    }
    if let Value::Map(entries) = value
        && let Some(found) = entries.borrow().get(&Value::text(name))
    {
        return Ok(found.clone());
    }
    if let Value::Object(object) = value
        && let Some(found) = object.get(name)
    {
        return Ok(found);
    }
    if let Some(method) = methods::lookup(value, name) {
        return Ok(method);
    }
    Err(FluentError::MissingAttribute {
        name: name.to_owned(),
        on: value.type_name(),
    })
}

/// Indexed/keyed lookup on a raw value.
///
/// Lists and text accept integer indexes, negative indexes counting from
/// the end; maps accept any key.
pub(crate) fn index(value: &Value, key: &Value) -> Result<Value, FluentError> {
    match value {
        Value::List(items) => {
            let items = items.borrow();
            position(key, items.len())
                .and_then(|slot| items.get(slot).cloned())
                .ok_or_else(|| missing(key, "list"))
        }
        Value::Text(content) => {
            let characters: Vec<char> = content.chars().collect();
            position(key, characters.len())
                .map(|slot| Value::text(characters[slot]))
                .ok_or_else(|| missing(key, "text"))
        }
        Value::Map(entries) => entries
            .borrow()
            .get(key)
            .cloned()
            .ok_or_else(|| missing(key, "map")),
        other => Err(FluentError::UnsupportedOperation {
            operation: "item access",
            capability: classify(other),
        }),
    }
}

/// Invocation of a raw value as a function. `Ok(None)` is a void return.
pub(crate) fn invoke(value: &Value, arguments: Arguments) -> Result<Option<Value>, FluentError> {
    match value {
        Value::Function(function) => function.invoke(arguments),
        other => Err(FluentError::NotCallable {
            capability: classify(other),
        }),
    }
}

fn position(key: &Value, length: usize) -> Option<usize> {
    let Value::Int(index) = key else { return None };
    let length = i64::try_from(length).ok()?;
    let resolved = if *index < 0 { index + length } else { *index };
    (0..length)
        .contains(&resolved)
        .then(|| usize::try_from(resolved).ok())
        .flatten()
}

fn missing(key: &Value, on: &'static str) -> FluentError {
    FluentError::MissingItem {
        key: key.to_string(),
        on,
    }
}
