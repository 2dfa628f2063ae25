//! Built-in bound methods, per capability category.
//!
//! Attribute access on a wrapped collection or text resolves method names
//! to [`NativeFunction`]s bound to the receiver. Mutators return void
//! (`Ok(None)`), which is what the cascading accessor feeds on: a chain
//! like `wrap(list).attr("sort")?.call(args![])?.this()` ends back at the
//! sorted list instead of at nothing.

use std::rc::Rc;

use crate::error::FluentError;
use crate::value::{Arguments, NativeFunction, Value};

/// Resolves a built-in method on the receiver, if one exists by that name.
pub(crate) fn lookup(receiver: &Value, name: &str) -> Option<Value> {
    match receiver {
        Value::Text(content) => text_method(content, name),
        Value::List(items) => list_method(items, name),
        Value::Map(entries) => map_method(entries, name),
        Value::Set(items) => set_method(items, name),
        _ => None,
    }
}

fn bound(
    name: &str,
    target: impl Fn(Arguments) -> Result<Option<Value>, FluentError> + 'static,
) -> Option<Value> {
    Some(Value::Function(NativeFunction::new(name, target)))
}

/// Takes the leading positional arguments, failing with an arity error when
/// fewer than `required` were given. Extra arguments are ignored.
fn take<const REQUIRED: usize>(arguments: Arguments) -> Result<[Value; REQUIRED], FluentError> {
    let (mut positional, _) = arguments.into_parts();
    if positional.len() < REQUIRED {
        return Err(FluentError::InsufficientArguments {
            required: REQUIRED,
            received: positional.len(),
        });
    }
    positional.truncate(REQUIRED);
    match positional.try_into() {
        Ok(exact) => Ok(exact),
        Err(_) => Err(FluentError::InsufficientArguments {
            required: REQUIRED,
            received: 0,
        }),
    }
}

fn text_method(content: &str, name: &str) -> Option<Value> {
    let content = content.to_owned();
    match name {
        "upper" => bound(name, move |_| Ok(Some(Value::text(content.to_uppercase())))),
        "lower" => bound(name, move |_| Ok(Some(Value::text(content.to_lowercase())))),
        "trim" => bound(name, move |_| Ok(Some(Value::text(content.trim())))),
        "len" => bound(name, move |_| {
            Ok(Some(Value::from(content.chars().count())))
        }),
        "starts_with" => bound(name, move |arguments| {
            let [prefix] = take::<1>(arguments)?;
            Ok(Some(Value::Bool(
                content.starts_with(&prefix.to_string()),
            )))
        }),
        "ends_with" => bound(name, move |arguments| {
            let [suffix] = take::<1>(arguments)?;
            Ok(Some(Value::Bool(content.ends_with(&suffix.to_string()))))
        }),
        _ => None,
    }
}

fn list_method(items: &Rc<std::cell::RefCell<Vec<Value>>>, name: &str) -> Option<Value> {
    let items = Rc::clone(items);
    match name {
        "push" => bound(name, move |arguments| {
            let [value] = take::<1>(arguments)?;
            items.borrow_mut().push(value);
            Ok(None)
        }),
        "pop" => bound(name, move |_| {
            items
                .borrow_mut()
                .pop()
                .map(Some)
                .ok_or(FluentError::MissingItem {
                    key: "-1".to_owned(),
                    on: "list",
                })
        }),
        "sort" => bound(name, move |_| {
            items.borrow_mut().sort();
            Ok(None)
        }),
        "reverse" => bound(name, move |_| {
            items.borrow_mut().reverse();
            Ok(None)
        }),
        "clear" => bound(name, move |_| {
            items.borrow_mut().clear();
            Ok(None)
        }),
        "insert" => bound(name, move |arguments| {
            let [position, value] = take::<2>(arguments)?;
            let mut items = items.borrow_mut();
            let length = items.len();
            let slot = match &position {
                Value::Int(index) => usize::try_from(*index).ok().filter(|slot| *slot <= length),
                _ => None,
            };
            match slot {
                Some(slot) => {
                    items.insert(slot, value);
                    Ok(None)
                }
                None => Err(FluentError::MissingItem {
                    key: position.to_string(),
                    on: "list",
                }),
            }
        }),
        "remove" => bound(name, move |arguments| {
            let [value] = take::<1>(arguments)?;
            let mut items = items.borrow_mut();
            match items.iter().position(|candidate| *candidate == value) {
                Some(position) => {
                    items.remove(position);
                    Ok(None)
                }
                None => Err(FluentError::MissingItem {
                    key: value.to_string(),
                    on: "list",
                }),
            }
        }),
        "extend" => bound(name, move |arguments| {
            let [other] = take::<1>(arguments)?;
            match other {
                Value::List(source) => {
                    let appended: Vec<Value> = source.borrow().clone();
                    items.borrow_mut().extend(appended);
                    Ok(None)
                }
                Value::Set(source) => {
                    let appended: Vec<Value> = source.borrow().iter().cloned().collect();
                    items.borrow_mut().extend(appended);
                    Ok(None)
                }
                other => Err(FluentError::UnsupportedOperation {
                    operation: "extend",
                    capability: crate::capability::classify(&other),
                }),
            }
        }),
        "len" => bound(name, move |_| Ok(Some(Value::from(items.borrow().len())))),
        "contains" => bound(name, move |arguments| {
            let [value] = take::<1>(arguments)?;
            Ok(Some(Value::Bool(items.borrow().contains(&value))))
        }),
        _ => None,
    }
}

fn map_method(
    entries: &Rc<std::cell::RefCell<std::collections::BTreeMap<Value, Value>>>,
    name: &str,
) -> Option<Value> {
    let entries = Rc::clone(entries);
    match name {
        "insert" => bound(name, move |arguments| {
            let [key, value] = take::<2>(arguments)?;
            entries.borrow_mut().insert(key, value);
            Ok(None)
        }),
        "remove" => bound(name, move |arguments| {
            let [key] = take::<1>(arguments)?;
            match entries.borrow_mut().remove(&key) {
                Some(_) => Ok(None),
                None => Err(FluentError::MissingItem {
                    key: key.to_string(),
                    on: "map",
                }),
            }
        }),
        "clear" => bound(name, move |_| {
            entries.borrow_mut().clear();
            Ok(None)
        }),
        "len" => bound(name, move |_| {
            Ok(Some(Value::from(entries.borrow().len())))
        }),
        "contains_key" => bound(name, move |arguments| {
            let [key] = take::<1>(arguments)?;
            Ok(Some(Value::Bool(entries.borrow().contains_key(&key))))
        }),
        _ => None,
    }
}

fn set_method(
    items: &Rc<std::cell::RefCell<std::collections::BTreeSet<Value>>>,
    name: &str,
) -> Option<Value> {
    let items = Rc::clone(items);
    match name {
        "insert" => bound(name, move |arguments| {
            let [value] = take::<1>(arguments)?;
            items.borrow_mut().insert(value);
            Ok(None)
        }),
        "remove" => bound(name, move |arguments| {
            let [value] = take::<1>(arguments)?;
            if items.borrow_mut().remove(&value) {
                Ok(None)
            } else {
                Err(FluentError::MissingItem {
                    key: value.to_string(),
                    on: "set",
                })
            }
        }),
        "clear" => bound(name, move |_| {
            items.borrow_mut().clear();
            Ok(None)
        }),
        "len" => bound(name, move |_| Ok(Some(Value::from(items.borrow().len())))),
        "contains" => bound(name, move |arguments| {
            let [value] = take::<1>(arguments)?;
            Ok(Some(Value::Bool(items.borrow().contains(&value))))
        }),
        _ => None,
    }
}
