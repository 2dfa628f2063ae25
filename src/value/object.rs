//! Attribute-bearing objects.
//!
//! [`Object`] stands in for arbitrary host objects: a named bag of
//! attributes the proxy forwards to. Objects classify as opaque: they
//! expose the universal proxy operations (attribute access, equality,
//! display) but none of the category combinators.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;

use crate::value::Value;

/// A mutable attribute bag.
///
/// # Examples
///
/// ```
/// use fluentic::value::{Object, Value};
///
/// let object = Object::new().with("answer", 42);
/// assert_eq!(object.get("answer"), Some(Value::Int(42)));
/// assert_eq!(object.get("missing"), None);
/// ```
#[derive(Default)]
pub struct Object {
    attributes: RefCell<BTreeMap<String, Value>>,
}

impl Object {
    /// An object with no attributes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style attribute insertion.
    #[must_use]
    pub fn with(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Sets an attribute.
    pub fn set(&self, name: impl Into<String>, value: impl Into<Value>) {
        self.attributes
            .borrow_mut()
            .insert(name.into(), value.into());
    }

    /// Reads an attribute, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        self.attributes.borrow().get(name).cloned()
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_map()
            .entries(self.attributes.borrow().iter())
            .finish()
    }
}
