//! Mapping-specific operations.
//!
//! Attribute access on a mapping already doubles as keyed access for text
//! keys (see [`Chain::attr`]); the operations here cover the rest of the
//! mapping interface.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::chain::Chain;
use crate::error::FluentError;
use crate::value::Value;

impl Chain {
    fn entries(
        &self,
        operation: &'static str,
    ) -> Result<Rc<RefCell<BTreeMap<Value, Value>>>, FluentError> {
        match self.unwrap() {
            Value::Map(entries) => Ok(entries),
            _ => Err(FluentError::UnsupportedOperation {
                operation,
                capability: self.capability(),
            }),
        }
    }

    /// Wraps the mapping's keys as a list.
    ///
    /// # Errors
    ///
    /// Fails on non-mapping receivers.
    pub fn keys(&self) -> Result<Chain, FluentError> {
        let keys: Vec<Value> = self.entries("keys")?.borrow().keys().cloned().collect();
        Ok(self.child(Value::from(keys)))
    }

    /// Wraps the mapping's values as a list.
    ///
    /// # Errors
    ///
    /// Fails on non-mapping receivers.
    pub fn values(&self) -> Result<Chain, FluentError> {
        let values: Vec<Value> = self.entries("values")?.borrow().values().cloned().collect();
        Ok(self.child(Value::from(values)))
    }

    /// Wraps the mapping's `[key, value]` pairs as a list.
    ///
    /// # Errors
    ///
    /// Fails on non-mapping receivers.
    pub fn items(&self) -> Result<Chain, FluentError> {
        let items: Vec<Value> = self
            .entries("items")?
            .borrow()
            .iter()
            .map(|(key, value)| Value::list([key.clone(), value.clone()]))
            .collect();
        Ok(self.child(Value::from(items)))
    }

    /// Keyed lookup that falls back to `default` instead of failing.
    ///
    /// # Errors
    ///
    /// Fails on non-mapping receivers.
    pub fn get(
        &self,
        key: impl Into<Value>,
        default: impl Into<Value>,
    ) -> Result<Chain, FluentError> {
        let found = self
            .entries("get")?
            .borrow()
            .get(&key.into())
            .cloned()
            .unwrap_or_else(|| default.into());
        Ok(self.child(found))
    }
}
