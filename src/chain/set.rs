//! Set-specific operations.
//!
//! Sets are mostly just iterables; membership is the one operation worth a
//! direct spelling.

use crate::chain::Chain;
use crate::error::FluentError;
use crate::value::Value;

impl Chain {
    /// Whether the set contains `value`.
    ///
    /// # Errors
    ///
    /// Fails on non-set receivers.
    pub fn contains(&self, value: impl Into<Value>) -> Result<Chain, FluentError> {
        match self.unwrap() {
            Value::Set(items) => {
                let present = items.borrow().contains(&value.into());
                Ok(self.child(Value::Bool(present)))
            }
            _ => Err(FluentError::UnsupportedOperation {
                operation: "contains",
                capability: self.capability(),
            }),
        }
    }
}
