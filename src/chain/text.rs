//! Regex operations on text nodes.
//!
//! Forwarded to the `regex` crate as if they were native string methods.
//! Patterns are compiled per call; a malformed pattern is
//! [`FluentError::InvalidPattern`].

use regex::Regex;

use crate::chain::Chain;
use crate::error::FluentError;
use crate::value::Value;

impl Chain {
    fn text(&self, operation: &'static str) -> Result<String, FluentError> {
        match self.unwrap() {
            Value::Text(content) => Ok(content),
            _ => Err(FluentError::UnsupportedOperation {
                operation,
                capability: self.capability(),
            }),
        }
    }

    /// Wraps the list of all non-overlapping matches of `pattern`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fluentic::wrap;
    /// use fluentic::value::Value;
    ///
    /// let matches = wrap("bazfoobar").find_all("ba[rz]")?;
    /// assert_eq!(
    ///     matches.unwrap(),
    ///     Value::list([Value::text("baz"), Value::text("bar")])
    /// );
    /// # Ok::<(), fluentic::error::FluentError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Fails on non-text receivers or malformed patterns.
    pub fn find_all(&self, pattern: &str) -> Result<Chain, FluentError> {
        let content = self.text("find_all")?;
        let regex = Regex::new(pattern)?;
        let found: Vec<Value> = regex
            .find_iter(&content)
            .map(|found| Value::text(found.as_str()))
            .collect();
        Ok(self.child(Value::from(found)))
    }

    /// Wraps the first match of `pattern` anywhere in the text, or
    /// [`Value::None`] when nothing matches.
    ///
    /// # Errors
    ///
    /// Fails on non-text receivers or malformed patterns.
    pub fn search(&self, pattern: &str) -> Result<Chain, FluentError> {
        let content = self.text("search")?;
        let regex = Regex::new(pattern)?;
        let found = regex
            .find(&content)
            .map_or(Value::None, |found| Value::text(found.as_str()));
        Ok(self.child(found))
    }

    /// Whether `pattern` matches at the very start of the text.
    ///
    /// # Errors
    ///
    /// Fails on non-text receivers or malformed patterns.
    pub fn matches(&self, pattern: &str) -> Result<Chain, FluentError> {
        let content = self.text("matches")?;
        let regex = Regex::new(pattern)?;
        // Leftmost match semantics: if any match starts at zero, the first
        // reported one does.
        let anchored = regex
            .find(&content)
            .is_some_and(|found| found.start() == 0);
        Ok(self.child(Value::Bool(anchored)))
    }

    /// Splits the text around matches of `pattern` and wraps the pieces.
    ///
    /// # Errors
    ///
    /// Fails on non-text receivers or malformed patterns.
    pub fn split(&self, pattern: &str) -> Result<Chain, FluentError> {
        let content = self.text("split")?;
        let regex = Regex::new(pattern)?;
        let pieces: Vec<Value> = regex.split(&content).map(Value::text).collect();
        Ok(self.child(Value::from(pieces)))
    }

    /// Replaces every match of `pattern` with `replacement`.
    ///
    /// # Errors
    ///
    /// Fails on non-text receivers or malformed patterns.
    pub fn replace(&self, pattern: &str, replacement: &str) -> Result<Chain, FluentError> {
        let content = self.text("replace")?;
        let regex = Regex::new(pattern)?;
        let replaced = regex.replace_all(&content, replacement).into_owned();
        Ok(self.child(Value::text(replaced)))
    }
}
