//! Higher-order operations on callable nodes.

use crate::chain::Chain;
use crate::curry::Template;
use crate::error::FluentError;
use crate::value::{Arguments, IntoCallable, NativeFunction, Value};

impl Chain {
    fn callable(&self, operation: &'static str) -> Result<NativeFunction, FluentError> {
        match self.unwrap() {
            Value::Function(function) => Ok(function),
            _ => Err(FluentError::UnsupportedOperation {
                operation,
                capability: self.capability(),
            }),
        }
    }

    /// Partially applies the wrapped callable against a placeholder
    /// template.
    ///
    /// The template is validated eagerly; merging happens on every call of
    /// the returned callable. See [`crate::curry`] for the placeholder
    /// algebra.
    ///
    /// # Examples
    ///
    /// ```
    /// use fluentic::{args, template, wrap};
    /// use fluentic::value::{NativeFunction, Value};
    ///
    /// let pair = NativeFunction::new("pair", |arguments| {
    ///     Ok(Some(Value::list(arguments.positional().to_vec())))
    /// });
    ///
    /// // Swap the first two actual arguments.
    /// let swapped = wrap(pair).curry(template![#1, #0])?;
    /// assert_eq!(
    ///     swapped.call(args!["x", "y"])?.unwrap(),
    ///     Value::list([Value::text("y"), Value::text("x")])
    /// );
    /// # Ok::<(), fluentic::error::FluentError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// [`FluentError::UnsupportedOperation`] on non-callable nodes;
    /// [`FluentError::MisplacedVariadicPlaceholder`] when the template
    /// breaks the variadic-last contract.
    pub fn curry(&self, template: Template) -> Result<Chain, FluentError> {
        let inner = self.callable("curry")?;
        template.validate()?;
        let name = format!("{} (curried)", inner.name());
        let curried = NativeFunction::new(name, move |actual: Arguments| {
            let merged = template.merge(actual)?;
            inner.invoke(merged)
        });
        Ok(self.child(Value::Function(curried)))
    }

    /// Composes the wrapped callable with `outer`:
    /// `composed(args) == outer(inner(args))`.
    ///
    /// Pure function composition, no placeholders. A void result of the
    /// inner callable flows into `outer` as [`Value::None`].
    ///
    /// # Errors
    ///
    /// [`FluentError::UnsupportedOperation`] when this node is not
    /// callable, [`FluentError::NotCallable`] when `outer` is not.
    pub fn compose(&self, outer: impl IntoCallable) -> Result<Chain, FluentError> {
        let inner = self.callable("compose")?;
        let outer = outer.into_callable()?;
        let name = format!("{} . {}", outer.name(), inner.name());
        let composed = NativeFunction::new(name, move |arguments: Arguments| {
            let intermediate = inner.invoke(arguments)?.unwrap_or(Value::None);
            outer.invoke(Arguments::single(intermediate))
        });
        Ok(self.child(Value::Function(composed)))
    }
}
