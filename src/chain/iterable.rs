//! The iterable combinator surface.
//!
//! Thin, eager forwarding over the value model: every combinator consumes
//! the receiver's elements in one pull-based pass and wraps a fresh list.
//! Lists iterate their elements, sets and mappings their members and keys,
//! text its characters; the same categories the classifier ranks as
//! iterable.

use crate::chain::Chain;
use crate::error::FluentError;
use crate::value::{Arguments, IntoCallable, Value};

impl Chain {
    /// The receiver's elements, or `UnsupportedOperation` outside the
    /// iterable categories.
    pub(crate) fn elements(&self, operation: &'static str) -> Result<Vec<Value>, FluentError> {
        match self.unwrap() {
            Value::List(items) => Ok(items.borrow().clone()),
            Value::Set(items) => Ok(items.borrow().iter().cloned().collect()),
            Value::Map(entries) => Ok(entries.borrow().keys().cloned().collect()),
            Value::Text(content) => Ok(content.chars().map(Value::text).collect()),
            _ => Err(FluentError::UnsupportedOperation {
                operation,
                capability: self.capability(),
            }),
        }
    }

    /// Applies `function` to every element and wraps the list of results.
    ///
    /// A void result of `function` maps to [`Value::None`].
    ///
    /// # Errors
    ///
    /// Fails on non-iterable receivers, non-callable functions, or
    /// whatever `function` itself raises.
    pub fn map(&self, function: impl IntoCallable) -> Result<Chain, FluentError> {
        let function = function.into_callable()?;
        let mut mapped = Vec::new();
        for element in self.elements("map")? {
            let outcome = function.invoke(Arguments::single(element))?;
            mapped.push(outcome.unwrap_or(Value::None));
        }
        Ok(self.child(Value::from(mapped)))
    }

    /// Keeps the elements for which `predicate` returns a truthy value.
    ///
    /// # Errors
    ///
    /// Fails on non-iterable receivers or non-callable predicates.
    pub fn filter(&self, predicate: impl IntoCallable) -> Result<Chain, FluentError> {
        let predicate = predicate.into_callable()?;
        let mut kept = Vec::new();
        for element in self.elements("filter")? {
            let verdict = predicate.invoke(Arguments::single(element.clone()))?;
            if verdict.unwrap_or(Value::None).is_truthy() {
                kept.push(element);
            }
        }
        Ok(self.child(Value::from(kept)))
    }

    /// Folds the elements left to right starting from `initial`.
    ///
    /// `function` receives the accumulator and the element as two
    /// positional arguments.
    ///
    /// # Errors
    ///
    /// Fails on non-iterable receivers or non-callable functions.
    pub fn fold(
        &self,
        initial: impl Into<Value>,
        function: impl IntoCallable,
    ) -> Result<Chain, FluentError> {
        let function = function.into_callable()?;
        let mut accumulator = initial.into();
        for element in self.elements("fold")? {
            let outcome =
                function.invoke(Arguments::new().arg(accumulator).arg(element))?;
            accumulator = outcome.unwrap_or(Value::None);
        }
        Ok(self.child(accumulator))
    }

    /// Like [`Chain::fold`], seeding the accumulator from the first
    /// element.
    ///
    /// # Errors
    ///
    /// An empty receiver is unsupported: there is nothing to seed from.
    pub fn reduce(&self, function: impl IntoCallable) -> Result<Chain, FluentError> {
        let function = function.into_callable()?;
        let mut elements = self.elements("reduce")?.into_iter();
        let mut accumulator = elements.next().ok_or(FluentError::UnsupportedOperation {
            operation: "reduce of an empty iterable",
            capability: self.capability(),
        })?;
        for element in elements {
            let outcome =
                function.invoke(Arguments::new().arg(accumulator).arg(element))?;
            accumulator = outcome.unwrap_or(Value::None);
        }
        Ok(self.child(accumulator))
    }

    /// Calls `function` on every element purely for the side effect, then
    /// returns the receiver so the chain continues.
    ///
    /// # Errors
    ///
    /// Fails on non-iterable receivers or non-callable functions.
    pub fn each(&self, function: impl IntoCallable) -> Result<Chain, FluentError> {
        let function = function.into_callable()?;
        for element in self.elements("each")? {
            function.invoke(Arguments::single(element))?;
        }
        Ok(self.clone())
    }

    /// Wraps `[index, element]` pairs.
    ///
    /// # Errors
    ///
    /// Fails on non-iterable receivers.
    pub fn enumerate(&self) -> Result<Chain, FluentError> {
        let pairs: Vec<Value> = self
            .elements("enumerate")?
            .into_iter()
            .enumerate()
            .map(|(position, element)| Value::list([Value::from(position), element]))
            .collect();
        Ok(self.child(Value::from(pairs)))
    }

    /// Wraps the elements sorted by the total value order.
    ///
    /// # Errors
    ///
    /// Fails on non-iterable receivers.
    pub fn sorted(&self) -> Result<Chain, FluentError> {
        let mut elements = self.elements("sorted")?;
        elements.sort();
        Ok(self.child(Value::from(elements)))
    }

    /// Wraps the elements in reverse order.
    ///
    /// # Errors
    ///
    /// Fails on non-iterable receivers.
    pub fn reversed(&self) -> Result<Chain, FluentError> {
        let mut elements = self.elements("reversed")?;
        elements.reverse();
        Ok(self.child(Value::from(elements)))
    }

    /// Renders every element and joins them with `separator`.
    ///
    /// # Errors
    ///
    /// Fails on non-iterable receivers.
    pub fn join(&self, separator: &str) -> Result<Chain, FluentError> {
        let rendered: Vec<String> = self
            .elements("join")?
            .iter()
            .map(ToString::to_string)
            .collect();
        Ok(self.child(Value::text(rendered.join(separator))))
    }

    /// The element count.
    ///
    /// # Errors
    ///
    /// Fails on non-iterable receivers.
    pub fn len(&self) -> Result<Chain, FluentError> {
        Ok(self.child(Value::from(self.elements("len")?.len())))
    }

    /// Whether the receiver has no elements.
    ///
    /// # Errors
    ///
    /// Fails on non-iterable receivers.
    pub fn is_empty(&self) -> Result<bool, FluentError> {
        Ok(self.elements("is_empty")?.is_empty())
    }

    /// Recursively flattens nested lists and sets. Text counts as a leaf;
    /// flattening would otherwise recurse into characters forever.
    ///
    /// # Errors
    ///
    /// Fails on non-iterable receivers.
    pub fn flatten(&self) -> Result<Chain, FluentError> {
        fn descend(element: Value, flattened: &mut Vec<Value>) {
            match element {
                Value::List(items) => {
                    for nested in items.borrow().iter().cloned() {
                        descend(nested, flattened);
                    }
                }
                Value::Set(items) => {
                    for nested in items.borrow().iter().cloned() {
                        descend(nested, flattened);
                    }
                }
                leaf => flattened.push(leaf),
            }
        }

        let mut flattened = Vec::new();
        for element in self.elements("flatten")? {
            descend(element, &mut flattened);
        }
        Ok(self.child(Value::from(flattened)))
    }

    /// Cuts the elements into chunks of `size`, the last chunk possibly
    /// shorter.
    ///
    /// # Errors
    ///
    /// A zero chunk size is unsupported; non-iterable receivers fail as
    /// usual.
    pub fn grouped(&self, size: usize) -> Result<Chain, FluentError> {
        if size == 0 {
            return Err(FluentError::UnsupportedOperation {
                operation: "grouped with zero chunk size",
                capability: self.capability(),
            });
        }
        let chunks: Vec<Value> = self
            .elements("grouped")?
            .chunks(size)
            .map(|chunk| Value::list(chunk.iter().cloned()))
            .collect();
        Ok(self.child(Value::from(chunks)))
    }

    /// Pairs elements with `other`'s elements, stopping at the shorter
    /// side.
    ///
    /// # Errors
    ///
    /// Fails when either side is not iterable.
    pub fn zip(&self, other: &Chain) -> Result<Chain, FluentError> {
        let pairs: Vec<Value> = self
            .elements("zip")?
            .into_iter()
            .zip(other.elements("zip")?)
            .map(|(left, right)| Value::list([left, right]))
            .collect();
        Ok(self.child(Value::from(pairs)))
    }

    /// Whether any element satisfies `predicate`.
    ///
    /// # Errors
    ///
    /// Fails on non-iterable receivers or non-callable predicates.
    pub fn any(&self, predicate: impl IntoCallable) -> Result<Chain, FluentError> {
        let predicate = predicate.into_callable()?;
        for element in self.elements("any")? {
            let verdict = predicate.invoke(Arguments::single(element))?;
            if verdict.unwrap_or(Value::None).is_truthy() {
                return Ok(self.child(Value::Bool(true)));
            }
        }
        Ok(self.child(Value::Bool(false)))
    }

    /// Whether every element satisfies `predicate`.
    ///
    /// # Errors
    ///
    /// Fails on non-iterable receivers or non-callable predicates.
    pub fn all(&self, predicate: impl IntoCallable) -> Result<Chain, FluentError> {
        let predicate = predicate.into_callable()?;
        for element in self.elements("all")? {
            let verdict = predicate.invoke(Arguments::single(element))?;
            if !verdict.unwrap_or(Value::None).is_truthy() {
                return Ok(self.child(Value::Bool(false)));
            }
        }
        Ok(self.child(Value::Bool(true)))
    }

    /// The smallest element by the total value order.
    ///
    /// # Errors
    ///
    /// An empty receiver is unsupported.
    pub fn min(&self) -> Result<Chain, FluentError> {
        self.elements("min")?
            .into_iter()
            .min()
            .map(|value| self.child(value))
            .ok_or(FluentError::UnsupportedOperation {
                operation: "min of an empty iterable",
                capability: self.capability(),
            })
    }

    /// The largest element by the total value order.
    ///
    /// # Errors
    ///
    /// An empty receiver is unsupported.
    pub fn max(&self) -> Result<Chain, FluentError> {
        self.elements("max")?
            .into_iter()
            .max()
            .map(|value| self.child(value))
            .ok_or(FluentError::UnsupportedOperation {
                operation: "max of an empty iterable",
                capability: self.capability(),
            })
    }

    /// Numeric sum of the elements. An empty receiver sums to `Int(0)`.
    ///
    /// # Errors
    ///
    /// Non-numeric elements are unsupported; an integer overflow surfaces
    /// as [`FluentError::ArithmeticOverflow`].
    pub fn sum(&self) -> Result<Chain, FluentError> {
        let mut total = Value::Int(0);
        for element in self.elements("sum")? {
            total = crate::value::add(&total, &element)?;
        }
        Ok(self.child(total))
    }

    /// Snapshots the elements into a fresh, independent list value.
    ///
    /// # Errors
    ///
    /// Fails on non-iterable receivers.
    pub fn freeze(&self) -> Result<Chain, FluentError> {
        let elements = self.elements("freeze")?;
        Ok(self.child(Value::from(elements)))
    }
}
