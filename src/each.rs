//! The lazy combinator builder.
//!
//! [`each()`] starts an [`Each`] expression representing the identity
//! function. Every builder step ([`Each::attr`], [`Each::item`],
//! [`Each::call`]) composes one more stage onto it without evaluating
//! anything. The finished expression is a plain unary function over values:
//! applying it threads the argument through the stages in construction
//! order and returns an *unwrapped* result, never a proxy.
//!
//! Operators terminate the builder by design: `each().eq(3)` or
//! `each() + 1` hand back a finished [`NativeFunction`] rather than
//! another builder, because operator results are rarely worth chaining
//! attribute access off of.
//!
//! An `Each` is deliberately **not** a [`Chain`](crate::chain::Chain): it
//! never cascades, never classifies, and needs no wrapped receiver to
//! exist.
//!
//! # Examples
//!
//! ```
//! use fluentic::each;
//! use fluentic::value::Value;
//!
//! // Roughly: |x| x.foo[0], as a reusable function.
//! let first_foo = each().attr("foo").item(0).into_fn();
//!
//! let record = Value::map([(
//!     Value::text("foo"),
//!     Value::list([Value::Int(7), Value::Int(8)]),
//! )]);
//! let extracted = first_foo.invoke(fluentic::args![record])?;
//! assert_eq!(extracted, Some(Value::Int(7)));
//! # Ok::<(), fluentic::error::FluentError>(())
//! ```

use std::fmt::Write as _;
use std::ops::{Add, Mul, Neg, Not, Sub};

use crate::error::FluentError;
use crate::value::{
    Arguments, IntoCallable, NativeFunction, Value, add, attribute, contains, index, invoke,
    multiply, negate, not, subtract,
};

#[derive(Clone, Debug)]
enum Stage {
    Attribute(String),
    Item(Value),
    Call(Vec<Value>),
}

fn thread(stages: &[Stage], argument: Value) -> Result<Value, FluentError> {
    let mut current = argument;
    for stage in stages {
        current = match stage {
            Stage::Attribute(name) => attribute(&current, name)?,
            Stage::Item(key) => index(&current, key)?,
            Stage::Call(call_arguments) => {
                let arguments = Arguments::from(call_arguments.clone());
                invoke(&current, arguments)?.unwrap_or(Value::None)
            }
        };
    }
    Ok(current)
}

/// Starts a combinator expression at the identity function.
#[must_use]
pub fn each() -> Each {
    Each {
        stages: Vec::new(),
        description: "each".to_owned(),
    }
}

/// A deferred expression over a future argument.
///
/// Built incrementally; see the [module docs](self) for the contract.
#[derive(Clone, Debug)]
pub struct Each {
    stages: Vec<Stage>,
    description: String,
}

impl Each {
    /// Composes an attribute getter onto the expression.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>) -> Each {
        let name = name.into();
        let _ = write!(self.description, ".{name}");
        self.stages.push(Stage::Attribute(name));
        self
    }

    /// Composes an item getter onto the expression.
    #[must_use]
    pub fn item(mut self, key: impl Into<Value>) -> Each {
        let key = key.into();
        let _ = write!(self.description, "[{key:?}]");
        self.stages.push(Stage::Item(key));
        self
    }

    /// Composes "call the current reference with these arguments" onto the
    /// expression.
    #[must_use]
    pub fn call(mut self, arguments: Vec<Value>) -> Each {
        let _ = write!(self.description, "({arguments:?})");
        self.stages.push(Stage::Call(arguments));
        self
    }

    /// Opens the method-caller sub-builder.
    ///
    /// "Call" on a builder is ambiguous between invoking the current
    /// reference and applying an operator, so calling a *method by name*
    /// gets its own namespace: name the method first, then supply
    /// arguments.
    #[must_use]
    pub fn method(self) -> MethodCaller {
        MethodCaller {
            base: self,
            name: None,
        }
    }

    /// Finishes the expression without an operator.
    #[must_use]
    pub fn into_fn(self) -> NativeFunction {
        let stages = self.stages;
        NativeFunction::unary(self.description, move |argument| thread(&stages, argument))
    }

    /// Applies the expression directly to one value.
    ///
    /// # Errors
    ///
    /// Whatever the composed stages raise on this argument.
    pub fn apply(&self, argument: impl Into<Value>) -> Result<Value, FluentError> {
        thread(&self.stages, argument.into())
    }

    fn terminate(
        self,
        operator: &str,
        apply: impl Fn(&Value) -> Result<Value, FluentError> + 'static,
    ) -> NativeFunction {
        let stages = self.stages;
        let description = format!("{} {operator}", self.description);
        NativeFunction::unary(description, move |argument| {
            let staged = thread(&stages, argument)?;
            apply(&staged)
        })
    }

    /// Terminates with an equality test against `operand`.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn eq(self, operand: impl Into<Value>) -> NativeFunction {
        let operand = operand.into();
        self.terminate("==", move |staged| Ok(Value::Bool(*staged == operand)))
    }

    /// Terminates with an inequality test against `operand`.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn ne(self, operand: impl Into<Value>) -> NativeFunction {
        let operand = operand.into();
        self.terminate("!=", move |staged| Ok(Value::Bool(*staged != operand)))
    }

    /// Terminates with a less-than test against `operand`.
    #[must_use]
    pub fn lt(self, operand: impl Into<Value>) -> NativeFunction {
        let operand = operand.into();
        self.terminate("<", move |staged| Ok(Value::Bool(*staged < operand)))
    }

    /// Terminates with a less-or-equal test against `operand`.
    #[must_use]
    pub fn le(self, operand: impl Into<Value>) -> NativeFunction {
        let operand = operand.into();
        self.terminate("<=", move |staged| Ok(Value::Bool(*staged <= operand)))
    }

    /// Terminates with a greater-than test against `operand`.
    #[must_use]
    pub fn gt(self, operand: impl Into<Value>) -> NativeFunction {
        let operand = operand.into();
        self.terminate(">", move |staged| Ok(Value::Bool(*staged > operand)))
    }

    /// Terminates with a greater-or-equal test against `operand`.
    #[must_use]
    pub fn ge(self, operand: impl Into<Value>) -> NativeFunction {
        let operand = operand.into();
        self.terminate(">=", move |staged| Ok(Value::Bool(*staged >= operand)))
    }

    /// Terminates with a membership test: is the staged value contained in
    /// `haystack`?
    #[must_use]
    pub fn in_(self, haystack: impl Into<Value>) -> NativeFunction {
        let haystack = haystack.into();
        self.terminate("in", move |staged| contains(&haystack, staged))
    }

    /// Terminates with a negated membership test.
    #[must_use]
    pub fn not_in(self, haystack: impl Into<Value>) -> NativeFunction {
        let haystack = haystack.into();
        self.terminate("not in", move |staged| {
            let present = contains(&haystack, staged)?;
            Ok(Value::Bool(!present.is_truthy()))
        })
    }
}

impl IntoCallable for Each {
    fn into_callable(self) -> Result<NativeFunction, FluentError> {
        Ok(self.into_fn())
    }
}

impl<T: Into<Value>> Add<T> for Each {
    type Output = NativeFunction;

    fn add(self, operand: T) -> NativeFunction {
        let operand = operand.into();
        self.terminate("+", move |staged| add(staged, &operand))
    }
}

impl<T: Into<Value>> Sub<T> for Each {
    type Output = NativeFunction;

    fn sub(self, operand: T) -> NativeFunction {
        let operand = operand.into();
        self.terminate("-", move |staged| subtract(staged, &operand))
    }
}

impl<T: Into<Value>> Mul<T> for Each {
    type Output = NativeFunction;

    fn mul(self, operand: T) -> NativeFunction {
        let operand = operand.into();
        self.terminate("*", move |staged| multiply(staged, &operand))
    }
}

impl Neg for Each {
    type Output = NativeFunction;

    fn neg(self) -> NativeFunction {
        self.terminate("(negated)", negate)
    }
}

impl Not for Each {
    type Output = NativeFunction;

    fn not(self) -> NativeFunction {
        self.terminate("(not)", not)
    }
}

/// The method-caller sub-builder: names a method, then calls it.
///
/// ```
/// use fluentic::each;
/// use fluentic::value::Value;
///
/// let shout = each().method().named("upper").args(vec![])?;
/// assert_eq!(shout.apply("hi")?, Value::text("HI"));
/// # Ok::<(), fluentic::error::FluentError>(())
/// ```
pub struct MethodCaller {
    base: Each,
    name: Option<String>,
}

impl MethodCaller {
    /// Names the method to call.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> MethodCaller {
        self.name = Some(name.into());
        self
    }

    /// Supplies the call arguments and returns to the builder.
    ///
    /// # Errors
    ///
    /// [`FluentError::MethodNameRequired`] when no method has been named.
    pub fn args(self, arguments: Vec<Value>) -> Result<Each, FluentError> {
        let name = self.name.ok_or(FluentError::MethodNameRequired)?;
        Ok(self.base.attr(name).call(arguments))
    }
}
