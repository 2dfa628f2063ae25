//! Callable values and their argument plumbing.
//!
//! A [`NativeFunction`] is a named, reference-counted closure over
//! [`Arguments`]. Sharing through `Rc` keeps every callable a reusable
//! [`Fn`]-style value, the same trick the curry macros use to make partial
//! applications reusable.
//!
//! Returning `Ok(None)` from a function models a *void* return: the chain
//! layer turns it into an absent-valued node that the cascading accessor
//! resolves back to the receiver.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::capability::classify;
use crate::chain::{Chain, Wrappable, wrap};
use crate::error::FluentError;
use crate::value::Value;

thread_local! {
    static NEXT_FUNCTION_ID: Cell<usize> = const { Cell::new(0) };
}

fn next_function_id() -> usize {
    NEXT_FUNCTION_ID.with(|counter| {
        let id = counter.get();
        counter.set(id + 1);
        id
    })
}

/// The positional and keyword arguments of one call.
///
/// Chain nodes passed as arguments are unwrapped on the way in, so wrapped
/// values flow transparently into unwrapped calls.
///
/// # Examples
///
/// ```
/// use fluentic::value::{Arguments, Value};
///
/// let arguments = Arguments::new().arg(1).arg("two").kwarg("three", 3);
/// assert_eq!(arguments.positional().len(), 2);
/// assert_eq!(arguments.keyword("three"), Some(&Value::Int(3)));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Arguments {
    positional: Vec<Value>,
    keyword: BTreeMap<String, Value>,
}

impl Arguments {
    /// An empty argument list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An argument list holding exactly one positional value.
    pub fn single(value: impl Wrappable) -> Self {
        Self::new().arg(value)
    }

    /// Appends a positional argument. Chain nodes are unwrapped.
    #[must_use]
    pub fn arg(mut self, value: impl Wrappable) -> Self {
        self.positional.push(wrap(value).unwrap());
        self
    }

    /// Sets a keyword argument. Chain nodes are unwrapped.
    #[must_use]
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Wrappable) -> Self {
        self.keyword.insert(name.into(), wrap(value).unwrap());
        self
    }

    /// The positional arguments, in call order.
    #[must_use]
    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    /// Looks up a keyword argument by name.
    #[must_use]
    pub fn keyword(&self, name: &str) -> Option<&Value> {
        self.keyword.get(name)
    }

    /// Splits the arguments into their positional and keyword parts.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Value>, BTreeMap<String, Value>) {
        (self.positional, self.keyword)
    }

    pub(crate) fn from_parts(positional: Vec<Value>, keyword: BTreeMap<String, Value>) -> Self {
        Self { positional, keyword }
    }
}

impl From<Vec<Value>> for Arguments {
    fn from(positional: Vec<Value>) -> Self {
        Self {
            positional,
            keyword: BTreeMap::new(),
        }
    }
}

type CallTarget = dyn Fn(Arguments) -> Result<Option<Value>, FluentError>;

/// A named callable value.
///
/// `Ok(Some(value))` is an ordinary return, `Ok(None)` is a void return.
/// Functions compare by identity: two `NativeFunction`s are equal only if
/// they are clones of the same underlying closure.
#[derive(Clone)]
pub struct NativeFunction {
    id: usize,
    name: Rc<str>,
    target: Rc<CallTarget>,
}

impl NativeFunction {
    /// Wraps a closure over [`Arguments`] as a callable value.
    pub fn new(
        name: impl Into<Rc<str>>,
        target: impl Fn(Arguments) -> Result<Option<Value>, FluentError> + 'static,
    ) -> Self {
        Self {
            id: next_function_id(),
            name: name.into(),
            target: Rc::new(target),
        }
    }

    /// Wraps a unary value-to-value closure as a callable value.
    ///
    /// The call takes the first positional argument and always returns a
    /// value; missing arguments are an arity failure.
    pub fn unary(
        name: impl Into<Rc<str>>,
        target: impl Fn(Value) -> Result<Value, FluentError> + 'static,
    ) -> Self {
        Self::new(name, move |arguments: Arguments| {
            let (positional, _) = arguments.into_parts();
            let argument =
                positional
                    .into_iter()
                    .next()
                    .ok_or(FluentError::InsufficientArguments {
                        required: 1,
                        received: 0,
                    })?;
            target(argument).map(Some)
        })
    }

    /// The diagnostic name of this function.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn id(&self) -> usize {
        self.id
    }

    /// Invokes the function. `Ok(None)` signals a void return.
    ///
    /// # Errors
    ///
    /// Propagates whatever the underlying closure raises.
    pub fn invoke(&self, arguments: Arguments) -> Result<Option<Value>, FluentError> {
        (self.target)(arguments)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "<function {}>", self.name)
    }
}

/// Conversion into a callable for the combinator surface.
///
/// `map`, `filter` and friends accept anything implementing this trait: a
/// [`NativeFunction`], a callable [`Value`] or [`Chain`], or an
/// [`Each`](crate::each::Each) builder.
pub trait IntoCallable {
    /// Extracts the callable, or fails with
    /// [`FluentError::NotCallable`] when the source does not wrap one.
    ///
    /// # Errors
    ///
    /// Returns [`FluentError::NotCallable`] for non-callable sources.
    fn into_callable(self) -> Result<NativeFunction, FluentError>;
}

impl IntoCallable for NativeFunction {
    fn into_callable(self) -> Result<NativeFunction, FluentError> {
        Ok(self)
    }
}

impl IntoCallable for Value {
    fn into_callable(self) -> Result<NativeFunction, FluentError> {
        match self {
            Self::Function(function) => Ok(function),
            other => Err(FluentError::NotCallable {
                capability: classify(&other),
            }),
        }
    }
}

impl IntoCallable for Chain {
    fn into_callable(self) -> Result<NativeFunction, FluentError> {
        self.unwrap().into_callable()
    }
}

impl IntoCallable for &Chain {
    fn into_callable(self) -> Result<NativeFunction, FluentError> {
        self.unwrap().into_callable()
    }
}

/// Builds an [`Arguments`] value from positional and keyword entries.
///
/// Positional entries come first; keyword entries follow after a `;` as
/// `name = value`. Chain nodes are unwrapped like everywhere else.
///
/// # Examples
///
/// ```
/// use fluentic::args;
///
/// let empty = args![];
/// let positional = args![1, "two"];
/// let mixed = args![1; prefix = "-"];
/// assert_eq!(positional.positional().len(), 2);
/// assert!(mixed.keyword("prefix").is_some());
/// assert!(empty.positional().is_empty());
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::value::Arguments::new()
    };
    ($($positional:expr),+ $(,)?) => {
        $crate::value::Arguments::new()$(.arg($positional))+
    };
    ($($positional:expr),* ; $($name:ident = $value:expr),+ $(,)?) => {
        $crate::value::Arguments::new()
            $(.arg($positional))*
            $(.kwarg(stringify!($name), $value))+
    };
}
