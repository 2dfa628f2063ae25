//! The proxy/chain engine.
//!
//! [`wrap`] is the sole public constructor: it classifies a value and hands
//! back a [`Chain`] node. Every attribute access, item access, or call made
//! through a node re-wraps its result, so a whole pipeline can be written
//! as one expression with no intermediate names. [`Chain::unwrap`] is the
//! terminal escape hatch back to plain values.
//!
//! Rust has no dynamic attribute interception, so forwarding is explicit:
//! `.attr(name)`, `.item(key)`, `.call(arguments)`. This is an intentional
//! surface reduction relative to languages with reflection hooks, not a
//! missing feature; the semantics behind the explicit calls are identical.
//!
//! The engine's signature contract is the cascading accessor
//! [`Chain::this`]: a void-returning call produces an *absent*-valued node
//! that remembers where to fall back to, and `this()` resolves it to the
//! most recent non-void value in the chain. A void result is never
//! terminal.
//!
//! ```
//! use fluentic::{args, wrap};
//! use fluentic::value::Value;
//!
//! let numbers = wrap(Value::list([Value::Int(3), Value::Int(1), Value::Int(2)]));
//! // `sort` returns void; `this()` cascades back to the sorted list.
//! let sorted = numbers.attr("sort")?.call(args![])?.this();
//! assert_eq!(
//!     sorted.unwrap(),
//!     Value::list([Value::Int(1), Value::Int(2), Value::Int(3)])
//! );
//! # Ok::<(), fluentic::error::FluentError>(())
//! ```

mod callable;
mod iterable;
mod mapping;
mod set;
mod text;

use std::fmt;
use std::rc::Rc;

use tracing::trace;

use crate::capability::{Capability, classify};
use crate::error::FluentError;
use crate::value::{Arguments, Value, attribute, index, invoke};

struct ChainNode {
    value: Option<Value>,
    previous: Option<Rc<ChainNode>>,
    fallback: Option<Rc<ChainNode>>,
    capability: Capability,
}

impl ChainNode {
    /// Absent-valued nodes must carry a fallback; that is the whole chain
    /// invariant.
    fn absent(
        previous: Rc<ChainNode>,
        fallback: Option<Rc<ChainNode>>,
    ) -> Result<Rc<Self>, FluentError> {
        if fallback.is_none() {
            return Err(FluentError::InvalidChain);
        }
        Ok(Rc::new(Self {
            value: None,
            previous: Some(previous),
            fallback,
            capability: Capability::Opaque,
        }))
    }

    fn present(value: Value, previous: Option<Rc<ChainNode>>) -> Rc<Self> {
        let capability = classify(&value);
        Rc::new(Self {
            value: Some(value),
            previous,
            fallback: None,
            capability,
        })
    }

    /// The most recent non-void value reachable from this node.
    fn resolve(&self) -> Value {
        let mut current = self;
        loop {
            if let Some(value) = &current.value {
                return value.clone();
            }
            match &current.fallback {
                Some(fallback) => current = fallback,
                // Unreachable by the construction invariant; absent nodes
                // always carry a fallback.
                None => return Value::None,
            }
        }
    }
}

/// One step in a wrap/access/call chain.
///
/// A `Chain` is a cheap clonable handle; nodes are immutable after
/// construction and the chain grows append-only. Equality delegates to the
/// wrapped value, so a wrapped value compares equal to its unwrapped
/// counterpart.
#[derive(Clone)]
pub struct Chain {
    node: Rc<ChainNode>,
}

/// Sources [`wrap`] accepts: anything convertible to a [`Value`], plus
/// [`Chain`] itself; wrapping a wrapped value returns the very same node.
pub trait Wrappable {
    /// Wraps the source, recording `previous` as the prior chain step.
    fn wrap_with(self, previous: Option<Chain>) -> Chain;
}

impl Wrappable for Chain {
    fn wrap_with(self, _previous: Option<Chain>) -> Chain {
        // Idempotent by identity: re-wrapping is a no-op.
        self
    }
}

impl<T: Into<Value>> Wrappable for T {
    fn wrap_with(self, previous: Option<Chain>) -> Chain {
        let value = self.into();
        trace!(capability = %classify(&value), "wrapping value");
        Chain {
            node: ChainNode::present(value, previous.map(|chain| chain.node)),
        }
    }
}

/// Wraps a value and returns the capability-classified chain node for it.
///
/// This is the main entry point; everything else is reached by chaining
/// off its result.
///
/// # Examples
///
/// ```
/// use fluentic::wrap;
/// use fluentic::capability::Capability;
///
/// let node = wrap("hello");
/// assert_eq!(node.capability(), Capability::Text);
/// assert_eq!(node.unwrap(), "hello".into());
/// ```
pub fn wrap(source: impl Wrappable) -> Chain {
    source.wrap_with(None)
}

impl Chain {
    /// The raw wrapped payload; [`Value::None`] for a void result.
    ///
    /// All other operations return chain nodes; this is the explicit exit
    /// from the proxy world.
    #[must_use]
    pub fn unwrap(&self) -> Value {
        self.node.value.clone().unwrap_or(Value::None)
    }

    /// The capability category this node was classified into.
    #[must_use]
    pub fn capability(&self) -> Capability {
        self.node.capability
    }

    /// The previous node in the chain, if any. Introspection only.
    #[must_use]
    pub fn previous(&self) -> Option<Chain> {
        self.node.previous.clone().map(|node| Chain { node })
    }

    /// Whether this node holds no value (a void result).
    #[must_use]
    pub fn is_void(&self) -> bool {
        self.node.value.is_none()
    }

    pub(crate) fn child(&self, value: Value) -> Chain {
        Chain {
            node: ChainNode::present(value, Some(Rc::clone(&self.node))),
        }
    }

    /// Node identity: `true` only for handles to the very same chain node.
    ///
    /// This is the check behind idempotent wrapping: `wrap(wrap(v))` is
    /// *identical* to `wrap(v)`, not merely equal.
    #[must_use]
    pub fn identical(&self, other: &Chain) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
    }

    /// Forwards an attribute access to the wrapped value and wraps the
    /// result.
    ///
    /// Modules resolve imports here, mappings double keyed access as
    /// attribute access, objects read their attribute bag, and every
    /// category exposes its built-in bound methods.
    ///
    /// # Errors
    ///
    /// [`FluentError::MissingAttribute`] when the underlying lookup fails;
    /// the failure is surfaced, never swallowed.
    pub fn attr(&self, name: &str) -> Result<Chain, FluentError> {
        let found = attribute(&self.unwrap(), name)?;
        Ok(self.child(found))
    }

    /// Forwards an indexed/keyed access and wraps the result.
    ///
    /// # Errors
    ///
    /// [`FluentError::MissingItem`] when the key or index is absent.
    pub fn item(&self, key: impl Into<Value>) -> Result<Chain, FluentError> {
        let found = index(&self.unwrap(), &key.into())?;
        Ok(self.child(found))
    }

    /// Invokes the wrapped callable and wraps the result.
    ///
    /// Chain-valued arguments are unwrapped on the way in. A void return
    /// produces an absent node whose fallback skips back past the callable
    /// to the call's receiver, which is what [`Chain::this`] resolves to.
    ///
    /// # Errors
    ///
    /// [`FluentError::NotCallable`] on non-callable nodes; otherwise
    /// whatever the wrapped function raises.
    pub fn call(&self, arguments: Arguments) -> Result<Chain, FluentError> {
        let outcome = invoke(&self.unwrap(), arguments)?;
        match outcome {
            Some(value) => Ok(self.child(value)),
            None => {
                let fallback = self
                    .node
                    .previous
                    .clone()
                    .unwrap_or_else(|| Rc::clone(&self.node));
                let node = ChainNode::absent(Rc::clone(&self.node), Some(fallback))?;
                Ok(Chain { node })
            }
        }
    }

    /// The cascading accessor: re-wraps the current value, or, when the
    /// last operation returned void, the most recent non-void value in
    /// the chain.
    ///
    /// Many mutating operations report nothing on success; treating that
    /// void as "return the receiver" keeps chains fluent instead of
    /// terminating them on every mutation.
    #[must_use]
    pub fn this(&self) -> Chain {
        self.child(self.node.resolve())
    }

    /// Applies `inspect` to a re-wrapped view of this node purely for
    /// effect, then returns the node unchanged.
    ///
    /// Useful for splicing logging or debugging into a chain without
    /// breaking it.
    pub fn tee(&self, inspect: impl FnOnce(&Chain)) -> Chain {
        let view = self.this();
        inspect(&view);
        self.clone()
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Diagnostic form shows the payload, never the chain.
        write!(formatter, "fluentic::wrap({:?})", self.unwrap())
    }
}

impl fmt::Debug for Chain {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, formatter)
    }
}

impl PartialEq for Chain {
    fn eq(&self, other: &Self) -> bool {
        self.unwrap() == other.unwrap()
    }
}

impl PartialEq<Value> for Chain {
    fn eq(&self, other: &Value) -> bool {
        self.unwrap() == *other
    }
}

// Rc/RefCell internals make chains single-threaded by construction.
static_assertions::assert_not_impl_any!(Chain: Send, Sync);
