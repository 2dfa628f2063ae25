//! Error types for the fluent wrapper engine.
//!
//! The proxy layer itself is a transparent relay: failures during attribute,
//! item, or call forwarding surface the kind of error the underlying value
//! produced, only with a deeper call stack. The curry engine and the
//! combinator builder define genuinely new contracts, so they raise their
//! own error kinds ([`FluentError::InsufficientArguments`],
//! [`FluentError::MisplacedVariadicPlaceholder`],
//! [`FluentError::MethodNameRequired`]).
//!
//! All errors are fatal to the current expression; nothing in this crate
//! retries.

use thiserror::Error;

use crate::capability::Capability;

/// The error type shared by every fallible operation in this crate.
#[derive(Clone, Debug, Error)]
pub enum FluentError {
    /// An attribute lookup failed on the underlying value.
    #[error("no attribute `{name}` on {on} value")]
    MissingAttribute {
        /// The attribute name that was requested.
        name: String,
        /// A short description of the receiving value's type.
        on: &'static str,
    },

    /// An indexed or keyed access failed on the underlying value.
    #[error("no item `{key}` in {on} value")]
    MissingItem {
        /// The rendered key or index that was requested.
        key: String,
        /// A short description of the receiving value's type.
        on: &'static str,
    },

    /// A chain node was constructed with neither a value nor a fallback.
    #[error("cannot construct a chain node without a value or a fallback")]
    InvalidChain,

    /// A value that is not callable was invoked.
    #[error("cannot call a {capability} value")]
    NotCallable {
        /// The capability of the value that was invoked.
        capability: Capability,
    },

    /// A curried call did not receive enough positional arguments to
    /// resolve every placeholder.
    #[error("curried call needs at least {required} positional argument(s), got {received}")]
    InsufficientArguments {
        /// The minimum number of positional arguments required.
        required: usize,
        /// The number of positional arguments actually received.
        received: usize,
    },

    /// The variadic placeholder appeared anywhere but the final template
    /// position.
    #[error("variadic placeholder must be the last template entry")]
    MisplacedVariadicPlaceholder,

    /// A method-caller sub-builder was applied before a method name was
    /// given.
    #[error("method caller needs a method name before arguments")]
    MethodNameRequired,

    /// Integer arithmetic exceeded the representable range.
    #[error("integer overflow in {operation}")]
    ArithmeticOverflow {
        /// The arithmetic operation that overflowed.
        operation: &'static str,
    },

    /// A category-specific operation was requested on a value outside that
    /// category.
    #[error("operation `{operation}` is not supported on a {capability} value")]
    UnsupportedOperation {
        /// The operation that was requested.
        operation: &'static str,
        /// The capability of the receiving value.
        capability: Capability,
    },

    /// A regex-style text operation was given a malformed pattern.
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}
