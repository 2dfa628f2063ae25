//! # fluentic
//!
//! A fluent value-wrapping and combinator engine.
//!
//! Wrap any [`Value`](value::Value) with [`wrap`] and everything you reach
//! through it (attributes, items, call results) comes back wrapped too,
//! so whole pipelines read as one expression with no intermediate names.
//! Each wrapped value is classified into a capability category (text,
//! mapping, set, iterable, callable, module, opaque) that decides which
//! combinators it exposes.
//!
//! The engine has three load-bearing pieces:
//!
//! - **Chaining with cascade** ([`chain`]): proxy nodes remember their
//!   history, and a void-returning operation resolves back to the most
//!   recent meaningful value through [`Chain::this`](chain::Chain::this):
//!   SmallTalk-style cascading, so mutations never dead-end a chain.
//! - **Placeholder curry** ([`curry`]): partial application with positional
//!   holes (`__`), explicit reordering indexes (`#0`, `#1`, …) and a
//!   variadic catch-all (`_args`), merged against the actual arguments with
//!   strict arity checking.
//! - **The `each` builder** ([`each`](mod@each)): compiles attribute/item/
//!   call/operator syntax into plain unary functions for use with `map`,
//!   `filter` and friends, evaluating nothing until applied.
//!
//! ## Example
//!
//! ```
//! use fluentic::{each, wrap};
//! use fluentic::value::Value;
//!
//! let shouted = wrap("bazfoobar")
//!     .find_all("ba[rz]")?
//!     .map(each().method().named("upper").args(vec![])?)?;
//! assert_eq!(
//!     shouted.unwrap(),
//!     Value::list([Value::text("BAZ"), Value::text("BAR")])
//! );
//! # Ok::<(), fluentic::error::FluentError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

pub mod capability;
pub mod chain;
pub mod curry;
pub mod each;
pub mod error;
pub mod value;

pub use chain::{Chain, Wrappable, wrap};
pub use each::each;

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use fluentic::prelude::*;
/// ```
pub mod prelude {
    pub use crate::capability::{Capability, classify};
    pub use crate::chain::{Chain, Wrappable, wrap};
    pub use crate::curry::{Slot, Template};
    pub use crate::each::{Each, MethodCaller, each};
    pub use crate::error::FluentError;
    pub use crate::value::{
        Arguments, IntoCallable, Module, ModuleBuilder, ModuleRegistry, NativeFunction, Object,
        Value,
    };
}
