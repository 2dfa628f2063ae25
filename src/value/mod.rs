//! The closed dynamic value domain the proxy engine operates over.
//!
//! Rust has no ambient object graph to intercept, so the engine defines its
//! own: a [`Value`] is one of a fixed set of variants covering the capability
//! categories of the classifier. Collections carry shared interior
//! mutability (`Rc<RefCell<…>>`) so that void-returning mutators such as
//! `push` or `sort` have observable effects; that is what makes the
//! cascading-self contract worth having.
//!
//! [`Value`] implements a *total* order: floats compare via
//! [`f64::total_cmp`] and reference variants compare by identity. This lets
//! any value serve as a map key or set member.

mod access;
mod function;
mod methods;
mod module;
mod object;
mod ops;

pub use function::{Arguments, IntoCallable, NativeFunction};
pub use module::{Module, ModuleBuilder, ModuleRegistry};
pub use object::Object;

pub(crate) use access::{attribute, index, invoke};
pub(crate) use ops::{add, contains, multiply, negate, not, subtract};

use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::rc::Rc;

/// A dynamically typed runtime value.
///
/// This is the payload type of every chain node. Scalars are owned;
/// collections, functions, modules and objects are shared references, so
/// cloning a `Value` is always cheap and clones of a collection observe the
/// same underlying storage.
#[derive(Clone)]
pub enum Value {
    /// The absence of a value; also what void returns unwrap to.
    None,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A text string.
    Text(String),
    /// An ordered, shared, mutable sequence.
    List(Rc<RefCell<Vec<Value>>>),
    /// A shared, mutable key/value mapping.
    Map(Rc<RefCell<BTreeMap<Value, Value>>>),
    /// A shared, mutable collection of unique elements.
    Set(Rc<RefCell<BTreeSet<Value>>>),
    /// A callable function.
    Function(NativeFunction),
    /// A registered module.
    Module(Rc<Module>),
    /// An attribute-bearing object.
    Object(Rc<Object>),
}

impl Value {
    /// Builds a [`Value::Text`] from anything string-like.
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    /// Builds a [`Value::List`] from an iterator of values.
    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Self::List(Rc::new(RefCell::new(items.into_iter().collect())))
    }

    /// Builds a [`Value::Map`] from an iterator of key/value pairs.
    pub fn map(entries: impl IntoIterator<Item = (Value, Value)>) -> Self {
        Self::Map(Rc::new(RefCell::new(entries.into_iter().collect())))
    }

    /// Builds a [`Value::Set`] from an iterator of values.
    pub fn set(items: impl IntoIterator<Item = Value>) -> Self {
        Self::Set(Rc::new(RefCell::new(items.into_iter().collect())))
    }

    /// A short description of this value's type, used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Set(_) => "set",
            Self::Function(_) => "function",
            Self::Module(_) => "module",
            Self::Object(_) => "object",
        }
    }

    /// Truthiness in the conventional dynamic-language sense: `None`,
    /// `false`, zero, and empty collections are falsy, everything else is
    /// truthy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::None => false,
            Self::Bool(value) => *value,
            Self::Int(value) => *value != 0,
            Self::Float(value) => *value != 0.0,
            Self::Text(value) => !value.is_empty(),
            Self::List(items) => !items.borrow().is_empty(),
            Self::Map(entries) => !entries.borrow().is_empty(),
            Self::Set(items) => !items.borrow().is_empty(),
            Self::Function(_) | Self::Module(_) | Self::Object(_) => true,
        }
    }

    /// Returns `true` for [`Value::None`].
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    fn rank(&self) -> u8 {
        match self {
            Self::None => 0,
            Self::Bool(_) => 1,
            Self::Int(_) => 2,
            Self::Float(_) => 3,
            Self::Text(_) => 4,
            Self::List(_) => 5,
            Self::Map(_) => 6,
            Self::Set(_) => 7,
            Self::Function(_) => 8,
            Self::Module(_) => 9,
            Self::Object(_) => 10,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::None, Self::None) => Ordering::Equal,
            (Self::Bool(left), Self::Bool(right)) => left.cmp(right),
            (Self::Int(left), Self::Int(right)) => left.cmp(right),
            (Self::Float(left), Self::Float(right)) => left.total_cmp(right),
            (Self::Text(left), Self::Text(right)) => left.cmp(right),
            (Self::List(left), Self::List(right)) => {
                if Rc::ptr_eq(left, right) {
                    return Ordering::Equal;
                }
                left.borrow().cmp(&right.borrow())
            }
            (Self::Map(left), Self::Map(right)) => {
                if Rc::ptr_eq(left, right) {
                    return Ordering::Equal;
                }
                left.borrow().cmp(&right.borrow())
            }
            (Self::Set(left), Self::Set(right)) => {
                if Rc::ptr_eq(left, right) {
                    return Ordering::Equal;
                }
                left.borrow().cmp(&right.borrow())
            }
            (Self::Function(left), Self::Function(right)) => left.id().cmp(&right.id()),
            (Self::Module(left), Self::Module(right)) => {
                (Rc::as_ptr(left) as usize).cmp(&(Rc::as_ptr(right) as usize))
            }
            (Self::Object(left), Self::Object(right)) => {
                (Rc::as_ptr(left) as usize).cmp(&(Rc::as_ptr(right) as usize))
            }
            (left, right) => left.rank().cmp(&right.rank()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => formatter.write_str("None"),
            Self::Bool(value) => write!(formatter, "{value}"),
            Self::Int(value) => write!(formatter, "{value}"),
            Self::Float(value) => write!(formatter, "{value}"),
            Self::Text(value) => write!(formatter, "{value:?}"),
            Self::List(items) => formatter.debug_list().entries(items.borrow().iter()).finish(),
            Self::Map(entries) => formatter
                .debug_map()
                .entries(entries.borrow().iter().map(|(key, value)| (key, value)))
                .finish(),
            Self::Set(items) => formatter.debug_set().entries(items.borrow().iter()).finish(),
            Self::Function(function) => write!(formatter, "<function {}>", function.name()),
            Self::Module(module) => write!(formatter, "<module {}>", module.name()),
            Self::Object(_) => formatter.write_str("<object>"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Text displays bare; everything else reuses the debug form.
            Self::Text(value) => formatter.write_str(value),
            other => write!(formatter, "{other:?}"),
        }
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::None
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        // Saturating keeps the conversion total; indexes this large do not
        // occur in practice.
        Self::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::List(Rc::new(RefCell::new(items)))
    }
}

impl From<NativeFunction> for Value {
    fn from(function: NativeFunction) -> Self {
        Self::Function(function)
    }
}

impl From<Rc<Module>> for Value {
    fn from(module: Rc<Module>) -> Self {
        Self::Module(module)
    }
}

impl From<Rc<Object>> for Value {
    fn from(object: Rc<Object>) -> Self {
        Self::Object(object)
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Self::Object(Rc::new(object))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_of_a_list_share_storage() {
        let original = Value::list([Value::Int(1)]);
        let alias = original.clone();
        if let Value::List(items) = &original {
            items.borrow_mut().push(Value::Int(2));
        }
        assert_eq!(alias, Value::list([Value::Int(1), Value::Int(2)]));
    }

    #[test]
    fn float_ordering_is_total() {
        assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
        assert!(Value::Float(1.0) < Value::Float(2.0));
    }

    #[test]
    fn cross_variant_ordering_is_stable() {
        assert!(Value::None < Value::Bool(false));
        assert!(Value::Int(999) < Value::text(""));
    }
}
