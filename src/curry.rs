//! Placeholder-based partial application.
//!
//! A [`Template`] captures the argument shape of a future call: literal
//! values mixed with placeholder [`Slot`]s. Currying a callable against a
//! template yields a new callable; invoking that callable merges the
//! template with the actual arguments:
//!
//! - a [`Slot::Hole`] consumes the next actual positional argument: the
//!   Nth hole gets the Nth actual, regardless of where the holes sit in the
//!   template;
//! - a [`Slot::Index`] reads a specific actual argument directly, enabling
//!   reordering and duplication, and does **not** advance the hole cursor;
//! - a [`Slot::Rest`] swallows every actual argument from the cursor onward
//!   into one list; it is only legal as the last placeholder-bearing entry;
//! - actual arguments beyond the highest one consumed are appended to the
//!   positional result rather than dropped.
//!
//! The positional and keyword templates share a single cursor, so the order
//! in which actual arguments are taken is simply template order. Call-time
//! keyword arguments override same-named curry-time defaults before any
//! placeholder in them would resolve.
//!
//! # Examples
//!
//! ```
//! use fluentic::{args, template, wrap};
//! use fluentic::value::{NativeFunction, Value};
//!
//! let join = NativeFunction::new("join", |arguments| {
//!     let rendered: Vec<String> = arguments
//!         .positional()
//!         .iter()
//!         .map(ToString::to_string)
//!         .collect();
//!     Ok(Some(Value::text(rendered.join("-"))))
//! });
//!
//! // Left-fill the hole, keep "foo" fixed.
//! let curried = wrap(join).curry(template![__, "foo"])?;
//! let result = curried.call(args!["bar"])?;
//! assert_eq!(result.unwrap(), Value::text("bar-foo"));
//! # Ok::<(), fluentic::error::FluentError>(())
//! ```

use std::collections::BTreeMap;

use smallvec::SmallVec;
use tracing::debug;

use crate::error::FluentError;
use crate::value::{Arguments, Value};

/// One entry of an argument template.
#[derive(Clone, Debug)]
pub enum Slot {
    /// A literal value, passed through unchanged.
    Value(Value),
    /// The generic hole: fills from the next unconsumed actual argument.
    Hole,
    /// An explicit index into the actual argument list.
    Index(usize),
    /// The variadic catch-all: collects all remaining actual arguments.
    Rest,
}

impl Slot {
    const fn is_placeholder(&self) -> bool {
        matches!(self, Self::Hole | Self::Index(_) | Self::Rest)
    }
}

/// An argument template: positional slots plus ordered keyword slots.
///
/// Placeholders are distinguished variants of [`Slot`], never sentinel
/// values drawn from the value domain; a template entry that merely
/// *equals* some placeholder-looking value is still a literal.
#[derive(Clone, Debug, Default)]
pub struct Template {
    positional: Vec<Slot>,
    keyword: Vec<(String, Slot)>,
}

impl Template {
    /// An empty template.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a literal positional value.
    #[must_use]
    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(Slot::Value(value.into()));
        self
    }

    /// Appends a generic hole.
    #[must_use]
    pub fn hole(mut self) -> Self {
        self.positional.push(Slot::Hole);
        self
    }

    /// Appends an indexed placeholder.
    #[must_use]
    pub fn index(mut self, index: usize) -> Self {
        self.positional.push(Slot::Index(index));
        self
    }

    /// Appends the variadic catch-all placeholder.
    #[must_use]
    pub fn rest(mut self) -> Self {
        self.positional.push(Slot::Rest);
        self
    }

    /// Appends a keyword slot.
    #[must_use]
    pub fn keyword(mut self, name: impl Into<String>, slot: Slot) -> Self {
        self.keyword.push((name.into(), slot));
        self
    }

    /// Checks the variadic-last contract.
    ///
    /// # Errors
    ///
    /// [`FluentError::MisplacedVariadicPlaceholder`] when a [`Slot::Rest`]
    /// is followed by any further placeholder-bearing entry, or appears
    /// more than once.
    pub fn validate(&self) -> Result<(), FluentError> {
        let mut rest_seen = false;
        for slot in self
            .positional
            .iter()
            .chain(self.keyword.iter().map(|(_, slot)| slot))
        {
            if rest_seen && slot.is_placeholder() {
                return Err(FluentError::MisplacedVariadicPlaceholder);
            }
            if matches!(slot, Slot::Rest) {
                rest_seen = true;
            }
        }
        // A positional Rest with literal positional entries after it is
        // also misplaced, even though those entries are not placeholders.
        let positional_rest = self
            .positional
            .iter()
            .position(|slot| matches!(slot, Slot::Rest));
        if let Some(position) = positional_rest
            && position + 1 != self.positional.len()
        {
            return Err(FluentError::MisplacedVariadicPlaceholder);
        }
        Ok(())
    }

    /// Merges the template against the actual arguments of one call.
    ///
    /// # Errors
    ///
    /// [`FluentError::InsufficientArguments`] when a placeholder resolves
    /// against too short an actual argument list.
    pub fn merge(&self, actual: Arguments) -> Result<Arguments, FluentError> {
        let (actual_positional, actual_keyword) = actual.into_parts();

        let mut merged_positional: SmallVec<[Value; 8]> = SmallVec::new();
        let mut cursor = 0_usize;
        let mut highest_used: Option<usize> = None;

        let mark = |highest: &mut Option<usize>, index: usize| {
            *highest = Some(highest.map_or(index, |current| current.max(index)));
        };
        let need = |index: usize| -> Result<(), FluentError> {
            if index < actual_positional.len() {
                Ok(())
            } else {
                Err(FluentError::InsufficientArguments {
                    required: index + 1,
                    received: actual_positional.len(),
                })
            }
        };

        for slot in &self.positional {
            match slot {
                Slot::Value(value) => merged_positional.push(value.clone()),
                Slot::Hole => {
                    need(cursor)?;
                    merged_positional.push(actual_positional[cursor].clone());
                    mark(&mut highest_used, cursor);
                    cursor += 1;
                }
                Slot::Index(index) => {
                    need(*index)?;
                    merged_positional.push(actual_positional[*index].clone());
                    mark(&mut highest_used, *index);
                }
                Slot::Rest => {
                    let collected: Vec<Value> = actual_positional[cursor.min(actual_positional.len())..].to_vec();
                    if !actual_positional.is_empty() && cursor < actual_positional.len() {
                        mark(&mut highest_used, actual_positional.len() - 1);
                    }
                    merged_positional.push(Value::from(collected));
                    cursor = actual_positional.len();
                }
            }
        }

        let mut merged_keyword: BTreeMap<String, Value> = BTreeMap::new();
        for (name, slot) in &self.keyword {
            // A call-time keyword argument overrides the template slot
            // before it would resolve, so an overridden placeholder never
            // consumes an actual argument.
            if let Some(supplied) = actual_keyword.get(name) {
                merged_keyword.insert(name.clone(), supplied.clone());
                continue;
            }
            match slot {
                Slot::Value(value) => {
                    merged_keyword.insert(name.clone(), value.clone());
                }
                Slot::Hole => {
                    need(cursor)?;
                    merged_keyword.insert(name.clone(), actual_positional[cursor].clone());
                    mark(&mut highest_used, cursor);
                    cursor += 1;
                }
                Slot::Index(index) => {
                    need(*index)?;
                    merged_keyword.insert(name.clone(), actual_positional[*index].clone());
                    mark(&mut highest_used, *index);
                }
                Slot::Rest => {
                    let collected: Vec<Value> = actual_positional[cursor.min(actual_positional.len())..].to_vec();
                    if !actual_positional.is_empty() && cursor < actual_positional.len() {
                        mark(&mut highest_used, actual_positional.len() - 1);
                    }
                    merged_keyword.insert(name.clone(), Value::from(collected));
                    cursor = actual_positional.len();
                }
            }
        }

        // Call-time keyword arguments the template never named pass through.
        for (name, value) in actual_keyword {
            merged_keyword.entry(name).or_insert(value);
        }

        // Leftover actuals are appended, not dropped.
        let leftover_start = highest_used.map_or(0, |highest| highest + 1);
        merged_positional.extend(
            actual_positional
                .get(leftover_start..)
                .unwrap_or_default()
                .iter()
                .cloned(),
        );

        debug!(
            template_len = self.positional.len() + self.keyword.len(),
            merged_len = merged_positional.len(),
            "merged curried arguments"
        );
        Ok(Arguments::from_parts(
            merged_positional.into_vec(),
            merged_keyword,
        ))
    }
}

/// Builds a [`Template`] with the placeholder spelling of the curry engine.
///
/// Entries are comma separated: `__` is the generic hole, `#index` an
/// indexed placeholder, `_args` the variadic catch-all, anything else a
/// literal expression. Keyword entries follow after a `;` as
/// `name = entry`.
///
/// # Examples
///
/// ```
/// use fluentic::template;
///
/// let reorder = template![#1, #0];
/// let left_fill = template![__, "fixed"];
/// let splat = template![1, _args];
/// let with_keywords = template!["positional"; flag = __, tail = _args];
/// assert!(with_keywords.validate().is_ok());
/// # let _ = (reorder, left_fill, splat);
/// ```
#[macro_export]
macro_rules! template {
    // Positional section.
    (@build [$acc:expr]) => { $acc };
    (@build [$acc:expr] , $($rest:tt)*) => {
        $crate::template!(@build [$acc] $($rest)*)
    };
    (@build [$acc:expr] ; $($keyword:tt)*) => {
        $crate::template!(@keyword [$acc] $($keyword)*)
    };
    (@build [$acc:expr] __ $($rest:tt)*) => {
        $crate::template!(@build [$acc.hole()] $($rest)*)
    };
    (@build [$acc:expr] _args $($rest:tt)*) => {
        $crate::template!(@build [$acc.rest()] $($rest)*)
    };
    (@build [$acc:expr] # $index:literal $($rest:tt)*) => {
        $crate::template!(@build [$acc.index($index)] $($rest)*)
    };
    (@build [$acc:expr] $value:expr , $($rest:tt)*) => {
        $crate::template!(@build [$acc.value($value)] $($rest)*)
    };
    (@build [$acc:expr] $value:expr ; $($keyword:tt)*) => {
        $crate::template!(@keyword [$acc.value($value)] $($keyword)*)
    };
    (@build [$acc:expr] $value:expr) => { $acc.value($value) };

    // Keyword section.
    (@keyword [$acc:expr]) => { $acc };
    (@keyword [$acc:expr] $name:ident = __ $(, $($rest:tt)*)?) => {
        $crate::template!(@keyword
            [$acc.keyword(stringify!($name), $crate::curry::Slot::Hole)]
            $($($rest)*)?)
    };
    (@keyword [$acc:expr] $name:ident = _args $(, $($rest:tt)*)?) => {
        $crate::template!(@keyword
            [$acc.keyword(stringify!($name), $crate::curry::Slot::Rest)]
            $($($rest)*)?)
    };
    (@keyword [$acc:expr] $name:ident = # $index:literal $(, $($rest:tt)*)?) => {
        $crate::template!(@keyword
            [$acc.keyword(stringify!($name), $crate::curry::Slot::Index($index))]
            $($($rest)*)?)
    };
    (@keyword [$acc:expr] $name:ident = $value:expr , $($rest:tt)*) => {
        $crate::template!(@keyword
            [$acc.keyword(
                stringify!($name),
                $crate::curry::Slot::Value($crate::value::Value::from($value)),
            )]
            $($rest)*)
    };
    (@keyword [$acc:expr] $name:ident = $value:expr) => {
        $acc.keyword(
            stringify!($name),
            $crate::curry::Slot::Value($crate::value::Value::from($value)),
        )
    };

    () => {
        $crate::curry::Template::new()
    };
    ($($entry:tt)+) => {
        $crate::template!(@build [$crate::curry::Template::new()] $($entry)+)
    };
}
