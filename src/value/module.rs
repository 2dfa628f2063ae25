//! Imports as expressions.
//!
//! A [`ModuleRegistry`] maps dotted paths to [`Module`]s. Wrapping the
//! registry's virtual root with [`ModuleRegistry::lib`] turns attribute
//! access into import resolution: `lib.attr("math")?.attr("floor")?` walks
//! from the root to the `math` module and hands back its `floor` function,
//! pre-wrapped and ready to chain off of. No intermediate name ever enters
//! the caller's scope.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use tracing::debug;

use crate::chain::{Chain, wrap};
use crate::error::FluentError;
use crate::value::{NativeFunction, Value};

#[derive(Default)]
struct RegistryInner {
    modules: RefCell<BTreeMap<String, Rc<Module>>>,
}

/// A name-to-module resolver.
///
/// # Examples
///
/// ```
/// use fluentic::value::{ModuleRegistry, Value};
///
/// let registry = ModuleRegistry::new();
/// registry
///     .register("math")
///     .constant("pi", std::f64::consts::PI)
///     .install();
///
/// let pi = registry.lib().attr("math")?.attr("pi")?;
/// assert_eq!(pi.unwrap(), Value::Float(std::f64::consts::PI));
/// # Ok::<(), fluentic::error::FluentError>(())
/// ```
#[derive(Clone, Default)]
pub struct ModuleRegistry {
    inner: Rc<RegistryInner>,
}

impl ModuleRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts registering a module at the given dotted path.
    pub fn register(&self, path: impl Into<String>) -> ModuleBuilder<'_> {
        ModuleBuilder {
            registry: self,
            path: path.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Wraps the virtual root module; attribute access resolves imports.
    #[must_use]
    pub fn lib(&self) -> Chain {
        let root = Rc::new(Module {
            path: String::new(),
            attributes: BTreeMap::new(),
            registry: Rc::downgrade(&self.inner),
        });
        wrap(Value::Module(root))
    }
}

/// Builder for one module's attribute table.
pub struct ModuleBuilder<'registry> {
    registry: &'registry ModuleRegistry,
    path: String,
    attributes: BTreeMap<String, Value>,
}

impl ModuleBuilder<'_> {
    /// Adds a function attribute.
    #[must_use]
    pub fn function(
        mut self,
        name: &str,
        target: impl Fn(crate::value::Arguments) -> Result<Option<Value>, FluentError> + 'static,
    ) -> Self {
        let qualified = format!("{}.{name}", self.path);
        self.attributes
            .insert(name.to_owned(), Value::Function(NativeFunction::new(qualified, target)));
        self
    }

    /// Adds a constant attribute.
    #[must_use]
    pub fn constant(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Installs the module into the registry and returns it.
    pub fn install(self) -> Rc<Module> {
        let module = Rc::new(Module {
            path: self.path.clone(),
            attributes: self.attributes,
            registry: Rc::downgrade(&self.registry.inner),
        });
        self.registry
            .inner
            .modules
            .borrow_mut()
            .insert(self.path, Rc::clone(&module));
        module
    }
}

/// A registered module: a dotted path plus an attribute table.
///
/// Attribute access checks the table first, then falls back to resolving
/// `self.path + "." + name` through the registry, so submodules import
/// lazily as expressions.
pub struct Module {
    path: String,
    attributes: BTreeMap<String, Value>,
    registry: Weak<RegistryInner>,
}

impl Module {
    /// The full dotted path; empty for the virtual root.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The diagnostic name: the last path segment, or `lib` for the root.
    #[must_use]
    pub fn name(&self) -> &str {
        if self.path.is_empty() {
            "lib"
        } else {
            self.path.rsplit('.').next().unwrap_or(&self.path)
        }
    }

    pub(crate) fn attribute(&self, name: &str) -> Result<Value, FluentError> {
        if let Some(found) = self.attributes.get(name) {
            return Ok(found.clone());
        }

        let dotted = if self.path.is_empty() {
            name.to_owned()
        } else {
            format!("{}.{name}", self.path)
        };
        debug!(module = %dotted, "resolving import");

        if let Some(registry) = self.registry.upgrade() {
            if let Some(found) = registry.modules.borrow().get(&dotted) {
                return Ok(Value::Module(Rc::clone(found)));
            }
            // An intermediate segment of a registered dotted path resolves
            // as a virtual module, so `strings.case` is reachable without
            // registering `strings` itself.
            let prefix = format!("{dotted}.");
            if registry
                .modules
                .borrow()
                .keys()
                .any(|path| path.starts_with(&prefix))
            {
                return Ok(Value::Module(Rc::new(Module {
                    path: dotted,
                    attributes: BTreeMap::new(),
                    registry: Weak::clone(&self.registry),
                })));
            }
        }
        Err(FluentError::MissingAttribute {
            name: name.to_owned(),
            on: "module",
        })
    }
}
