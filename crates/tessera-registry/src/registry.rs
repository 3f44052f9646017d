//! Name-keyed registry of type descriptors.
//!
//! Entries are only ever added. Registering a name that already exists
//! replaces the previous descriptor without complaint, so the last
//! registration for a name wins.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use once_cell::sync::Lazy;

use crate::descriptor::{Capability, Registered, Runnable, TypeDescriptor, canonical_name};
use crate::error::{Error, NotFoundError, Result};

/// Link-time registration record, submitted with [`register_type!`](crate::register_type).
pub struct Registration {
    describe: fn() -> TypeDescriptor,
}

impl Registration {
    pub const fn new<T: Registered>() -> Self {
        Self {
            describe: T::descriptor,
        }
    }

    pub fn descriptor(&self) -> TypeDescriptor { (self.describe)() }
}

inventory::collect!(Registration);

static GLOBAL: Lazy<Registry> = Lazy::new(Registry::from_inventory);

#[derive(Debug, Default)]
pub struct Registry {
    entries: RwLock<HashMap<String, Arc<TypeDescriptor>>>,
}

impl Registry {
    pub fn new() -> Self { Self::default() }

    /// Process-wide registry, populated from every [`register_type!`](crate::register_type)
    /// submission on first access.
    pub fn global() -> &'static Registry { &GLOBAL }

    /// Registry holding every type submitted through [`register_type!`](crate::register_type).
    pub fn from_inventory() -> Self {
        let registry = Self::new();
        for registration in inventory::iter::<Registration> {
            registry.register_descriptor(registration.descriptor());
        }
        tracing::debug!(types = registry.len(), "registry populated from inventory");
        registry
    }

    /// Record `T` under its lowercased name, returning the displaced entry.
    pub fn register<T: Registered>(&self) -> Option<Arc<TypeDescriptor>> {
        self.register_descriptor(T::descriptor())
    }

    /// Record `T` under `name` instead of its own name.
    pub fn register_as<T: Registered>(&self, name: impl Into<String>) -> Option<Arc<TypeDescriptor>> {
        self.register_descriptor(T::descriptor().renamed(name))
    }

    pub fn register_descriptor(&self, descriptor: TypeDescriptor) -> Option<Arc<TypeDescriptor>> {
        let key = descriptor.key().to_string();
        let previous = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.clone(), Arc::new(descriptor));

        match &previous {
            Some(old) => tracing::debug!(%key, replaced = old.type_path(), "type re-registered"),
            None => tracing::trace!(%key, "type registered"),
        }
        previous
    }

    /// Descriptor registered under `name`, compared case-insensitively.
    pub fn lookup(&self, name: &str) -> std::result::Result<Arc<TypeDescriptor>, NotFoundError> {
        let key = canonical_name(name);
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned()
            .ok_or_else(|| {
                tracing::debug!(name, "registry lookup missed");
                NotFoundError::new(name)
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&canonical_name(name))
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Registered keys in ascending order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    /// Every descriptor, ordered by key.
    pub fn descriptors(&self) -> Vec<Arc<TypeDescriptor>> {
        self.filtered(|_| true)
    }

    /// Descriptors whose parent is `parent`.
    pub fn subtypes(&self, parent: &str) -> Vec<Arc<TypeDescriptor>> {
        let parent = canonical_name(parent);
        self.filtered(|desc| desc.parent() == Some(parent.as_str()))
    }

    pub fn with_capability(&self, capability: Capability) -> Vec<Arc<TypeDescriptor>> {
        self.filtered(|desc| desc.has(capability))
    }

    /// Look up `name` and build it as a [`Runnable`].
    pub fn instantiate_runnable(&self, name: &str) -> Result<Box<dyn Runnable>> {
        let descriptor = self.lookup(name)?;
        descriptor
            .instantiate_runnable()
            .ok_or_else(|| Error::MissingCapability {
                name:       descriptor.name().to_string(),
                capability: Capability::Runnable,
            })
    }

    /// Look up `name`, build it and run it once.
    pub fn run(&self, name: &str) -> Result<String> {
        let runner = self.instantiate_runnable(name)?;
        runner.run().map_err(|source| Error::Run {
            name: canonical_name(name),
            source,
        })
    }

    fn filtered(&self, keep: impl Fn(&TypeDescriptor) -> bool) -> Vec<Arc<TypeDescriptor>> {
        let mut out: Vec<Arc<TypeDescriptor>> = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|desc| keep(desc))
            .cloned()
            .collect();
        out.sort_by(|a, b| a.key().cmp(b.key()));
        out
    }
}
