//! Type descriptors and the traits a registrable type implements.
//!
//! # Architecture
//!
//! [`Registered`] is the designated base: a type opts into the registry by
//! implementing it, which fixes its display name and optional parent at
//! compile time. Capabilities such as [`Runnable`] are declared on the
//! descriptor, so callers check conformance through the descriptor instead
//! of probing objects at runtime.

use std::any::{Any, TypeId};
use std::fmt;

use crate::error::RunError;

/// Canonical registry key for a type or lookup name.
pub fn canonical_name(name: &str) -> String {
    name.to_lowercase()
}

/// The designated base for registrable types.
///
/// ```
/// use tessera_registry::{Registered, Registry};
///
/// struct BaseModel;
/// impl Registered for BaseModel {
///     const NAME: &'static str = "BaseModel";
/// }
///
/// struct User;
/// impl Registered for User {
///     const NAME: &'static str = "User";
///     const PARENT: Option<&'static str> = Some(BaseModel::NAME);
/// }
///
/// let registry = Registry::new();
/// registry.register::<BaseModel>();
/// registry.register::<User>();
///
/// assert_eq!(registry.lookup("user").unwrap().parent(), Some("basemodel"));
/// ```
pub trait Registered: Any + Send + Sync + Sized {
    const NAME: &'static str;

    const PARENT: Option<&'static str> = None;

    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::of::<Self>()
    }
}

/// Something that can be run on demand.
pub trait Runnable: Send + Sync {
    fn run(&self) -> Result<String, RunError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Runnable,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Runnable => f.write_str("runnable"),
        }
    }
}

type RunnableFactory = fn() -> Box<dyn Runnable>;

fn build_runnable<T: Runnable + Default + 'static>() -> Box<dyn Runnable> {
    Box::new(T::default())
}

#[derive(Clone)]
pub struct TypeDescriptor {
    name:      String,
    key:       String,
    type_id:   TypeId,
    type_path: &'static str,
    parent:    Option<String>,
    runnable:  Option<RunnableFactory>,
}

impl TypeDescriptor {
    /// Describe `T` from its [`Registered`] constants.
    pub fn of<T: Registered>() -> Self {
        Self {
            name:      T::NAME.to_string(),
            key:       canonical_name(T::NAME),
            type_id:   TypeId::of::<T>(),
            type_path: std::any::type_name::<T>(),
            parent:    T::PARENT.map(canonical_name),
            runnable:  None,
        }
    }

    /// Same type under another name; the key follows the new name.
    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self.key = canonical_name(&self.name);
        self
    }

    /// Declare the [`Runnable`] capability, built through `T::default()`.
    pub fn runnable<T: Runnable + Default + 'static>(mut self) -> Self {
        self.runnable = Some(build_runnable::<T>);
        self
    }

    pub fn name(&self) -> &str { &self.name }

    pub fn key(&self) -> &str { &self.key }

    pub fn type_id(&self) -> TypeId { self.type_id }

    pub fn type_path(&self) -> &'static str { self.type_path }

    pub fn parent(&self) -> Option<&str> { self.parent.as_deref() }

    pub fn is<T: Any>(&self) -> bool { self.type_id == TypeId::of::<T>() }

    pub fn has(&self, capability: Capability) -> bool {
        match capability {
            Capability::Runnable => self.runnable.is_some(),
        }
    }

    pub fn capabilities(&self) -> Vec<Capability> {
        [Capability::Runnable]
            .into_iter()
            .filter(|cap| self.has(*cap))
            .collect()
    }

    /// Fresh instance through the declared [`Runnable`] constructor.
    pub fn instantiate_runnable(&self) -> Option<Box<dyn Runnable>> {
        self.runnable.map(|build| build())
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("key", &self.key)
            .field("type_path", &self.type_path)
            .field("parent", &self.parent)
            .field("capabilities", &self.capabilities())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain;

    impl Registered for Plain {
        const NAME: &'static str = "PlainModel";
    }

    #[derive(Default)]
    struct Task;

    impl Registered for Task {
        const NAME: &'static str = "Task";
        const PARENT: Option<&'static str> = Some("Plain");

        fn descriptor() -> TypeDescriptor {
            TypeDescriptor::of::<Self>().runnable::<Self>()
        }
    }

    impl Runnable for Task {
        fn run(&self) -> Result<String, RunError> {
            Ok("task ran".to_string())
        }
    }

    #[test]
    fn test_descriptor_lowercases_key_and_parent() {
        let desc = Task::descriptor();

        assert_eq!(desc.name(), "Task");
        assert_eq!(desc.key(), "task");
        assert_eq!(desc.parent(), Some("plain"));
        assert!(desc.is::<Task>());
        assert!(!desc.is::<Plain>());
    }

    #[test]
    fn test_capability_is_declared_not_probed() {
        let plain = Plain::descriptor();
        let task = Task::descriptor();

        assert!(plain.capabilities().is_empty());
        assert!(plain.instantiate_runnable().is_none());

        assert_eq!(task.capabilities(), vec![Capability::Runnable]);
        let runner = task.instantiate_runnable().unwrap();
        assert_eq!(runner.run().unwrap(), "task ran");
    }

    #[test]
    fn test_debug_lists_capabilities() {
        let out = format!("{:?}", Task::descriptor());
        assert!(out.contains("Runnable"));
        assert!(out.contains("\"task\""));
    }

    #[test]
    fn test_renamed_rekeys() {
        let desc = Plain::descriptor().renamed("Alias");

        assert_eq!(desc.name(), "Alias");
        assert_eq!(desc.key(), "alias");
        assert!(desc.is::<Plain>());
    }
}
