//! Name-keyed type registry.
//!
//! # Architecture
//!
//! A type joins the registry by implementing [`Registered`]. Registration is
//! an explicit call, either [`Registry::register`] on a registry you own or
//! [`register_type!`] which records the type at link time so that
//! [`Registry::global`] picks it up once, on first access.
//!
//! Keys are the lowercased type names. The registry never removes entries
//! and never rejects a duplicate: the last registration for a key wins.
//!
//! # Example
//!
//! ```
//! use tessera_registry::{register_type, Registered, Registry, Runnable, RunError, TypeDescriptor};
//!
//! #[derive(Default)]
//! struct CsvPlugin;
//!
//! impl Registered for CsvPlugin {
//!     const NAME: &'static str = "CsvPlugin";
//!     const PARENT: Option<&'static str> = Some("Plugin");
//!
//!     fn descriptor() -> TypeDescriptor {
//!         TypeDescriptor::of::<Self>().runnable::<Self>()
//!     }
//! }
//!
//! impl Runnable for CsvPlugin {
//!     fn run(&self) -> Result<String, RunError> {
//!         Ok("csv loaded".to_string())
//!     }
//! }
//!
//! register_type!(CsvPlugin);
//!
//! # fn main() {
//! let registry = Registry::global();
//! assert!(registry.lookup("csvplugin").unwrap().is::<CsvPlugin>());
//! assert_eq!(registry.subtypes("plugin").len(), 1);
//! assert_eq!(registry.run("CsvPlugin").unwrap(), "csv loaded");
//! # }
//! ```

pub use descriptor::{Capability, Registered, Runnable, TypeDescriptor, canonical_name};
pub use error::{Error, NotFoundError, Result, RunError};
pub use registry::{Registration, Registry};
pub use singleton::Singletons;

#[doc(hidden)]
pub use inventory;

mod descriptor;
mod error;
mod registry;
mod singleton;

/// Record a [`Registered`] type for [`Registry::global`].
#[macro_export]
macro_rules! register_type {
    ($($ty:ty),+ $(,)?) => {
        $(
            $crate::inventory::submit! {
                $crate::Registration::new::<$ty>()
            }
        )+
    };
}
