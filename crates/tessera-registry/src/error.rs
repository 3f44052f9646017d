//! Error types for registry operations.

use thiserror::Error;

use crate::descriptor::Capability;

/// Lookup of a name that was never registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no type registered under '{name}'")]
pub struct NotFoundError {
    name: String,
}

impl NotFoundError {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str { &self.name }
}

/// Failure reported by a [`Runnable`](crate::Runnable) implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct RunError(pub String);

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error("type '{name}' does not provide the {capability} capability")]
    MissingCapability { name: String, capability: Capability },

    #[error("run failed for '{name}': {source}")]
    Run {
        name: String,
        #[source]
        source: RunError,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
