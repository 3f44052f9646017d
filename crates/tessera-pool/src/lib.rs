//! Fixed-size worker pool.
//!
//! Tasks are independent: they share no mutable state, are never cancelled
//! and complete in no particular order. [`WorkerPool::map`] and
//! [`WorkerPool::gather`] hand results back in submission order.

pub use error::{PoolError, Result};
pub use options::PoolOptions;
pub use pool::{TaskHandle, WorkerPool};

mod error;
mod options;
mod pool;
