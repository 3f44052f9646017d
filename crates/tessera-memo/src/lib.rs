//! Memoization for pure functions.
//!
//! - [`Memo`] caches results keyed by argument (use a tuple for several
//!   arguments). [`Capacity::Unbounded`] keeps every result for the life of
//!   the memo; [`Capacity::Bounded`] evicts the least recently used entry.
//! - [`Cached`] computes a single value on first access.

pub use cached::Cached;
pub use error::{MemoError, Result};
pub use memo::{CacheInfo, Memo};
pub use options::{Capacity, MemoOptions};

mod cached;
mod error;
mod memo;
mod options;
