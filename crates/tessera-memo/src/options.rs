use std::num::NonZeroUsize;

use crate::error::{MemoError, Result};

/// How many results a cache may hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Capacity {
    /// Never evicts; the cache only grows.
    #[default]
    Unbounded,
    /// Evicts the least recently used entry once full.
    Bounded(NonZeroUsize),
}

impl Capacity {
    pub fn bounded(limit: usize) -> Result<Self> {
        NonZeroUsize::new(limit)
            .map(Capacity::Bounded)
            .ok_or(MemoError::ZeroCapacity)
    }

    /// `None` means unbounded.
    pub fn from_limit(limit: Option<usize>) -> Result<Self> {
        match limit {
            Some(limit) => Self::bounded(limit),
            None => Ok(Capacity::Unbounded),
        }
    }

    pub fn limit(&self) -> Option<usize> {
        match self {
            Capacity::Unbounded => None,
            Capacity::Bounded(limit) => Some(limit.get()),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct MemoOptions {
    capacity: Capacity,
    label:    &'static str,
}

impl Default for MemoOptions {
    fn default() -> Self { Self::new() }
}

impl MemoOptions {
    pub fn new() -> Self {
        Self {
            capacity: Capacity::Unbounded,
            label:    "memo",
        }
    }

    pub fn capacity(mut self, capacity: Capacity) -> Self {
        self.capacity = capacity;
        self
    }

    /// Name used in log events.
    pub fn label(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }

    pub fn capacity_value(&self) -> Capacity { self.capacity }

    pub fn label_str(&self) -> &'static str { self.label }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_capacity_rejected() {
        assert_eq!(Capacity::bounded(0), Err(MemoError::ZeroCapacity));
        assert_eq!(Capacity::from_limit(Some(0)), Err(MemoError::ZeroCapacity));
    }

    #[test]
    fn test_from_limit() {
        assert_eq!(Capacity::from_limit(None), Ok(Capacity::Unbounded));
        assert_eq!(Capacity::from_limit(Some(3)).unwrap().limit(), Some(3));
        assert_eq!(Capacity::Unbounded.limit(), None);
    }

    #[test]
    fn test_options_builder() {
        let options = MemoOptions::new()
            .capacity(Capacity::bounded(8).unwrap())
            .label("fib");

        assert_eq!(options.capacity_value().limit(), Some(8));
        assert_eq!(options.label_str(), "fib");
    }
}
