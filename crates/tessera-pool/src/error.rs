//! Error types for pool operations.

use std::io;

use thiserror::Error;
use tokio::task::JoinError;

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("worker pool needs at least one worker")]
    ZeroWorkers,

    #[error("concurrency limit must be at least 1")]
    ZeroConcurrency,

    #[error("failed to start worker runtime")]
    Runtime(#[source] io::Error),

    #[error("task {id} panicked")]
    TaskPanicked { id: u64 },

    #[error("task {id} was cancelled before completing")]
    TaskCancelled { id: u64 },
}

impl PoolError {
    pub(crate) fn from_join(id: u64, err: JoinError) -> Self {
        if err.is_panic() {
            PoolError::TaskPanicked { id }
        } else {
            PoolError::TaskCancelled { id }
        }
    }
}

pub type Result<T> = std::result::Result<T, PoolError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_runtime_error_keeps_cause_as_source() {
        let err = PoolError::Runtime(io::Error::other("no threads left"));

        assert_eq!(err.to_string(), "failed to start worker runtime");
        assert_eq!(err.source().map(ToString::to_string).as_deref(), Some("no threads left"));
    }
}
