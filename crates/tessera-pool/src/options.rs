use crate::error::{PoolError, Result};

const DEFAULT_WORKERS: usize = 4;

/// Configuration for a [`WorkerPool`](crate::WorkerPool).
#[derive(Debug, Clone)]
pub struct PoolOptions {
    workers:        usize,
    max_concurrent: Option<usize>,
    thread_name:    String,
}

impl Default for PoolOptions {
    fn default() -> Self { Self::new() }
}

impl PoolOptions {
    pub fn new() -> Self {
        Self {
            workers:        DEFAULT_WORKERS,
            max_concurrent: None,
            thread_name:    "tessera-worker".to_string(),
        }
    }

    /// Number of worker threads. Fixed for the life of the pool.
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Tasks allowed in flight at once. Defaults to the worker count.
    pub fn max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = Some(max_concurrent);
        self
    }

    pub fn thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    pub fn worker_count(&self) -> usize { self.workers }

    pub fn concurrency(&self) -> usize { self.max_concurrent.unwrap_or(self.workers) }

    pub fn thread_name_str(&self) -> &str { &self.thread_name }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(PoolError::ZeroWorkers);
        }
        if self.concurrency() == 0 {
            return Err(PoolError::ZeroConcurrency);
        }
        Ok(())
    }
}
