//! Worker pool built on a dedicated multi-thread tokio runtime.
//!
//! Blocking closures run on the runtime's blocking threads, capped at the
//! worker count. Async tasks run on its worker threads. Both paths share
//! one semaphore, so no more than `max_concurrent` tasks are in flight.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use futures_util::future::try_join_all;
use tokio::runtime::{Builder, Handle, Runtime};
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinHandle};

use crate::error::{PoolError, Result};
use crate::options::PoolOptions;

/// Handle to one task submitted with [`WorkerPool::submit`].
pub struct TaskHandle<T> {
    id:      u64,
    inner:   JoinHandle<std::result::Result<T, JoinError>>,
    runtime: Handle,
}

impl<T> TaskHandle<T> {
    pub fn id(&self) -> u64 { self.id }

    pub fn is_finished(&self) -> bool { self.inner.is_finished() }

    /// Block until the task finishes.
    ///
    /// Must not be called from inside an async context.
    pub fn join(self) -> Result<T> {
        let TaskHandle { id, inner, runtime } = self;
        match runtime.block_on(inner) {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) | Err(err) => {
                tracing::debug!(id, error = %err, "task did not complete");
                Err(PoolError::from_join(id, err))
            }
        }
    }
}

/// Fixed-size pool of workers running independent tasks.
///
/// ```
/// use tessera_pool::{PoolOptions, WorkerPool};
///
/// let pool = WorkerPool::new(PoolOptions::new().workers(2)).unwrap();
/// let sums = pool
///     .map([10_000u64, 20_000], |n| (0..n).map(|i| i * i).sum::<u64>())
///     .unwrap();
///
/// assert_eq!(sums, vec![333_283_335_000, 2_666_466_670_000]);
/// ```
pub struct WorkerPool {
    runtime: Runtime,
    permits: Arc<Semaphore>,
    next_id: AtomicU64,
    options: PoolOptions,
}

impl WorkerPool {
    pub fn new(options: PoolOptions) -> Result<Self> {
        options.validate()?;

        let runtime = Builder::new_multi_thread()
            .worker_threads(options.worker_count())
            .max_blocking_threads(options.worker_count())
            .thread_name(options.thread_name_str())
            .enable_time()
            .build()
            .map_err(PoolError::Runtime)?;

        tracing::debug!(
            workers = options.worker_count(),
            max_concurrent = options.concurrency(),
            "worker pool started"
        );

        Ok(Self {
            runtime,
            permits: Arc::new(Semaphore::new(options.concurrency())),
            next_id: AtomicU64::new(0),
            options,
        })
    }

    pub fn workers(&self) -> usize { self.options.worker_count() }

    pub fn max_concurrent(&self) -> usize { self.options.concurrency() }

    /// Run a blocking closure on the pool.
    pub fn submit<F, T>(&self, task: F) -> TaskHandle<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let id = self.next_id();
        let permits = Arc::clone(&self.permits);
        let inner = self.runtime.spawn(async move {
            let _permit = permits.acquire_owned().await;
            tracing::trace!(id, "task started");
            tokio::task::spawn_blocking(task).await
        });

        TaskHandle {
            id,
            inner,
            runtime: self.runtime.handle().clone(),
        }
    }

    /// Apply `task` to every input on the pool.
    ///
    /// Results come back in input order, whatever order the workers finish in.
    /// Must not be called from inside an async context.
    pub fn map<I, F, T>(&self, inputs: I, task: F) -> Result<Vec<T>>
    where
        I: IntoIterator,
        I::Item: Send + 'static,
        F: Fn(I::Item) -> T + Send + Sync + 'static,
        T: Send + 'static,
    {
        let task = Arc::new(task);
        let handles: Vec<TaskHandle<T>> = inputs
            .into_iter()
            .map(|input| {
                let task = Arc::clone(&task);
                self.submit(move || task(input))
            })
            .collect();

        tracing::debug!(tasks = handles.len(), "map dispatched");
        handles.into_iter().map(TaskHandle::join).collect()
    }

    /// Run async tasks concurrently and collect their outputs in submission order.
    ///
    /// Must not be called from inside an async context.
    pub fn gather<I, Fut>(&self, futures: I) -> Result<Vec<Fut::Output>>
    where
        I: IntoIterator<Item = Fut>,
        Fut: Future + Send + 'static,
        Fut::Output: Send + 'static,
    {
        let spawned: Vec<_> = futures
            .into_iter()
            .map(|fut| {
                let id = self.next_id();
                let permits = Arc::clone(&self.permits);
                let handle = self.runtime.spawn(async move {
                    let _permit = permits.acquire_owned().await;
                    fut.await
                });
                async move { handle.await.map_err(|err| PoolError::from_join(id, err)) }
            })
            .collect();

        tracing::debug!(tasks = spawned.len(), "gather dispatched");
        self.runtime.block_on(try_join_all(spawned))
    }

    /// Stop the pool, waiting up to `timeout` for running tasks.
    pub fn shutdown(self, timeout: Duration) {
        tracing::debug!(submitted = self.next_id.load(Ordering::Relaxed), "worker pool shutting down");
        self.runtime.shutdown_timeout(timeout);
    }

    fn next_id(&self) -> u64 { self.next_id.fetch_add(1, Ordering::Relaxed) }
}
