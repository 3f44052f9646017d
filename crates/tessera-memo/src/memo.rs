//! Memoizing wrapper around a pure function.

use std::fmt;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use lru::LruCache;

use crate::error::Result;
use crate::options::{Capacity, MemoOptions};

type MemoFn<K, V> = dyn Fn(&Memo<K, V>, &K) -> V + Send + Sync;

/// Snapshot of a cache's counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheInfo {
    pub hits:      u64,
    pub misses:    u64,
    pub evictions: u64,
    pub size:      usize,
    /// `None` when unbounded.
    pub capacity:  Option<usize>,
}

/// Caches the results of a deterministic function keyed by its arguments.
///
/// The wrapped function receives the memo itself, so recursive definitions
/// reuse cached sub-results:
///
/// ```
/// use tessera_memo::Memo;
///
/// let fib = Memo::unbounded(|memo: &Memo<u64, u64>, &n: &u64| {
///     if n < 2 { n } else { memo.invoke(n - 1) + memo.invoke(n - 2) }
/// });
///
/// assert_eq!(fib.invoke(30), 832_040);
/// assert_eq!(fib.info().misses, 31);
/// ```
///
/// The cache lock is released while the function runs. Two threads asking
/// for the same missing key at once may both compute it; the function is
/// pure, so either result is the right one.
pub struct Memo<K, V> {
    cache:     Mutex<LruCache<K, V>>,
    func:      Box<MemoFn<K, V>>,
    options:   MemoOptions,
    hits:      AtomicU64,
    misses:    AtomicU64,
    evictions: AtomicU64,
}

impl<K, V> Memo<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn with_options<F>(options: MemoOptions, func: F) -> Self
    where
        F: Fn(&Memo<K, V>, &K) -> V + Send + Sync + 'static,
    {
        let cache = match options.capacity_value() {
            Capacity::Unbounded => LruCache::unbounded(),
            Capacity::Bounded(limit) => LruCache::new(limit),
        };
        Self {
            cache: Mutex::new(cache),
            func: Box::new(func),
            options,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    /// Never evicts: every distinct key stays cached for the memo's lifetime.
    pub fn unbounded<F>(func: F) -> Self
    where
        F: Fn(&Memo<K, V>, &K) -> V + Send + Sync + 'static,
    {
        Self::with_options(MemoOptions::new(), func)
    }

    /// Holds at most `limit` results, dropping the least recently used.
    pub fn bounded<F>(limit: usize, func: F) -> Result<Self>
    where
        F: Fn(&Memo<K, V>, &K) -> V + Send + Sync + 'static,
    {
        let options = MemoOptions::new().capacity(Capacity::bounded(limit)?);
        Ok(Self::with_options(options, func))
    }

    /// Cached result for `key`, computing and storing it on a miss.
    pub fn invoke(&self, key: K) -> V {
        if let Some(value) = self.lock().get(&key).cloned() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return value;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let value = (self.func)(self, &key);
        self.store(key, value.clone());
        value
    }

    /// Whether `key` is cached. Does not refresh its recency.
    pub fn contains(&self, key: &K) -> bool { self.lock().contains(key) }

    pub fn len(&self) -> usize { self.lock().len() }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub fn capacity(&self) -> Capacity { self.options.capacity_value() }

    pub fn info(&self) -> CacheInfo {
        CacheInfo {
            hits:      self.hits.load(Ordering::Relaxed),
            misses:    self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            size:      self.len(),
            capacity:  self.capacity().limit(),
        }
    }

    fn store(&self, key: K, value: V) {
        let mut cache = self.lock();
        // A recursive or concurrent call may have stored this key meanwhile;
        // the value is identical, so the first one stays.
        if cache.contains(&key) {
            return;
        }
        if cache.push(key, value).is_some() {
            drop(cache);
            let evictions = self.evictions.fetch_add(1, Ordering::Relaxed) + 1;
            tracing::trace!(
                memo = self.options.label_str(),
                evictions,
                "least recently used entry evicted"
            );
        }
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<K, V>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<K, V> fmt::Debug for Memo<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memo")
            .field("label", &self.options.label_str())
            .field("capacity", &self.options.capacity_value())
            .field("hits", &self.hits.load(Ordering::Relaxed))
            .field("misses", &self.misses.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}
