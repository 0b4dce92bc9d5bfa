//! Per-signal compute-once cache for calculator results
//!
//! Every [`Signal`](../../hrv_signal/struct.Signal.html) owns one
//! `CalculatorCache`. Entries are keyed by calculator identity plus a
//! parameter fingerprint and hold type-erased, reference-counted values.
//!
//! # Thread Safety
//!
//! Each entry moves through a small state machine protected by the
//! `storage` mutex:
//!
//! - absent → `Computing`: the first requester claims the key
//! - `Computing` → `Ready(value)`: the computation succeeded
//! - `Computing` → absent: the computation failed or panicked
//! - `Ready(value)` → absent: explicit `invalidate` or `clear`
//!
//! Requesters that find a `Computing` entry wait on the `ready` condition
//! variable (paired with the same mutex) and re-check when woken, so a key
//! is computed at most once while its entry stays cached. The storage lock
//! is never held while a computation runs, which allows a calculator to
//! request other keys from the same cache.

use crate::{Error, Result};
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use tracing::trace;

/// Identity of a cached calculator result
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    calculator: String,
    params: String,
}

impl CacheKey {
    /// Create a key from a calculator name and a parameter fingerprint
    pub fn new(calculator: impl Into<String>, params: impl Into<String>) -> Self {
        Self {
            calculator: calculator.into(),
            params: params.into(),
        }
    }

    /// Key for a calculator without parameters
    pub fn named(calculator: impl Into<String>) -> Self {
        Self::new(calculator, String::new())
    }

    /// The calculator name part of the key
    pub fn calculator(&self) -> &str {
        &self.calculator
    }

    /// The parameter fingerprint part of the key
    pub fn params(&self) -> &str {
        &self.params
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.params.is_empty() {
            write!(f, "{}", self.calculator)
        } else {
            write!(f, "{}[{}]", self.calculator, self.params)
        }
    }
}

type CachedValue = Arc<dyn Any + Send + Sync>;

enum EntryState {
    Computing,
    Ready(CachedValue),
}

/// Cache statistics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub entries: usize,
    pub hit_rate: f64,
}

/// Thread-safe compute-once cache keyed by [`CacheKey`]
#[derive(Default)]
pub struct CalculatorCache {
    storage: Mutex<HashMap<CacheKey, EntryState>>,
    ready: Condvar,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl CalculatorCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<CacheKey, EntryState>>> {
        self.storage
            .lock()
            .map_err(|_| Error::Cache("cache storage lock poisoned".to_string()))
    }

    /// Return the cached value for `key`, computing it with `compute` if absent
    ///
    /// Concurrent callers with the same key block until the first caller's
    /// computation finishes and then share its result. A failed computation
    /// is not cached: its error is returned to the computing caller and any
    /// waiters retry.
    pub fn get_or_compute<V, F>(&self, key: CacheKey, compute: F) -> Result<Arc<V>>
    where
        V: Send + Sync + 'static,
        F: FnOnce() -> Result<V>,
    {
        let mut storage = self.lock()?;
        loop {
            let ready = match storage.get(&key) {
                Some(EntryState::Ready(value)) => Some(Arc::clone(value)),
                Some(EntryState::Computing) => None,
                None => break,
            };
            match ready {
                Some(value) => {
                    drop(storage);
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    trace!(key = %key, "calculator cache hit");
                    return downcast(value, &key);
                }
                None => {
                    storage = self
                        .ready
                        .wait(storage)
                        .map_err(|_| Error::Cache("cache storage lock poisoned".to_string()))?;
                }
            }
        }

        storage.insert(key.clone(), EntryState::Computing);
        drop(storage);
        self.misses.fetch_add(1, Ordering::Relaxed);
        trace!(key = %key, "calculator cache miss");

        let mut pending = PendingEntry {
            cache: self,
            key: Some(key),
        };
        let value = Arc::new(compute()?);
        pending.complete(Arc::clone(&value) as CachedValue)?;
        Ok(value)
    }

    /// Whether a ready value is stored for `key`
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.lock()
            .map(|storage| matches!(storage.get(key), Some(EntryState::Ready(_))))
            .unwrap_or(false)
    }

    /// Remove a ready entry, returning whether one was present
    ///
    /// Entries that are still being computed are left untouched.
    pub fn invalidate(&self, key: &CacheKey) -> Result<bool> {
        let mut storage = self.lock()?;
        if matches!(storage.get(key), Some(EntryState::Ready(_))) {
            storage.remove(key);
            return Ok(true);
        }
        Ok(false)
    }

    /// Remove every ready entry and reset statistics
    pub fn clear(&self) -> Result<()> {
        let mut storage = self.lock()?;
        storage.retain(|_, state| matches!(state, EntryState::Computing));
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        Ok(())
    }

    /// Keys of all ready entries
    pub fn keys(&self) -> Vec<CacheKey> {
        self.lock()
            .map(|storage| {
                storage
                    .iter()
                    .filter(|(_, state)| matches!(state, EntryState::Ready(_)))
                    .map(|(key, _)| key.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of ready entries
    pub fn len(&self) -> usize {
        self.keys().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        CacheStats {
            hits,
            misses,
            entries: self.len(),
            hit_rate: if hits + misses > 0 {
                hits as f64 / (hits + misses) as f64
            } else {
                0.0
            },
        }
    }
}

impl fmt::Debug for CalculatorCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalculatorCache")
            .field("entries", &self.len())
            .field("hits", &self.hits.load(Ordering::Relaxed))
            .field("misses", &self.misses.load(Ordering::Relaxed))
            .finish()
    }
}

fn downcast<V: Send + Sync + 'static>(value: CachedValue, key: &CacheKey) -> Result<Arc<V>> {
    value.downcast::<V>().map_err(|_| {
        Error::Cache(format!(
            "entry {key} holds a value of a different type than requested"
        ))
    })
}

/// A claimed `Computing` entry
///
/// Dropping it without calling `complete` (error return or panic inside the
/// computation) removes the marker and wakes waiters so they can retry.
struct PendingEntry<'a> {
    cache: &'a CalculatorCache,
    key: Option<CacheKey>,
}

impl PendingEntry<'_> {
    fn complete(&mut self, value: CachedValue) -> Result<()> {
        if let Some(key) = self.key.take() {
            let mut storage = self.cache.lock()?;
            storage.insert(key, EntryState::Ready(value));
            drop(storage);
            self.cache.ready.notify_all();
        }
        Ok(())
    }
}

impl Drop for PendingEntry<'_> {
    fn drop(&mut self) {
        if let Some(key) = self.key.take() {
            if let Ok(mut storage) = self.cache.storage.lock() {
                storage.remove(&key);
            }
            self.cache.ready.notify_all();
        }
    }
}
