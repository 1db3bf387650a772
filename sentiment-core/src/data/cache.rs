//! Path-keyed memoization of loaded tables.
//!
//! Each entry remembers when it was loaded and, depending on the policy,
//! a fingerprint of the source file. A lookup reloads only when the
//! policy says the entry is stale. There is no file watching: staleness
//! is checked on access.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant, SystemTime};

/// Time source for TTL checks.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall-clock [`Clock`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// When a cached table must be reloaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidationPolicy {
    /// Only after [`SnapshotCache::invalidate`] or [`SnapshotCache::clear`].
    #[default]
    Manual,
    /// After the entry is older than the given duration.
    Ttl(Duration),
    /// When the BLAKE3 hash of the file bytes changes.
    ContentHash,
    /// When the file modification time changes.
    Modified,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Fingerprint {
    Missing,
    Content(blake3::Hash),
    Modified(SystemTime),
}

impl InvalidationPolicy {
    fn fingerprint(&self, path: &Path) -> Option<Fingerprint> {
        match self {
            InvalidationPolicy::Manual | InvalidationPolicy::Ttl(_) => None,
            InvalidationPolicy::ContentHash => Some(match std::fs::read(path) {
                Ok(bytes) => Fingerprint::Content(blake3::hash(&bytes)),
                Err(_) => Fingerprint::Missing,
            }),
            InvalidationPolicy::Modified => Some(
                std::fs::metadata(path)
                    .and_then(|m| m.modified())
                    .map(Fingerprint::Modified)
                    .unwrap_or(Fingerprint::Missing),
            ),
        }
    }
}

struct Entry<T> {
    value: Arc<T>,
    loaded_at: Instant,
    fingerprint: Option<Fingerprint>,
}

/// Hit/load counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub loads: u64,
}

/// Memoizes one loaded value per source path.
pub struct SnapshotCache<T> {
    policy: InvalidationPolicy,
    clock: Arc<dyn Clock>,
    entries: Mutex<HashMap<PathBuf, Entry<T>>>,
    hits: AtomicU64,
    loads: AtomicU64,
}

impl<T> SnapshotCache<T> {
    pub fn new(policy: InvalidationPolicy) -> Self {
        Self::with_clock(policy, Arc::new(SystemClock))
    }

    pub fn with_clock(policy: InvalidationPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            policy,
            clock,
            entries: Mutex::new(HashMap::new()),
            hits: AtomicU64::new(0),
            loads: AtomicU64::new(0),
        }
    }

    pub fn policy(&self) -> InvalidationPolicy {
        self.policy
    }

    /// Return the cached value for `path`, running `load` on a miss or
    /// when the entry is stale under the policy.
    pub fn get_or_load<F>(&self, path: &Path, load: F) -> Arc<T>
    where
        F: FnOnce(&Path) -> T,
    {
        let fingerprint = self.policy.fingerprint(path);
        let now = self.clock.now();
        let mut entries = self.lock();

        if let Some(entry) = entries.get(path) {
            if self.is_fresh(entry, now, &fingerprint) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(path = %path.display(), "snapshot cache hit");
                return Arc::clone(&entry.value);
            }
            tracing::debug!(path = %path.display(), "snapshot cache entry stale");
        }

        let value = Arc::new(load(path));
        self.loads.fetch_add(1, Ordering::Relaxed);
        entries.insert(
            path.to_path_buf(),
            Entry {
                value: Arc::clone(&value),
                loaded_at: now,
                fingerprint,
            },
        );
        value
    }

    fn is_fresh(&self, entry: &Entry<T>, now: Instant, current: &Option<Fingerprint>) -> bool {
        match self.policy {
            InvalidationPolicy::Manual => true,
            InvalidationPolicy::Ttl(ttl) => now.saturating_duration_since(entry.loaded_at) < ttl,
            InvalidationPolicy::ContentHash | InvalidationPolicy::Modified => {
                entry.fingerprint == *current
            }
        }
    }

    /// Checks whether `path` has an entry, fresh or not.
    pub fn contains(&self, path: &Path) -> bool {
        self.lock().contains_key(path)
    }

    /// Drop the entry for `path`. Returns true if one existed.
    pub fn invalidate(&self, path: &Path) -> bool {
        let removed = self.lock().remove(path).is_some();
        if removed {
            tracing::debug!(path = %path.display(), "snapshot cache invalidated");
        }
        removed
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.lock().clear();
        tracing::debug!("snapshot cache cleared");
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            loads: self.loads.load(Ordering::Relaxed),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<PathBuf, Entry<T>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Default for SnapshotCache<T> {
    fn default() -> Self {
        Self::new(InvalidationPolicy::default())
    }
}
