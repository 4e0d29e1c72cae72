//! In-memory TTL cache for entity details.
//!
//! A TTL of `Duration::ZERO` means entries never expire. Expired entries are
//! dropped lazily on access.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

struct CacheEntry<V> {
    value: V,
    stored_at: Instant,
}

/// Typed key-value cache with a single TTL for all entries.
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: Mutex<HashMap<K, CacheEntry<V>>>,
}

impl<K: Eq + Hash, V: Clone> TtlCache<K, V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn is_live(&self, entry: &CacheEntry<V>) -> bool {
        self.ttl.is_zero() || entry.stored_at.elapsed() < self.ttl
    }

    /// Clone out a live entry, evicting it if it has expired.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        match entries.get(key) {
            Some(entry) if self.is_live(entry) => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn insert(&self, key: K, value: V) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(
                key,
                CacheEntry {
                    value,
                    stored_at: Instant::now(),
                },
            );
    }

    /// Mutate a live entry in place. Returns `false` when there was nothing
    /// to update. The entry's age is not reset.
    pub fn update(&self, key: &K, f: impl FnOnce(&mut V)) -> bool {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let live = entries.get(key).is_some_and(|e| self.is_live(e));
        if !live {
            entries.remove(key);
            return false;
        }
        match entries.get_mut(key) {
            Some(entry) => {
                f(&mut entry.value);
                true
            }
            None => false,
        }
    }

    pub fn invalidate(&self, key: &K) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Number of stored entries, including any not yet evicted.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
