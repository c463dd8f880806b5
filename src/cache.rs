use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use tokio::time::Instant;

struct CacheEntry<T> {
    value: T,
    /// `None` when `now + ttl` is past what the clock can represent.
    expires_at: Option<Instant>,
}

impl<T> CacheEntry<T> {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|expires_at| now < expires_at)
    }
}

/// In-process key/value store with a per-entry absolute expiry.
///
/// Stale entries are only removed when they are looked up again; there is no
/// background sweep and no capacity bound.
pub struct TtlCache<T> {
    entries: Mutex<HashMap<String, CacheEntry<T>>>,
}

impl<T: Clone> TtlCache<T> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the value if it has not expired yet, evicting it otherwise.
    pub fn get(&self, key: &str) -> Option<T> {
        let mut entries = self.lock();
        let expired = match entries.get(key) {
            Some(entry) if entry.is_live(Instant::now()) => return Some(entry.value.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.remove(key);
        }
        None
    }

    pub fn set(&self, key: impl Into<String>, value: T, ttl: Duration) {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now().checked_add(ttl),
        };
        self.lock().insert(key.into(), entry);
    }

    /// Number of stored entries, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, CacheEntry<T>>> {
        // A poisoned map is still structurally valid; keep serving from it.
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<T: Clone> Default for TtlCache<T> {
    fn default() -> Self {
        Self::new()
    }
}
