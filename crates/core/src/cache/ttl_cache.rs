use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Duration, Utc};
use log::warn;

use crate::utils::Clock;

struct Entry<V> {
    value: V,
    expires_at: DateTime<Utc>,
}

/// Version of one key, taken with [`TtlCache::generation`] before a value
/// for it is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation {
    epoch: u64,
    key: u64,
}

struct State<K, V> {
    entries: HashMap<K, Entry<V>>,
    /// Bumped by `clear`.
    epoch: u64,
    /// Bumped per key by `invalidate`. Absent means 0.
    versions: HashMap<K, u64>,
}

impl<K: Eq + Hash, V> State<K, V> {
    fn generation(&self, key: &K) -> Generation {
        Generation {
            epoch: self.epoch,
            key: self.versions.get(key).copied().unwrap_or(0),
        }
    }
}

/// Key/value cache whose entries expire after a time-to-live.
///
/// Time comes from the injected [`Clock`]. An entry is live while
/// `now < expires_at` and gone from its deadline on. Expired entries are
/// dropped lazily on access or in bulk by [`TtlCache::purge_expired`].
///
/// Every `invalidate` or `clear` moves the affected keys to a new
/// [`Generation`]. [`TtlCache::insert_if_generation`] refuses a value
/// computed under an older one.
pub struct TtlCache<K, V> {
    state: RwLock<State<K, V>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: RwLock::new(State {
                entries: HashMap::new(),
                epoch: 0,
                versions: HashMap::new(),
            }),
            ttl,
            clock,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn get(&self, key: &K) -> Option<V> {
        let now = self.clock.now();
        {
            let state = self.read_guard();
            match state.entries.get(key) {
                Some(entry) if now < entry.expires_at => return Some(entry.value.clone()),
                Some(_) => {}
                None => return None,
            }
        }
        // Expired: drop it, unless a writer refreshed it in between.
        let mut state = self.write_guard();
        if state.entries.get(key).is_some_and(|e| now >= e.expires_at) {
            state.entries.remove(key);
        }
        None
    }

    pub fn insert(&self, key: K, value: V) {
        self.insert_with_ttl(key, value, self.ttl);
    }

    pub fn insert_with_ttl(&self, key: K, value: V, ttl: Duration) {
        let expires_at = self.clock.now() + ttl;
        self.write_guard()
            .entries
            .insert(key, Entry { value, expires_at });
    }

    /// Current generation of `key`.
    pub fn generation(&self, key: &K) -> Generation {
        self.read_guard().generation(key)
    }

    /// Inserts only if `key` was not invalidated since `seen` was taken.
    /// Returns whether the value was stored.
    pub fn insert_if_generation(&self, key: K, value: V, seen: Generation) -> bool {
        let expires_at = self.clock.now() + self.ttl;
        let mut state = self.write_guard();
        if state.generation(&key) != seen {
            return false;
        }
        state.entries.insert(key, Entry { value, expires_at });
        true
    }

    /// Removes the entry, returning whether one was present.
    pub fn invalidate(&self, key: &K) -> bool {
        let mut state = self.write_guard();
        *state.versions.entry(key.clone()).or_insert(0) += 1;
        state.entries.remove(key).is_some()
    }

    pub fn clear(&self) {
        let mut state = self.write_guard();
        state.epoch += 1;
        state.entries.clear();
    }

    /// Drops every expired entry and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut state = self.write_guard();
        let before = state.entries.len();
        state.entries.retain(|_, entry| now < entry.expires_at);
        before - state.entries.len()
    }

    /// Number of stored entries, expired ones included until purged.
    pub fn len(&self) -> usize {
        self.read_guard().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read_guard(&self) -> RwLockReadGuard<'_, State<K, V>> {
        match self.state.read() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!("TtlCache lock poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, State<K, V>> {
        match self.state.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!("TtlCache lock poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }
}
