//! Typed concurrent map.

use std::hash::Hash;

use dashmap::DashMap;

/// Map safe to share across threads, keyed by `K`.
///
/// Reads return clones, so no lock outlives a call except during
/// [`SyncMap::range`].
#[derive(Debug)]
pub struct SyncMap<K: Eq + Hash, V> {
    core: DashMap<K, V>,
}

impl<K: Eq + Hash, V> SyncMap<K, V> {
    pub fn new() -> Self {
        Self {
            core: DashMap::new(),
        }
    }

    pub fn load(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.core.get(key).map(|r| r.value().clone())
    }

    /// Insert or replace the value for `key`.
    pub fn store(&self, key: K, value: V) {
        self.core.insert(key, value);
    }

    pub fn delete(&self, key: &K) {
        self.core.remove(key);
    }

    /// Visit entries until `f` returns false.
    ///
    /// `f` must not write to this map; the visited shard stays locked.
    pub fn range<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        for entry in self.core.iter() {
            if !f(entry.key(), entry.value()) {
                break;
            }
        }
    }

    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.core.iter().map(|r| r.key().clone()).collect()
    }

    pub fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.core.iter().map(|r| r.value().clone()).collect()
    }

    pub fn clear(&self) {
        self.core.clear();
    }

    pub fn len(&self) -> usize {
        self.core.len()
    }

    pub fn is_empty(&self) -> bool {
        self.core.is_empty()
    }
}

impl<K: Eq + Hash, V> Default for SyncMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
