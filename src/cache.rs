//! A concurrent map with load-or-store semantics, and a cache-aside helper.
//!
//! This is not on the sequence engine's critical path. It exists so callers
//! can memoize expensive sequences (typically [`Materialized`] ones) by key
//! and share them between threads.

use std::hash::Hash;

use dashmap::{mapref::entry::Entry, DashMap};
use tracing::trace;

use crate::{materialize::Materialized, sequence::BoxSeq};

/// A typed, thread-safe key/value map.
///
/// Values are handed out by clone, so `V` is usually cheap to clone (an `Arc`,
/// a [`BoxSeq`] or a [`Materialized`] sequence).
#[derive(Debug)]
pub struct SyncMap<K, V>
where
    K: Eq + Hash,
{
    inner: DashMap<K, V>,
}

impl<K, V> Default for SyncMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        SyncMap {
            inner: DashMap::new(),
        }
    }
}

impl<K, V> SyncMap<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// The value stored for `key`, if any.
    pub fn load(&self, key: &K) -> Option<V> {
        self.inner.get(key).map(|v| v.value().clone())
    }

    /// Set the value for `key`, replacing any previous value.
    pub fn store(&self, key: K, value: V) {
        self.inner.insert(key, value);
    }

    /// Return the existing value for `key` if present, otherwise store
    /// `value` and return it.
    ///
    /// The flag is `true` when the value was loaded and `false` when it was
    /// stored. The check and the store happen atomically.
    pub fn load_or_store(&self, key: K, value: V) -> (V, bool) {
        match self.inner.entry(key) {
            Entry::Occupied(e) => (e.get().clone(), true),
            Entry::Vacant(e) => {
                e.insert(value.clone());
                (value, false)
            }
        }
    }

    /// Remove `key`, returning the value it held.
    pub fn load_and_delete(&self, key: &K) -> Option<V> {
        self.inner.remove(key).map(|(_, v)| v)
    }

    pub fn delete(&self, key: &K) {
        self.inner.remove(key);
    }

    /// Call `visit` for each entry until it returns `false`.
    ///
    /// Iteration order is unspecified. Entries are snapshotted first, so
    /// `visit` may modify the map; such changes are not seen by the current
    /// walk.
    pub fn range<F>(&self, mut visit: F)
    where
        K: Clone,
        F: FnMut(&K, &V) -> bool,
    {
        let entries: Vec<(K, V)> = self
            .inner
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect();
        for (k, v) in &entries {
            if !visit(k, v) {
                return;
            }
        }
    }

    /// Number of entries. Only a hint while other threads are writing.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn clear(&self) {
        self.inner.clear();
    }
}

impl<K, V> SyncMap<K, V>
where
    K: Eq + Hash,
    V: Clone + PartialEq,
{
    /// Store `new` for `key` only if the current value equals `old`.
    ///
    /// Returns whether the value was replaced. A missing key never matches.
    pub fn compare_and_swap(&self, key: K, old: &V, new: V) -> bool {
        match self.inner.entry(key) {
            Entry::Occupied(mut e) if e.get() == old => {
                e.insert(new);
                true
            }
            _ => false,
        }
    }

    /// Remove `key` only if its value equals `old`, returning whether it was
    /// removed.
    pub fn compare_and_delete(&self, key: &K, old: &V) -> bool {
        self.inner.remove_if(key, |_, v| v == old).is_some()
    }
}

impl<K, V> SyncMap<K, V>
where
    K: Eq + Hash,
{
    /// Store `value` for `key`, returning the previous value and whether
    /// there was one.
    pub fn swap(&self, key: K, value: V) -> (Option<V>, bool) {
        let previous = self.inner.insert(key, value);
        let loaded = previous.is_some();
        (previous, loaded)
    }
}

/// Load the value for `key`, or compute it with `compute` and store it.
///
/// Returns the value and whether it was loaded. When several threads miss at
/// once each may run `compute`, but only the first stored result is kept and
/// returned to all of them.
///
/// ```rust
/// use pushseq::cache::{cache, SyncMap};
///
/// let map = SyncMap::new();
/// assert_eq!(cache(&map, "k", || 1), (1, false));
/// assert_eq!(cache(&map, "k", || 2), (1, true));
/// ```
pub fn cache<K, V, F>(map: &SyncMap<K, V>, key: K, compute: F) -> (V, bool)
where
    K: Eq + Hash,
    V: Clone,
    F: FnOnce() -> V,
{
    if let Some(v) = map.load(&key) {
        return (v, true);
    }
    trace!("cache miss, computing value");
    map.load_or_store(key, compute())
}

/// Share one materialized sequence per key.
///
/// `build` runs only on a miss; the returned sequence is evaluated lazily on
/// its first drive and replayed afterwards by every holder.
pub fn cached<K, T, F>(
    map: &SyncMap<K, Materialized<BoxSeq<T>>>,
    key: K,
    build: F,
) -> Materialized<BoxSeq<T>>
where
    K: Eq + Hash,
    F: FnOnce() -> BoxSeq<T>,
{
    cache(map, key, || Materialized::new(build())).0
}
