//! # Least Recently Used (LRU) Cache
//!
//! A fixed-capacity key-value store that evicts the least recently accessed
//! entry once a new key would exceed capacity.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                           LruCache<K, V>                             │
//!   │                                                                      │
//!   │   index: FxHashMap<K, SlotId>          list: RecencyList<Entry<K,V>> │
//!   │   ┌─────────┬──────────┐                                             │
//!   │   │   Key   │  SlotId  │      HEAD ─► [3] ◄──► [2] ◄──► [1] ◄─ TAIL  │
//!   │   ├─────────┼──────────┤              MRU                LRU         │
//!   │   │    1    │  id_2 ───┼──────────────────────────────────┘          │
//!   │   │    2    │  id_3 ───┼─────────────────────┘                       │
//!   │   │    3    │  id_4 ───┼────────┘                                    │
//!   │   └─────────┴──────────┘                                             │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The index and the list never hold references to each other's storage;
//! both deal only in [`SlotId`] handles into the list's arena. `HEAD` and
//! `TAIL` are reserved sentinel slots that are never evicted.
//!
//! ## Operations
//!
//! ```text
//!   get(k) hit:    index lookup ─► move_to_front(id) ─► &value
//!   get(k) miss:   index lookup ─► None (no side effect)
//!   put(k) hit:    index lookup ─► replace value ─► move_to_front(id)
//!   put(k) miss:   len == capacity? ─► evict back (list + index)
//!                  ─► push_front(entry) ─► index.insert(k, id)
//! ```
//!
//! | Method              | Complexity | Reorders | Description                       |
//! |---------------------|------------|----------|-----------------------------------|
//! | `try_new(capacity)` | O(1)       | -        | Fallible constructor              |
//! | `get(&k)`           | O(1)       | yes      | Value, promoted to MRU            |
//! | `get_mut(&k)`       | O(1)       | yes      | Mutable value, promoted to MRU    |
//! | `put(k, v)`         | O(1)       | yes      | Insert or overwrite, may evict    |
//! | `peek(&k)`          | O(1)       | no       | Value without promotion           |
//! | `contains(&k)`      | O(1)       | no       | Existence check                   |
//! | `touch(&k)`         | O(1)       | yes      | Promote without reading           |
//! | `remove(&k)`        | O(1)       | -        | Drop one entry                    |
//! | `pop_lru()`         | O(1)       | -        | Remove the LRU entry              |
//! | `peek_lru()`        | O(1)       | no       | LRU entry                         |
//! | `peek_mru()`        | O(1)       | no       | MRU entry                         |
//! | `recency_rank(&k)`  | O(n)       | no       | Position, 0 = MRU                 |
//! | `iter()`            | O(n)       | no       | Front-to-back traversal           |
//! | `check_invariants()`| O(n)       | no       | Structural validation             |
//!
//! ## Capacity
//!
//! Capacity must be at least one. [`LruCache::try_new`] reports zero as a
//! [`ConfigError`]; [`LruCache::new`] panics on it.
//!
//! ## Thread Safety
//!
//! `LruCache` has no internal locking. Every `get` mutates recency order, so
//! there is no read-only path that could sit behind a shared lock: share it
//! as `Mutex<LruCache<K, V>>` and hold the lock for the whole call.
//!
//! ## Example Usage
//!
//! ```
//! use lrukit::policy::lru::LruCache;
//!
//! let mut cache = LruCache::new(3);
//! cache.put(1, "hello");
//! cache.put(2, "world");
//! cache.put(3, "golang");
//!
//! assert_eq!(cache.get(&2), Some(&"world"));
//!
//! // 1 is now least recently used
//! cache.put(4, "generics");
//! assert_eq!(cache.get(&1), None);
//!
//! let order: Vec<_> = cache.iter().map(|(k, _)| *k).collect();
//! assert_eq!(order, vec![4, 2, 3]);
//! ```

use std::fmt;
use std::hash::Hash;
use std::iter::FusedIterator;
use std::mem;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::ds::recency_list::{self, RecencyList};
use crate::ds::slot_arena::SlotId;
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LruMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LruMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    CoreMetricsRecorder, LruMetricsReadRecorder, LruMetricsRecorder, MetricsSnapshotProvider,
};
use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

/// One cached pair. The key is kept so eviction can clear the index.
#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Fixed-capacity LRU cache.
///
/// `K` is cloned once per new entry (one copy lives in the index, one in
/// the list entry); overwrites and lookups never clone.
pub struct LruCache<K, V> {
    map: FxHashMap<K, SlotId>,
    list: RecencyList<Entry<K, V>>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: LruMetrics,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Use [`try_new`](Self::try_new) when the
    /// capacity comes from user input.
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(cache) => cache,
            Err(err) => panic!("{}", err),
        }
    }

    /// Creates an empty cache, rejecting a zero capacity.
    ///
    /// See [`LruCacheBuilder`](crate::builder::LruCacheBuilder) for further
    /// options.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    ///
    /// assert!(LruCache::<u32, u32>::try_new(8).is_ok());
    /// assert!(LruCache::<u32, u32>::try_new(0).is_err());
    /// ```
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Self::with_options(capacity, true)
    }

    pub(crate) fn with_options(capacity: usize, preallocate: bool) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("cache capacity must be greater than zero"));
        }
        let reserve = if preallocate { capacity } else { 0 };
        debug!(capacity, preallocate, "created lru cache");
        Ok(Self {
            map: FxHashMap::with_capacity_and_hasher(reserve, Default::default()),
            list: RecencyList::with_capacity(reserve),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: LruMetrics::default(),
        })
    }

    /// Returns the value for `key` and marks it most recently used.
    ///
    /// A miss returns `None` and leaves the cache untouched.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let id = self.promote(key)?;
        self.list.get(id).map(|entry| &entry.value)
    }

    /// Like [`get`](Self::get) but hands out a mutable reference.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = self.promote(key)?;
        self.list.get_mut(id).map(|entry| &mut entry.value)
    }

    fn promote(&mut self, key: &K) -> Option<SlotId> {
        let Some(&id) = self.map.get(key) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        if !self.list.move_to_front(id) {
            out_of_sync("indexed slot is not in the recency list");
        }
        self.debug_validate();
        Some(id)
    }

    /// Inserts or overwrites `key`, leaving it as the most recently used
    /// entry.
    ///
    /// Overwriting returns the previous value and never evicts. Inserting a
    /// new key into a full cache first evicts the least recently used entry,
    /// whose key and value are dropped before this call returns.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(&id) = self.map.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            let previous = match self.list.get_mut(id) {
                Some(entry) => mem::replace(&mut entry.value, value),
                None => out_of_sync("indexed slot is not in the recency list"),
            };
            self.list.move_to_front(id);
            self.debug_validate();
            return Some(previous);
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        if self.map.len() >= self.capacity {
            drop(self.evict_back());
        }

        let id = self.list.push_front(Entry {
            key: key.clone(),
            value,
        });
        self.map.insert(key, id);
        self.debug_validate();
        None
    }

    /// Removes the entry just before `TAIL` from both the list and the index.
    ///
    /// Only called by `put` once the cache is full, so the list cannot be
    /// empty here; an empty list means the index and list disagree.
    fn evict_back(&mut self) -> (K, V) {
        #[cfg(feature = "metrics")]
        self.metrics.record_evict_call();

        let Some(entry) = self.list.pop_back() else {
            out_of_sync("eviction requested from an empty recency list");
        };
        if self.map.remove(&entry.key).is_none() {
            out_of_sync("evicted key was missing from the index");
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_evicted_entry();

        trace!(
            capacity = self.capacity,
            len = self.map.len(),
            "evicted least recently used entry"
        );
        (entry.key, entry.value)
    }

    /// Returns the value for `key` without changing recency order.
    pub fn peek(&self, key: &K) -> Option<&V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_peek_call();

        let &id = self.map.get(key)?;

        #[cfg(feature = "metrics")]
        self.metrics.record_peek_found();

        self.list.get(id).map(|entry| &entry.value)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Marks `key` most recently used without reading it.
    pub fn touch(&mut self, key: &K) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_touch_call();

        let Some(&id) = self.map.get(key) else {
            return false;
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_touch_found();

        let moved = self.list.move_to_front(id);
        self.debug_validate();
        moved
    }

    /// Removes `key` from both structures and returns its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.map.remove(key)?;
        let entry = match self.list.remove(id) {
            Some(entry) => entry,
            None => out_of_sync("removed key had no recency list entry"),
        };
        self.debug_validate();
        Some(entry.value)
    }

    /// Removes and returns the least recently used entry, or `None` when
    /// the cache is empty.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_call();

        let entry = self.list.pop_back()?;
        self.map.remove(&entry.key);

        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_found();

        self.debug_validate();
        Some((entry.key, entry.value))
    }

    /// The entry that the next eviction would remove.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.list.back().map(|entry| (&entry.key, &entry.value))
    }

    /// The most recently used entry.
    pub fn peek_mru(&self) -> Option<(&K, &V)> {
        self.list.front().map(|entry| (&entry.key, &entry.value))
    }

    /// Position of `key` in recency order (`0` = most recently used).
    ///
    /// Walks the list, so this is O(n).
    pub fn recency_rank(&self, key: &K) -> Option<usize> {
        #[cfg(feature = "metrics")]
        self.metrics.record_recency_rank_call();

        let &target = self.map.get(key)?;
        let rank = self.list.iter().position(|(id, _)| id == target)?;

        #[cfg(feature = "metrics")]
        self.metrics.record_recency_rank_found();

        Some(rank)
    }

    /// Drops every entry. Capacity is unchanged.
    pub fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        let dropped = self.map.len();
        self.map.clear();
        self.list.clear();
        debug!(dropped, "cleared lru cache");
    }

    /// Verifies that the index and the recency list describe the same set
    /// of entries and that the size bound holds.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.capacity == 0 {
            return Err(InvariantError::new("capacity is zero"));
        }
        self.list.check_invariants()?;
        if self.map.len() != self.list.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys but recency list holds {} entries",
                self.map.len(),
                self.list.len()
            )));
        }
        if self.map.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "{} entries exceed capacity {}",
                self.map.len(),
                self.capacity
            )));
        }
        for (rank, (id, entry)) in self.list.iter().enumerate() {
            match self.map.get(&entry.key) {
                Some(&indexed) if indexed == id => {},
                Some(&indexed) => {
                    return Err(InvariantError::new(format!(
                        "entry at rank {} lives in slot {} but index points to slot {}",
                        rank,
                        id.index(),
                        indexed.index()
                    )));
                },
                None => {
                    return Err(InvariantError::new(format!(
                        "entry at rank {} is missing from the index",
                        rank
                    )));
                },
            }
        }
        Ok(())
    }

    #[inline]
    fn debug_validate(&self) {
        #[cfg(debug_assertions)]
        {
            if let Err(err) = self.check_invariants() {
                panic!("lru invariant violated: {}", err);
            }
        }
    }
}

impl<K, V> LruCache<K, V> {
    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates `(&K, &V)` from most to least recently used without
    /// touching recency order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.list.iter(),
        }
    }

    /// Keys from most to least recently used.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Values from most to least recently used.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator + '_ {
        self.iter().map(|(_, value)| value)
    }
}

#[cold]
#[inline(never)]
fn out_of_sync(detail: &str) -> ! {
    panic!("lru index and recency list out of sync: {}", detail)
}

/// Front-to-back iterator returned by [`LruCache::iter`].
pub struct Iter<'a, K, V> {
    inner: recency_list::Iter<'a, Entry<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, entry)| (&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner
            .next_back()
            .map(|(_, entry)| (&entry.key, &entry.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<'a, K, V> IntoIterator for &'a LruCache<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> Extend<(K, V)> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K, V> fmt::Debug for LruCache<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Renders `Cache (capacity: C, size: N): [k:v][k:v]` in recency order.
impl<K, V> fmt::Display for LruCache<K, V>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cache (capacity: {}, size: {}): ", self.capacity, self.len())?;
        for (key, value) in self.iter() {
            write!(f, "[{}:{}]", key, value)?;
        }
        Ok(())
    }
}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.put(key, value)
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        LruCache::get(self, key)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        LruCache::contains(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        LruCache::len(self)
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        LruCache::clear(self)
    }
}

impl<K, V> MutableCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn remove(&mut self, key: &K) -> Option<V> {
        LruCache::remove(self, key)
    }
}

impl<K, V> LruCacheTrait<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn pop_lru(&mut self) -> Option<(K, V)> {
        LruCache::pop_lru(self)
    }

    #[inline]
    fn peek_lru(&self) -> Option<(&K, &V)> {
        LruCache::peek_lru(self)
    }

    #[inline]
    fn touch(&mut self, key: &K) -> bool {
        LruCache::touch(self, key)
    }

    #[inline]
    fn recency_rank(&self, key: &K) -> Option<usize> {
        LruCache::recency_rank(self, key)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LruCache<K, V> {
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        LruMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            insert_calls: self.metrics.insert_calls,
            insert_updates: self.metrics.insert_updates,
            insert_new: self.metrics.insert_new,
            evict_calls: self.metrics.evict_calls,
            evicted_entries: self.metrics.evicted_entries,
            clear_calls: self.metrics.clear_calls,
            pop_lru_calls: self.metrics.pop_lru_calls,
            pop_lru_found: self.metrics.pop_lru_found,
            touch_calls: self.metrics.touch_calls,
            touch_found: self.metrics.touch_found,
            peek_calls: self.metrics.peek_calls.get(),
            peek_found: self.metrics.peek_found.get(),
            recency_rank_calls: self.metrics.recency_rank_calls.get(),
            recency_rank_found: self.metrics.recency_rank_found.get(),
            cache_len: self.map.len(),
            capacity: self.capacity,
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<LruMetricsSnapshot> for LruCache<K, V> {
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }

    fn reset_metrics(&mut self) {
        self.metrics.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order<K: Clone, V: Clone>(cache: &LruCache<K, V>) -> Vec<(K, V)> {
        cache.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    // ==============================================
    // CORRECTNESS TESTS MODULE
    // ==============================================
    mod correctness {
        use super::*;

        mod basic_behavior {
            use super::*;

            #[test]
            fn new_cache_is_empty() {
                let cache: LruCache<u32, u32> = LruCache::new(10);
                assert_eq!(cache.capacity(), 10);
                assert_eq!(cache.len(), 0);
                assert!(cache.is_empty());
                assert!(cache.check_invariants().is_ok());
            }

            #[test]
            fn zero_capacity_is_rejected() {
                let err = LruCache::<u32, u32>::try_new(0).unwrap_err();
                assert!(err.message().contains("greater than zero"));
            }

            #[test]
            #[should_panic(expected = "capacity must be greater than zero")]
            fn new_panics_on_zero_capacity() {
                let _cache: LruCache<u32, u32> = LruCache::new(0);
            }

            #[test]
            fn get_miss_has_no_side_effect() {
                let mut cache = LruCache::new(2);
                cache.put(1, "a");
                cache.put(2, "b");
                assert_eq!(cache.get(&3), None);
                assert_eq!(order(&cache), vec![(2, "b"), (1, "a")]);
            }

            #[test]
            fn get_hit_promotes_to_front() {
                let mut cache = LruCache::new(3);
                cache.put(1, "hello");
                cache.put(2, "world");
                cache.put(3, "golang");
                assert_eq!(cache.get(&2), Some(&"world"));
                assert_eq!(
                    order(&cache),
                    vec![(2, "world"), (3, "golang"), (1, "hello")]
                );
            }

            #[test]
            fn repeated_get_is_stable() {
                let mut cache = LruCache::new(3);
                cache.put(1, 10);
                cache.put(2, 20);
                assert_eq!(cache.get(&1), Some(&10));
                let first = order(&cache);
                assert_eq!(cache.get(&1), Some(&10));
                assert_eq!(order(&cache), first);
            }

            #[test]
            fn get_mut_updates_and_promotes() {
                let mut cache = LruCache::new(2);
                cache.put("a", vec![1]);
                cache.put("b", vec![2]);
                if let Some(v) = cache.get_mut(&"a") {
                    v.push(9);
                }
                assert_eq!(cache.peek_mru(), Some((&"a", &vec![1, 9])));
            }
        }

        mod put_semantics {
            use super::*;

            #[test]
            fn overwrite_returns_previous_and_keeps_size() {
                let mut cache = LruCache::new(2);
                cache.put("a", 1);
                cache.put("b", 2);
                assert_eq!(cache.put("a", 99), Some(1));
                assert_eq!(cache.len(), 2);
                assert_eq!(cache.get(&"b"), Some(&2));
                assert_eq!(order(&cache), vec![("b", 2), ("a", 99)]);
            }

            #[test]
            fn insert_at_capacity_evicts_exactly_one() {
                let mut cache = LruCache::new(3);
                cache.put(1, "hello");
                cache.put(2, "world");
                cache.put(3, "golang");
                cache.get(&2);
                assert_eq!(cache.put(4, "generics"), None);
                assert_eq!(cache.len(), 3);
                assert!(!cache.contains(&1));
                assert_eq!(
                    order(&cache),
                    vec![(4, "generics"), (2, "world"), (3, "golang")]
                );
            }

            #[test]
            fn capacity_one_keeps_only_latest() {
                let mut cache = LruCache::new(1);
                cache.put(1, 'a');
                cache.put(2, 'b');
                assert_eq!(order(&cache), vec![(2, 'b')]);
                cache.put(2, 'c');
                assert_eq!(order(&cache), vec![(2, 'c')]);
            }

            #[test]
            fn evicted_values_are_dropped_immediately() {
                use std::rc::Rc;

                let payload = Rc::new(());
                let mut cache = LruCache::new(1);
                cache.put(1, Rc::clone(&payload));
                assert_eq!(Rc::strong_count(&payload), 2);
                cache.put(2, Rc::new(()));
                assert_eq!(Rc::strong_count(&payload), 1);
            }

            #[test]
            fn extend_behaves_like_repeated_put() {
                let mut cache = LruCache::new(2);
                cache.extend([(1, 1), (2, 2), (3, 3)]);
                assert_eq!(order(&cache), vec![(3, 3), (2, 2)]);
            }
        }

        mod supplementary_ops {
            use super::*;

            #[test]
            fn peek_and_contains_do_not_reorder() {
                let mut cache = LruCache::new(2);
                cache.put(1, "a");
                cache.put(2, "b");
                assert_eq!(cache.peek(&1), Some(&"a"));
                assert!(cache.contains(&1));
                cache.put(3, "c");
                assert!(!cache.contains(&1));
            }

            #[test]
            fn touch_promotes_without_reading() {
                let mut cache = LruCache::new(2);
                cache.put(1, "a");
                cache.put(2, "b");
                assert!(cache.touch(&1));
                assert!(!cache.touch(&7));
                cache.put(3, "c");
                assert!(cache.contains(&1));
                assert!(!cache.contains(&2));
            }

            #[test]
            fn remove_frees_room_without_eviction() {
                let mut cache = LruCache::new(2);
                cache.put(1, "a");
                cache.put(2, "b");
                assert_eq!(cache.remove(&1), Some("a"));
                assert_eq!(cache.remove(&1), None);
                cache.put(3, "c");
                assert_eq!(order(&cache), vec![(3, "c"), (2, "b")]);
            }

            #[test]
            fn pop_and_peek_lru() {
                let mut cache = LruCache::new(3);
                assert_eq!(cache.pop_lru(), None);
                assert_eq!(cache.peek_lru(), None);
                cache.put(1, "a");
                cache.put(2, "b");
                assert_eq!(cache.peek_lru(), Some((&1, &"a")));
                assert_eq!(cache.pop_lru(), Some((1, "a")));
                assert_eq!(cache.pop_lru(), Some((2, "b")));
                assert!(cache.is_empty());
            }

            #[test]
            fn recency_rank_tracks_position() {
                let mut cache = LruCache::new(3);
                cache.put('x', 0);
                cache.put('y', 0);
                cache.put('z', 0);
                assert_eq!(cache.recency_rank(&'z'), Some(0));
                assert_eq!(cache.recency_rank(&'x'), Some(2));
                cache.get(&'x');
                assert_eq!(cache.recency_rank(&'x'), Some(0));
                assert_eq!(cache.recency_rank(&'q'), None);
            }

            #[test]
            fn clear_keeps_capacity() {
                let mut cache = LruCache::new(2);
                cache.put(1, 1);
                cache.put(2, 2);
                cache.clear();
                assert!(cache.is_empty());
                assert_eq!(cache.capacity(), 2);
                cache.put(3, 3);
                assert_eq!(order(&cache), vec![(3, 3)]);
                assert!(cache.check_invariants().is_ok());
            }

            #[test]
            fn keys_values_and_reverse() {
                let mut cache = LruCache::new(3);
                cache.extend([("a", 1), ("b", 2), ("c", 3)]);
                assert_eq!(cache.keys().copied().collect::<Vec<_>>(), vec!["c", "b", "a"]);
                assert_eq!(cache.values().rev().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
                assert_eq!(cache.iter().len(), 3);
            }
        }

        mod formatting {
            use super::*;

            #[test]
            fn display_lists_entries_front_to_back() {
                let mut cache = LruCache::new(3);
                cache.put(20, 200);
                cache.put(10, 100);
                assert_eq!(
                    cache.to_string(),
                    "Cache (capacity: 3, size: 2): [10:100][20:200]"
                );
            }

            #[test]
            fn debug_renders_map_in_recency_order() {
                let mut cache = LruCache::new(2);
                cache.put("en", "hello");
                cache.put("es", "hola");
                assert_eq!(format!("{:?}", cache), r#"{"es": "hola", "en": "hello"}"#);
            }
        }
    }

    // ==============================================
    // INVARIANT CHECKS
    // ==============================================
    mod invariants {
        use super::*;

        #[test]
        fn index_pointing_at_wrong_slot_is_reported() {
            let mut cache = LruCache::new(3);
            cache.put(1, ());
            cache.put(2, ());
            let id1 = cache.map[&1];
            cache.map.insert(2, id1);
            let err = cache.check_invariants().unwrap_err();
            assert!(err.message().contains("index points to slot"));
        }

        #[test]
        fn orphaned_index_key_is_reported() {
            let mut cache = LruCache::new(3);
            cache.put(1, ());
            let id1 = cache.map[&1];
            cache.map.insert(9, id1);
            let err = cache.check_invariants().unwrap_err();
            assert!(err.message().contains("index holds 2 keys"));
        }

        #[test]
        fn entry_missing_from_index_is_reported() {
            let mut cache = LruCache::new(3);
            cache.put(1, ());
            cache.put(2, ());
            cache.map.remove(&1);
            cache.map.insert(3, SlotId(usize::MAX));
            let err = cache.check_invariants().unwrap_err();
            assert!(err.message().contains("missing from the index"));
        }
    }

    // ==============================================
    // TRAIT SURFACE
    // ==============================================
    mod trait_impls {
        use super::*;

        fn fill<C: CoreCache<u32, u32>>(cache: &mut C, n: u32) {
            for i in 0..n {
                cache.insert(i, i * 10);
            }
        }

        #[test]
        fn generic_core_cache_usage() {
            let mut cache = LruCache::new(4);
            fill(&mut cache, 6);
            assert_eq!(CoreCache::len(&cache), 4);
            assert!(!CoreCache::contains(&cache, &1));
            assert_eq!(CoreCache::get(&mut cache, &5), Some(&50));
        }

        #[test]
        fn lru_trait_delegates() {
            let mut cache = LruCache::new(3);
            fill(&mut cache, 3);
            assert!(LruCacheTrait::touch(&mut cache, &0));
            assert_eq!(LruCacheTrait::recency_rank(&cache, &0), Some(0));
            assert_eq!(LruCacheTrait::peek_lru(&cache), Some((&1, &10)));
            assert_eq!(MutableCache::remove(&mut cache, &2), Some(20));
            assert_eq!(LruCacheTrait::pop_lru(&mut cache), Some((1, 10)));
        }
    }

    #[cfg(feature = "metrics")]
    mod metrics {
        use super::*;

        #[test]
        fn counts_hits_misses_and_evictions() {
            let mut cache = LruCache::new(2);
            cache.put(1, 1);
            cache.put(2, 2);
            cache.put(1, 11);
            cache.put(3, 3);
            cache.get(&1);
            cache.get(&2);
            cache.peek(&3);

            let snap = cache.metrics_snapshot();
            assert_eq!(snap.insert_calls, 4);
            assert_eq!(snap.insert_new, 3);
            assert_eq!(snap.insert_updates, 1);
            assert_eq!(snap.evicted_entries, 1);
            assert_eq!(snap.get_hits, 1);
            assert_eq!(snap.get_misses, 1);
            assert_eq!(snap.peek_found, 1);
            assert_eq!(snap.cache_len, 2);
            assert_eq!(snap.capacity, 2);
        }

        #[test]
        fn reset_clears_counters() {
            let mut cache = LruCache::new(2);
            cache.put(1, 1);
            cache.get(&1);
            cache.reset_metrics();
            let snap = cache.snapshot();
            assert_eq!(snap.get_calls, 0);
            assert_eq!(snap.insert_calls, 0);
            assert_eq!(snap.cache_len, 1);
        }
    }
}
