//! # Cache Trait Hierarchy
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │            CoreCache<K, V>              │
//!   │                                         │
//!   │  insert(&mut, K, V) → Option<V>         │
//!   │  get(&mut, &K) → Option<&V>             │
//!   │  contains(&, &K) → bool                 │
//!   │  len / is_empty / capacity / clear      │
//!   └──────────────────┬──────────────────────┘
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │           MutableCache<K, V>            │
//!   │  remove(&K) → Option<V>                 │
//!   └──────────────────┬──────────────────────┘
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │          LruCacheTrait<K, V>            │
//!   │  pop_lru() → (K, V)                     │
//!   │  peek_lru() → (&K, &V)                  │
//!   │  touch(&K) → bool                       │
//!   │  recency_rank(&K) → usize               │
//!   └─────────────────────────────────────────┘
//! ```
//!
//! The traits let callers write code generic over "a bounded cache" without
//! naming [`LruCache`](crate::policy::lru::LruCache) directly, e.g. to swap in
//! a test double. None of them imply thread safety; callers that share a
//! cache wrap it in a lock.

/// Operations every bounded cache supports.
pub trait CoreCache<K, V> {
    /// Inserts a key-value pair, returning the previous value if the key
    /// was already present.
    ///
    /// If the cache is full and `key` is new, one entry is evicted first.
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    /// use lrukit::traits::CoreCache;
    ///
    /// let mut cache = LruCache::new(4);
    /// assert_eq!(CoreCache::insert(&mut cache, 1, "first"), None);
    /// assert_eq!(CoreCache::insert(&mut cache, 1, "second"), Some("first"));
    /// ```
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Gets a reference to a value, updating eviction state on a hit.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Checks for a key without updating eviction state.
    fn contains(&self, key: &K) -> bool;

    /// Number of live entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of live entries.
    fn capacity(&self) -> usize;

    /// Removes all entries.
    fn clear(&mut self);
}

/// Adds arbitrary key-based removal.
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes `key`, returning its value if it was present.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes each key in order. The default loops over [`remove`](Self::remove).
    fn remove_batch(&mut self, keys: &[K]) -> Vec<Option<V>> {
        keys.iter().map(|key| self.remove(key)).collect()
    }
}

/// Recency-ordered caches.
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry.
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    /// use lrukit::traits::LruCacheTrait;
    ///
    /// let mut cache = LruCache::new(4);
    /// cache.put(1, "a");
    /// cache.put(2, "b");
    /// assert_eq!(LruCacheTrait::pop_lru(&mut cache), Some((1, "a")));
    /// ```
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Least recently used entry, without removing it or changing order.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Marks `key` as most recently used; `false` if absent.
    fn touch(&mut self, key: &K) -> bool;

    /// Position in recency order, `0` being most recently used.
    fn recency_rank(&self, key: &K) -> Option<usize>;
}
