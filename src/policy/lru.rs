//! Fixed-capacity least-recently-used cache.
//!
//! A dual index: a hash map for O(1) key lookup and an arena-backed
//! recency list for O(1) reorder and eviction. Nodes are addressed by
//! stable [`SlotId`] handles, so the policy core contains no raw
//! pointers and evicted node slots are recycled by the arena free chain.
//!
//! ## Architecture
//!
//! ```text
//!   ┌─────────────────────────────────────────────────────────────────┐
//!   │                        LruCache<K, V>                           │
//!   │                                                                 │
//!   │   index: FxHashMap<K, SlotId>                                   │
//!   │   ┌─────────┬────────┐                                          │
//!   │   │  key_a  │ id_0 ──┼───────────────┐                          │
//!   │   │  key_b  │ id_1 ──┼─────────┐     │                          │
//!   │   │  key_c  │ id_2 ──┼──┐      │     │                          │
//!   │   └─────────┴────────┘  │      │     │                          │
//!   │                         ▼      ▼     ▼                          │
//!   │   list: RecencyList<(K, V)>                                     │
//!   │   head ──► [id_2] ◄──► [id_1] ◄──► [id_0] ◄── tail              │
//!   │            (MRU)                   (LRU)                        │
//!   └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `insert` of a new key at capacity pops the list tail and erases that
//! key from the index; `get` and `touch` splice the entry to the head.
//! Both structures always cover exactly the same key set.
//!
//! The core is single-threaded; [`ConcurrentLruCache`] (feature
//! `concurrency`) wraps it in a `parking_lot::RwLock` and shares values
//! as `Arc<V>`.

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::recency_list::RecencyList;
use crate::ds::slot_arena::SlotId;
use crate::error::InvariantError;
#[cfg(feature = "metrics")]
use crate::metrics::{LruMetrics, LruMetricsSnapshot};
use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

/// Bounded cache evicting the least recently used entry on overflow.
///
/// Keys live in both the index and the recency list, hence `K: Clone`.
/// A capacity of 0 accepts no entries.
///
/// # Example
///
/// ```
/// use ringkit::policy::lru::LruCache;
/// use ringkit::traits::CoreCache;
///
/// let mut cache = LruCache::new(2);
/// cache.insert("a", 1);
/// cache.insert("b", 2);
/// cache.insert("c", 3); // evicts "a"
/// assert!(!cache.contains(&"a"));
/// assert_eq!(cache.get(&"b"), Some(&2));
/// ```
pub struct LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    index: FxHashMap<K, SlotId>,
    list: RecencyList<(K, V)>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: LruMetrics,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            list: RecencyList::with_capacity(capacity),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: LruMetrics::default(),
        }
    }

    /// Returns the value for `key` without updating recency order.
    pub fn peek(&self, key: &K) -> Option<&V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_peek();

        let id = *self.index.get(key)?;
        self.list.get(id).map(|(_, value)| value)
    }

    /// Iterates entries from most recently to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.list.iter().map(|(key, value)| (key, value))
    }

    #[cfg(feature = "metrics")]
    /// Returns an owned copy of the operation counters.
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        LruMetricsSnapshot {
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            insert_new: self.metrics.insert_new,
            insert_updates: self.metrics.insert_updates,
            evictions: self.metrics.evictions,
            touches: self.metrics.touches,
            peeks: self.metrics.peeks.get(),
            cache_len: self.index.len(),
            capacity: self.capacity,
        }
    }

    /// Checks that the index and recency list agree.
    pub fn validate(&self) -> Result<(), InvariantError> {
        if self.index.len() != self.list.len() {
            return Err(InvariantError::new("index and recency list length mismatch"));
        }
        if self.index.len() > self.capacity {
            return Err(InvariantError::new("occupancy exceeds capacity"));
        }
        for (key, &id) in &self.index {
            let node = self
                .list
                .get(id)
                .ok_or_else(|| InvariantError::new("index entry without list node"))?;
            if &node.0 != key {
                return Err(InvariantError::new("index id points at a different key"));
            }
        }
        self.list.validate()
    }

    #[cfg(any(test, debug_assertions))]
    /// Panics if the index and recency list disagree.
    pub fn debug_validate_invariants(&self) {
        if let Err(err) = self.validate() {
            panic!("lru cache invariant violated: {err}");
        }
    }
}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&id) = self.index.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            let node = self.list.get_mut(id).expect("index entry without list node");
            let previous = std::mem::replace(&mut node.1, value);
            self.list.move_to_front(id);
            return Some(previous);
        }

        if self.capacity == 0 {
            return None;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        if self.index.len() >= self.capacity {
            if let Some((evicted_key, _)) = self.list.pop_back() {
                self.index.remove(&evicted_key);
                #[cfg(feature = "metrics")]
                self.metrics.record_eviction();
            }
        }

        let id = self.list.push_front((key.clone(), value));
        self.index.insert(key, id);
        None
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        let id = match self.index.get(key) {
            Some(&id) => id,
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_miss();
                return None;
            },
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        // A read counts as a use.
        self.list.move_to_front(id);
        self.list.get(id).map(|(_, value)| value)
    }

    fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    fn len(&self) -> usize {
        self.index.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        self.index.clear();
        self.list.clear();
    }
}

impl<K, V> MutableCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.index.remove(key)?;
        self.list.remove(id).map(|(_, value)| value)
    }
}

impl<K, V> LruCacheTrait<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_lru(&mut self) -> Option<(K, V)> {
        let (key, value) = self.list.pop_back()?;
        self.index.remove(&key);
        Some((key, value))
    }

    fn peek_lru(&self) -> Option<(&K, &V)> {
        self.list.back().map(|(key, value)| (key, value))
    }

    fn touch(&mut self, key: &K) -> bool {
        let id = match self.index.get(key) {
            Some(&id) => id,
            None => return false,
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_touch();

        self.list.move_to_front(id)
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        if !self.index.contains_key(key) {
            return None;
        }
        self.list.iter().position(|(k, _)| k == key)
    }
}

impl<K, V> fmt::Debug for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}

impl<K, V> Default for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache with a default capacity of 16.
    fn default() -> Self {
        Self::new(16)
    }
}

impl<K, V> Extend<(K, V)> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

#[cfg(feature = "concurrency")]
pub use concurrent::ConcurrentLruCache;

#[cfg(feature = "concurrency")]
mod concurrent {
    use std::fmt;
    use std::hash::Hash;
    use std::sync::Arc;

    use parking_lot::RwLock;

    use super::LruCache;
    use crate::traits::{ConcurrentCache, CoreCache, LruCacheTrait, MutableCache};

    /// Thread-safe LRU cache sharing values as `Arc<V>`.
    ///
    /// `get` takes the write lock because a hit reorders the recency
    /// list; `peek` only takes the read lock, so read-heavy callers that
    /// can tolerate stale recency should prefer it.
    #[derive(Clone)]
    pub struct ConcurrentLruCache<K, V>
    where
        K: Eq + Hash + Clone,
    {
        inner: Arc<RwLock<LruCache<K, Arc<V>>>>,
    }

    impl<K, V> ConcurrentLruCache<K, V>
    where
        K: Eq + Hash + Clone + Send + Sync,
        V: Send + Sync,
    {
        /// Creates a thread-safe cache holding at most `capacity` entries.
        pub fn new(capacity: usize) -> Self {
            Self {
                inner: Arc::new(RwLock::new(LruCache::new(capacity))),
            }
        }

        /// Inserts a value, wrapping it in `Arc<V>`. Returns the previous
        /// value if the key existed.
        pub fn insert(&self, key: K, value: V) -> Option<Arc<V>> {
            let value = Arc::new(value);
            self.inner.write().insert(key, value)
        }

        /// Inserts a pre-wrapped `Arc<V>` without copying the payload.
        pub fn insert_arc(&self, key: K, value: Arc<V>) -> Option<Arc<V>> {
            self.inner.write().insert(key, value)
        }

        /// Returns the value for `key`, marking it most recently used.
        pub fn get(&self, key: &K) -> Option<Arc<V>> {
            self.inner.write().get(key).map(Arc::clone)
        }

        /// Returns the value for `key` without updating recency order.
        pub fn peek(&self, key: &K) -> Option<Arc<V>> {
            self.inner.read().peek(key).map(Arc::clone)
        }

        /// Removes `key`, returning its value if present.
        pub fn remove(&self, key: &K) -> Option<Arc<V>> {
            self.inner.write().remove(key)
        }

        /// Marks `key` as most recently used; `false` if absent.
        pub fn touch(&self, key: &K) -> bool {
            self.inner.write().touch(key)
        }

        /// Removes and returns the least recently used entry.
        pub fn pop_lru(&self) -> Option<(K, Arc<V>)> {
            self.inner.write().pop_lru()
        }

        /// Returns the least recently used entry without removing it.
        pub fn peek_lru(&self) -> Option<(K, Arc<V>)> {
            let guard = self.inner.read();
            guard.peek_lru().map(|(k, v)| (k.clone(), Arc::clone(v)))
        }

        /// Returns `true` if `key` is present.
        pub fn contains(&self, key: &K) -> bool {
            self.inner.read().contains(key)
        }

        /// Returns the current number of entries.
        pub fn len(&self) -> usize {
            self.inner.read().len()
        }

        /// Returns `true` if the cache holds no entries.
        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }

        /// Returns the maximum number of entries.
        pub fn capacity(&self) -> usize {
            self.inner.read().capacity()
        }

        /// Removes all entries.
        pub fn clear(&self) {
            self.inner.write().clear()
        }

        #[cfg(feature = "metrics")]
        /// Returns an owned copy of the operation counters.
        pub fn metrics_snapshot(&self) -> crate::metrics::LruMetricsSnapshot {
            self.inner.read().metrics_snapshot()
        }
    }

    impl<K, V> ConcurrentCache for ConcurrentLruCache<K, V>
    where
        K: Eq + Hash + Clone + Send + Sync,
        V: Send + Sync,
    {
    }

    impl<K, V> fmt::Debug for ConcurrentLruCache<K, V>
    where
        K: Eq + Hash + Clone,
    {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let guard = self.inner.read();
            f.debug_struct("ConcurrentLruCache")
                .field("len", &guard.len())
                .field("capacity", &guard.capacity())
                .finish_non_exhaustive()
        }
    }
}
