//! Cache trait hierarchy.
//!
//! A trimmed layering: [`CoreCache`] holds the operations any bounded
//! cache supports, [`MutableCache`] adds arbitrary key removal, and
//! [`LruCacheTrait`] adds the recency-specific surface. The split keeps
//! generic call sites honest about which capabilities they actually need.
//!
//! | Trait             | Extends        | Adds                                 |
//! |-------------------|----------------|--------------------------------------|
//! | `CoreCache`       | -              | insert, get, contains, len, clear    |
//! | `MutableCache`    | `CoreCache`    | remove                               |
//! | `LruCacheTrait`   | `MutableCache` | pop_lru, peek_lru, touch, recency_rank |
//! | `ConcurrentCache` | `Send + Sync`  | marker for thread-safe caches        |

/// Core operations every bounded cache supports.
pub trait CoreCache<K, V> {
    /// Inserts a key-value pair, returning the previous value if the key
    /// existed. At capacity, a new key evicts per the cache's policy.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Returns a reference to the value for `key`, updating any access
    /// state the eviction policy tracks. Use [`contains`](Self::contains)
    /// to check existence without side effects.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Returns `true` if `key` is present, without updating access state.
    fn contains(&self, key: &K) -> bool;

    /// Returns the current number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the cache holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum number of entries.
    fn capacity(&self) -> usize;

    /// Removes all entries.
    fn clear(&mut self);
}

/// Caches that additionally support arbitrary key removal.
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes `key`, returning its value if it was present.
    fn remove(&mut self, key: &K) -> Option<V>;
}

/// Recency-ordered caches: least-recently-used entries evict first.
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Returns the least recently used entry without removing it or
    /// updating recency order.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Marks `key` as most recently used without returning its value.
    /// Returns `false` if the key is absent.
    fn touch(&mut self, key: &K) -> bool;

    /// Returns `key`'s position in recency order (0 = most recent).
    /// O(n): walks the recency sequence.
    fn recency_rank(&self, key: &K) -> Option<usize>;
}

/// Marker for caches that are safe to share between threads.
pub trait ConcurrentCache: Send + Sync {}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimal FIFO-over-Vec stand-in, enough to exercise the hierarchy's
    // default methods and prove the traits compose for a foreign type.
    struct VecCache {
        data: Vec<(u32, String)>,
        capacity: usize,
    }

    impl CoreCache<u32, String> for VecCache {
        fn insert(&mut self, key: u32, value: String) -> Option<String> {
            if let Some((_, existing)) = self.data.iter_mut().find(|(k, _)| *k == key) {
                return Some(std::mem::replace(existing, value));
            }
            if self.data.len() >= self.capacity {
                self.data.remove(0);
            }
            self.data.push((key, value));
            None
        }

        fn get(&mut self, key: &u32) -> Option<&String> {
            self.data.iter().find(|(k, _)| k == key).map(|(_, v)| v)
        }

        fn contains(&self, key: &u32) -> bool {
            self.data.iter().any(|(k, _)| k == key)
        }

        fn len(&self) -> usize {
            self.data.len()
        }

        fn capacity(&self) -> usize {
            self.capacity
        }

        fn clear(&mut self) {
            self.data.clear();
        }
    }

    #[test]
    fn default_is_empty_follows_len() {
        let mut cache = VecCache {
            data: Vec::new(),
            capacity: 2,
        };
        assert!(cache.is_empty());
        cache.insert(1, "one".into());
        assert!(!cache.is_empty());
    }

    #[test]
    fn insert_returns_previous_value() {
        let mut cache = VecCache {
            data: Vec::new(),
            capacity: 2,
        };
        assert_eq!(cache.insert(1, "first".into()), None);
        assert_eq!(cache.insert(1, "second".into()), Some("first".into()));
        assert_eq!(cache.get(&1), Some(&"second".to_string()));
    }
}
