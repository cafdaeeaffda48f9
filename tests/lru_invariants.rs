// ==============================================
// LRU POLICY INVARIANT TESTS (integration)
// ==============================================
//
// End-to-end checks of the public cache contract: bounded occupancy,
// eviction order, and read-refresh behavior, exercised through the
// prelude the way downstream code would.

use ringkit::prelude::*;

// ==============================================
// Bounded occupancy
// ==============================================

mod bounded_occupancy {
    use super::*;

    #[test]
    fn len_never_exceeds_capacity() {
        let mut cache = LruCache::new(5);
        for i in 0..100u32 {
            cache.insert(i, i);
            assert!(cache.len() <= 5);
        }
        assert_eq!(cache.len(), 5);
        // Only the five most recent keys survive.
        for i in 95..100u32 {
            assert!(cache.contains(&i));
        }
        assert!(!cache.contains(&94));
    }

    #[test]
    fn resident_keys_round_trip_their_values() {
        let mut cache = LruCache::new(8);
        for i in 0..8u32 {
            cache.insert(i, format!("value-{i}"));
        }
        for i in 0..8u32 {
            assert_eq!(cache.get(&i).map(String::as_str), Some(&*format!("value-{i}")));
        }
    }
}

// ==============================================
// Eviction order
// ==============================================

mod eviction_order {
    use super::*;

    #[test]
    fn oldest_insertion_evicts_first() {
        let mut cache = LruCache::new(3);
        cache.insert("A", 1);
        cache.insert("B", 2);
        cache.insert("C", 3);
        cache.insert("D", 4);

        assert!(!cache.contains(&"A"));
        assert!(cache.contains(&"B"));
        assert!(cache.contains(&"C"));
        assert!(cache.contains(&"D"));
    }

    #[test]
    fn read_refreshes_recency() {
        let mut cache = LruCache::new(3);
        cache.insert("A", 1);
        cache.insert("B", 2);
        cache.insert("C", 3);
        assert_eq!(cache.get(&"A"), Some(&1));
        cache.insert("D", 4);

        assert!(cache.contains(&"A"), "read A must survive the eviction");
        assert!(!cache.contains(&"B"), "B became the least recently used");
    }

    #[test]
    fn overwrite_is_idempotent_for_membership() {
        let mut cache = LruCache::new(3);
        cache.insert("A", 1);
        cache.insert("A", 1);
        cache.insert("A", 2);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&"A"), Some(&2));
    }

    #[test]
    fn pop_lru_agrees_with_eviction() {
        let mut cache = LruCache::new(4);
        for i in 0..4u32 {
            cache.insert(i, i);
        }
        cache.get(&0);
        // Whatever peek_lru reports is exactly what pop_lru removes next.
        let (&expected, _) = cache.peek_lru().unwrap();
        let (popped, _) = cache.pop_lru().unwrap();
        assert_eq!(popped, expected);
        assert_eq!(popped, 1);
    }
}

// ==============================================
// Concurrent wrapper
// ==============================================

#[cfg(feature = "concurrency")]
mod concurrent_wrapper {
    use std::sync::{Arc, Barrier};
    use std::thread;

    use super::*;

    #[test]
    fn parallel_inserts_stay_bounded() {
        let capacity = 16;
        let threads = 8;
        let inserts_per_thread = 500u32;

        for _ in 0..20 {
            let cache: Arc<ConcurrentLruCache<u32, u32>> =
                Arc::new(ConcurrentLruCache::new(capacity));
            let barrier = Arc::new(Barrier::new(threads));

            let handles: Vec<_> = (0..threads as u32)
                .map(|tid| {
                    let cache = cache.clone();
                    let barrier = barrier.clone();
                    thread::spawn(move || {
                        barrier.wait();
                        for i in 0..inserts_per_thread {
                            let key = tid * inserts_per_thread + i;
                            cache.insert(key, key);
                            let _ = cache.get(&key);
                        }
                    })
                })
                .collect();

            for handle in handles {
                handle.join().unwrap();
            }

            assert_eq!(cache.len(), capacity);
        }
    }

    #[test]
    fn readers_and_writers_interleave() {
        let cache: Arc<ConcurrentLruCache<u32, String>> = Arc::new(ConcurrentLruCache::new(32));
        for i in 0..32u32 {
            cache.insert(i, format!("v{i}"));
        }

        let barrier = Arc::new(Barrier::new(4));
        let handles: Vec<_> = (0..4u32)
            .map(|tid| {
                let cache = cache.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    for i in 0..2_000u32 {
                        let key = (tid * 7 + i) % 64;
                        if i % 3 == 0 {
                            cache.insert(key, format!("v{key}"));
                        } else if i % 3 == 1 {
                            if let Some(value) = cache.get(&key) {
                                assert_eq!(*value, format!("v{key}"));
                            }
                        } else if let Some(value) = cache.peek(&key) {
                            assert_eq!(*value, format!("v{key}"));
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert!(cache.len() <= 32);
    }
}
