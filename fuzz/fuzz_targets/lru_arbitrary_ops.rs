#![no_main]

use libfuzzer_sys::fuzz_target;
use ringkit::policy::lru::LruCache;
use ringkit::traits::{CoreCache, LruCacheTrait, MutableCache};

// Fuzz arbitrary operation sequences on LruCache against a Vec model
//
// The model keeps (key, value) pairs in MRU-to-LRU order; after every
// operation the cache's recency iteration must match it exactly.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let capacity = usize::from(data[0] % 9);
    let mut cache: LruCache<u8, u8> = LruCache::new(capacity);
    let mut model: Vec<(u8, u8)> = Vec::new();

    let mut idx = 1;
    while idx + 1 < data.len() {
        let op = data[idx] % 6;
        let key = data[idx + 1] % 16;
        let value = data[idx + 1];

        match op {
            0 => {
                // insert
                let previous = cache.insert(key, value);
                if let Some(pos) = model.iter().position(|(k, _)| *k == key) {
                    let (_, old) = model.remove(pos);
                    assert_eq!(previous, Some(old));
                    model.insert(0, (key, value));
                } else {
                    assert_eq!(previous, None);
                    if capacity > 0 {
                        if model.len() >= capacity {
                            model.pop();
                        }
                        model.insert(0, (key, value));
                    }
                }
            }
            1 => {
                // get refreshes recency on hit
                let hit = cache.get(&key).copied();
                if let Some(pos) = model.iter().position(|(k, _)| *k == key) {
                    let entry = model.remove(pos);
                    assert_eq!(hit, Some(entry.1));
                    model.insert(0, entry);
                } else {
                    assert_eq!(hit, None);
                }
            }
            2 => {
                // peek never reorders
                let expected = model.iter().find(|(k, _)| *k == key).map(|(_, v)| *v);
                assert_eq!(cache.peek(&key).copied(), expected);
            }
            3 => {
                // remove
                let removed = cache.remove(&key);
                if let Some(pos) = model.iter().position(|(k, _)| *k == key) {
                    let (_, old) = model.remove(pos);
                    assert_eq!(removed, Some(old));
                } else {
                    assert_eq!(removed, None);
                }
            }
            4 => {
                // touch
                let touched = cache.touch(&key);
                if let Some(pos) = model.iter().position(|(k, _)| *k == key) {
                    assert!(touched);
                    let entry = model.remove(pos);
                    model.insert(0, entry);
                } else {
                    assert!(!touched);
                }
            }
            5 => {
                // pop_lru
                assert_eq!(cache.pop_lru(), model.pop());
            }
            _ => unreachable!(),
        }

        // Full state comparison after every operation
        assert_eq!(cache.len(), model.len());
        assert!(cache.len() <= capacity);
        let order: Vec<(u8, u8)> = cache.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(order, model);
        if let Some((lru_key, lru_value)) = model.last() {
            assert_eq!(cache.peek_lru(), Some((lru_key, lru_value)));
        } else {
            assert_eq!(cache.peek_lru(), None);
        }
        if let Err(err) = cache.validate() {
            panic!("invariant violated: {err}");
        }

        idx += 2;
    }
});
