//! Operation counters for the LRU cache (feature `metrics`).
//!
//! Counters are plain `u64`s bumped on the `&mut self` paths and a
//! `Cell<u64>` for `peek`, which only has `&self`. Snapshots are owned
//! copies, safe to hand across threads or log.

use std::cell::Cell;

/// Counters recorded by [`LruCache`](crate::policy::lru::LruCache).
#[derive(Debug, Default)]
pub struct LruMetrics {
    pub(crate) get_hits: u64,
    pub(crate) get_misses: u64,
    pub(crate) insert_new: u64,
    pub(crate) insert_updates: u64,
    pub(crate) evictions: u64,
    pub(crate) touches: u64,
    pub(crate) peeks: Cell<u64>,
}

impl LruMetrics {
    #[inline]
    pub(crate) fn record_get_hit(&mut self) {
        self.get_hits += 1;
    }

    #[inline]
    pub(crate) fn record_get_miss(&mut self) {
        self.get_misses += 1;
    }

    #[inline]
    pub(crate) fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }

    #[inline]
    pub(crate) fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }

    #[inline]
    pub(crate) fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    #[inline]
    pub(crate) fn record_touch(&mut self) {
        self.touches += 1;
    }

    #[inline]
    pub(crate) fn record_peek(&self) {
        self.peeks.set(self.peeks.get() + 1);
    }
}

/// Owned, point-in-time copy of [`LruMetrics`] plus cache occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LruMetricsSnapshot {
    pub get_hits: u64,
    pub get_misses: u64,
    pub insert_new: u64,
    pub insert_updates: u64,
    pub evictions: u64,
    pub touches: u64,
    pub peeks: u64,
    pub cache_len: usize,
    pub capacity: usize,
}

impl LruMetricsSnapshot {
    /// Hit ratio over all `get` calls, or `None` before the first call.
    pub fn hit_ratio(&self) -> Option<f64> {
        let total = self.get_hits + self.get_misses;
        if total == 0 {
            return None;
        }
        Some(self.get_hits as f64 / total as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_ratio_is_none_without_gets() {
        let snapshot = LruMetricsSnapshot {
            get_hits: 0,
            get_misses: 0,
            insert_new: 0,
            insert_updates: 0,
            evictions: 0,
            touches: 0,
            peeks: 0,
            cache_len: 0,
            capacity: 4,
        };
        assert_eq!(snapshot.hit_ratio(), None);
    }

    #[test]
    fn hit_ratio_counts_hits_over_total() {
        let snapshot = LruMetricsSnapshot {
            get_hits: 3,
            get_misses: 1,
            insert_new: 0,
            insert_updates: 0,
            evictions: 0,
            touches: 0,
            peeks: 0,
            cache_len: 0,
            capacity: 4,
        };
        assert_eq!(snapshot.hit_ratio(), Some(0.75));
    }

    #[test]
    fn peek_counter_works_through_shared_ref() {
        let metrics = LruMetrics::default();
        metrics.record_peek();
        metrics.record_peek();
        assert_eq!(metrics.peeks.get(), 2);
    }
}
