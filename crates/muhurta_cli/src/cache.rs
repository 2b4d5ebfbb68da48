//! In-process time-to-live memo.
//!
//! Callers pass the current `Instant` so expiry is testable without sleeping.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use tracing::debug;

#[derive(Debug)]
pub struct TtlCache<K, V> {
    name: &'static str,
    ttl: Duration,
    entries: HashMap<K, (Instant, V)>,
}

impl<K: Eq + Hash, V: Clone> TtlCache<K, V> {
    pub fn new(name: &'static str, ttl: Duration) -> Self {
        Self {
            name,
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Fresh value for `key`, if any.
    pub fn get(&self, key: &K, now: Instant) -> Option<V> {
        self.entries
            .get(key)
            .filter(|(stored, _)| now.saturating_duration_since(*stored) < self.ttl)
            .map(|(_, v)| v.clone())
    }

    pub fn insert(&mut self, key: K, value: V, now: Instant) {
        self.entries.retain(|_, (stored, _)| now.saturating_duration_since(*stored) < self.ttl);
        self.entries.insert(key, (now, value));
    }

    /// Cached value, or the result of `compute` stored on success.
    pub fn get_or_try_insert_with<E>(
        &mut self,
        key: K,
        now: Instant,
        compute: impl FnOnce() -> Result<V, E>,
    ) -> Result<V, E> {
        if let Some(hit) = self.get(&key, now) {
            debug!(cache = self.name, "hit");
            return Ok(hit);
        }
        debug!(cache = self.name, "miss");
        let value = compute()?;
        self.insert(key, value.clone(), now);
        Ok(value)
    }

    pub fn get_or_insert_with(&mut self, key: K, now: Instant, compute: impl FnOnce() -> V) -> V {
        if let Some(hit) = self.get(&key, now) {
            debug!(cache = self.name, "hit");
            return hit;
        }
        debug!(cache = self.name, "miss");
        let value = compute();
        self.insert(key, value.clone(), now);
        value
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_expires_after_ttl() {
        let t0 = Instant::now();
        let mut cache = TtlCache::new("t", Duration::from_secs(60));
        cache.insert("k", 1, t0);
        assert_eq!(cache.get(&"k", t0 + Duration::from_secs(59)), Some(1));
        assert_eq!(cache.get(&"k", t0 + Duration::from_secs(60)), None);
    }

    #[test]
    fn compute_runs_once_while_fresh() {
        let t0 = Instant::now();
        let mut cache = TtlCache::new("t", Duration::from_secs(300));
        let mut calls = 0;
        for offset in [0, 100, 299] {
            let v: Result<u32, ()> = cache.get_or_try_insert_with((), t0 + Duration::from_secs(offset), || {
                calls += 1;
                Ok(7)
            });
            assert_eq!(v, Ok(7));
        }
        assert_eq!(calls, 1);
        let _ = cache.get_or_try_insert_with((), t0 + Duration::from_secs(301), || {
            calls += 1;
            Ok::<_, ()>(8)
        });
        assert_eq!(calls, 2);
    }

    #[test]
    fn errors_are_not_cached() {
        let t0 = Instant::now();
        let mut cache: TtlCache<u8, u8> = TtlCache::new("t", Duration::from_secs(5));
        assert_eq!(cache.get_or_try_insert_with(1, t0, || Err("boom")), Err("boom"));
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.get_or_try_insert_with(1, t0, || Ok::<_, &str>(3)), Ok(3));
    }

    #[test]
    fn stale_entries_are_evicted_on_insert() {
        let t0 = Instant::now();
        let mut cache = TtlCache::new("t", Duration::from_secs(1));
        cache.insert(1, 1, t0);
        cache.insert(2, 2, t0 + Duration::from_secs(5));
        assert_eq!(cache.len(), 1);
    }
}
