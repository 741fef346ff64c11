use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, PoisonError, RwLock};

// ---------------------------------------------------------------------------
// MemoCache – compute once per distinct key, keep for the process lifetime
// ---------------------------------------------------------------------------

/// Read-through memo table keyed by call arguments.
///
/// Values are never evicted or invalidated. Two callers racing on the same
/// missing key may both compute; the first insert wins and both receive it.
pub struct MemoCache<K, V> {
    entries: RwLock<HashMap<K, Arc<V>>>,
}

impl<K, V> Default for MemoCache<K, V> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl<K, V> MemoCache<K, V>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value for `key`, computing it with `compute` on a miss.
    pub fn get_or_insert_with<F>(&self, key: &K, compute: F) -> Arc<V>
    where
        F: FnOnce() -> V,
    {
        if let Some(hit) = self.get(key) {
            return hit;
        }
        log::debug!("memo miss for {key:?}");
        self.insert(key.clone(), compute())
    }

    /// Like [`get_or_insert_with`](Self::get_or_insert_with), but a failed
    /// computation is returned to the caller and nothing is cached.
    pub fn get_or_try_insert_with<F, E>(&self, key: &K, compute: F) -> Result<Arc<V>, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(hit) = self.get(key) {
            return Ok(hit);
        }
        log::debug!("memo miss for {key:?}");
        Ok(self.insert(key.clone(), compute()?))
    }

    fn get(&self, key: &K) -> Option<Arc<V>> {
        let hit = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned();
        if hit.is_some() {
            log::debug!("memo hit for {key:?}");
        }
        hit
    }

    fn insert(&self, key: K, value: V) -> Arc<V> {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        entries.entry(key).or_insert_with(|| Arc::new(value)).clone()
    }
}

#[cfg(test)]
impl<K, V> MemoCache<K, V> {
    /// Number of memoized keys.
    pub(crate) fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn computes_once_per_key() {
        let cache: MemoCache<(String, u32), usize> = MemoCache::new();
        let calls = Cell::new(0);
        let compute = || {
            calls.set(calls.get() + 1);
            42
        };

        let key = ("abc".to_string(), 30);
        assert_eq!(*cache.get_or_insert_with(&key, compute), 42);
        assert_eq!(*cache.get_or_insert_with(&key, compute), 42);
        assert_eq!(calls.get(), 1);

        let other = ("abc".to_string(), 31);
        cache.get_or_insert_with(&other, compute);
        assert_eq!(calls.get(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn failures_are_not_cached() {
        let cache: MemoCache<&'static str, u8> = MemoCache::new();

        let failed: Result<_, &str> = cache.get_or_try_insert_with(&"k", || Err("boom"));
        assert!(failed.is_err());
        assert_eq!(cache.len(), 0);

        let ok: Result<_, &str> = cache.get_or_try_insert_with(&"k", || Ok(7));
        assert_eq!(*ok.unwrap(), 7);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn first_insert_wins() {
        let cache: MemoCache<u8, &'static str> = MemoCache::new();
        let first = cache.get_or_insert_with(&1, || "first");
        let second = cache.get_or_insert_with(&1, || "second");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*second, "first");
    }
}
