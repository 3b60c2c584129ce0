use moka::sync::Cache;
use std::hash::Hash;
use std::sync::Arc;

/// In-process memo of successful replies, keyed by the exact request.
///
/// Entries never expire on their own. `clear` drops everything at once; callers
/// holding an `Arc` from an earlier `get` keep their value.
pub struct MemoStore<K, V> {
    cache: Cache<K, Arc<V>, ahash::RandomState>,
}

impl<K, V> MemoStore<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    /// `max_capacity = None` keeps every entry until `clear`.
    pub fn new(max_capacity: Option<u64>) -> Self {
        let mut builder = Cache::<K, Arc<V>>::builder();
        if let Some(capacity) = max_capacity {
            builder = builder.max_capacity(capacity.max(1));
        }
        Self {
            cache: builder.build_with_hasher(ahash::RandomState::new()),
        }
    }

    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        self.cache.get(key)
    }

    pub fn put(&self, key: K, value: Arc<V>) {
        self.cache.insert(key, value);
    }

    pub fn clear(&self) {
        self.cache.invalidate_all();
    }

    /// Number of live entries after flushing pending maintenance.
    pub fn len(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, V> Clone for MemoStore<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
        }
    }
}
