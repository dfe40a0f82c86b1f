use crate::error::store_error::StoreError;
use std::borrow::Borrow;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

struct TableInner<K, V> {
    rows: BTreeMap<K, V>,
    next_id: i64,
}

/// A keyed in-memory table. Reads share the lock; every mutation, including
/// compare-and-set style updates, runs under the single write lock.
pub struct MemoryTable<K, V> {
    inner: RwLock<TableInner<K, V>>,
}

impl<K, V> Default for MemoryTable<K, V> {
    fn default() -> Self {
        Self {
            inner: RwLock::new(TableInner {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl<K, V> MemoryTable<K, V>
where
    K: Ord + Clone + Send + Sync,
    V: Clone + Send + Sync,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts under `key`, handing `build` the next row id.
    pub async fn insert_with(&self, key: K, build: impl FnOnce(i64) -> V) -> Result<V, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.rows.contains_key(&key) {
            return Err(StoreError::Duplicate);
        }
        let id = inner.next_id;
        inner.next_id += 1;
        let value = build(id);
        inner.rows.insert(key, value.clone());
        Ok(value)
    }

    pub async fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.read().await.rows.get(key).cloned()
    }

    pub async fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.read().await.rows.contains_key(key)
    }

    /// Runs `apply` against the row under the write lock. A missing row is
    /// `NotFound`; an error from `apply` leaves the row as `apply` left it.
    pub async fn update<Q, T>(&self, key: &Q, apply: impl FnOnce(&mut V) -> Result<T, StoreError>) -> Result<T, StoreError>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut inner = self.inner.write().await;
        let row = inner.rows.get_mut(key).ok_or(StoreError::NotFound)?;
        apply(row)
    }

    pub async fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.write().await.rows.remove(key)
    }

    /// Snapshot of every row in key order.
    pub async fn values(&self) -> Vec<V> {
        self.inner.read().await.rows.values().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl<V> MemoryTable<i64, V>
where
    V: Clone + Send + Sync,
{
    /// Inserts a row keyed by its freshly allocated id.
    pub async fn insert_next(&self, build: impl FnOnce(i64) -> V) -> V {
        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        inner.next_id += 1;
        let value = build(id);
        inner.rows.insert(id, value.clone());
        value
    }
}
