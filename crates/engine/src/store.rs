//! Uniform interface over the key-value backend.
//!
//! The engine never talks to a backend directly; everything goes through
//! [`Store`]. The contract mirrors the backend's primitives: scalar
//! get/set, hash-field operations keyed by collection name, and
//! most-recent-first lists. Multi-key mutations go through [`Store::apply`],
//! which the backend must make atomic: either the whole batch lands or
//! none of it does.
//!
//! The adapter does not retry; retry/backoff belongs to the backend's
//! external configuration.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

/// Errors the backing store can report.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store unreachable: {0}")]
    Unavailable(String),
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

/// A single write inside an atomic batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WriteOp {
    HashSet {
        collection: String,
        id: String,
        value: String,
    },
    ListPushFront {
        key: String,
        value: String,
    },
}

/// Key-value store contract consumed by the repository.
#[async_trait]
pub trait Store: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    async fn hash_get(&self, collection: &str, id: &str) -> Result<Option<String>, StoreError>;

    async fn hash_set(&self, collection: &str, id: &str, value: &str) -> Result<(), StoreError>;

    /// Returns every `(id, value)` pair of a hash collection, in
    /// arbitrary iteration order.
    async fn hash_get_all(&self, collection: &str) -> Result<Vec<(String, String)>, StoreError>;

    async fn list_push_front(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Returns the full list, most recent first.
    async fn list_range(&self, key: &str) -> Result<Vec<String>, StoreError>;

    /// Applies every write in `batch` atomically.
    async fn apply(&self, batch: Vec<WriteOp>) -> Result<(), StoreError>;
}

#[derive(Default)]
struct Shelves {
    scalars: HashMap<String, String>,
    hashes: HashMap<String, HashMap<String, String>>,
    lists: HashMap<String, Vec<String>>,
}

/// In-process [`Store`] backend.
///
/// A single `RwLock` guards all shelves, so [`Store::apply`] batches are
/// atomic and isolated from concurrent readers.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Shelves>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let shelves = self.inner.read().await;
        Ok(shelves.scalars.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut shelves = self.inner.write().await;
        shelves.scalars.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn hash_get(&self, collection: &str, id: &str) -> Result<Option<String>, StoreError> {
        let shelves = self.inner.read().await;
        Ok(shelves
            .hashes
            .get(collection)
            .and_then(|fields| fields.get(id))
            .cloned())
    }

    async fn hash_set(&self, collection: &str, id: &str, value: &str) -> Result<(), StoreError> {
        let mut shelves = self.inner.write().await;
        shelves
            .hashes
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), value.to_string());
        Ok(())
    }

    async fn hash_get_all(&self, collection: &str) -> Result<Vec<(String, String)>, StoreError> {
        let shelves = self.inner.read().await;
        Ok(shelves
            .hashes
            .get(collection)
            .map(|fields| {
                fields
                    .iter()
                    .map(|(id, value)| (id.clone(), value.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn list_push_front(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut shelves = self.inner.write().await;
        shelves
            .lists
            .entry(key.to_string())
            .or_default()
            .insert(0, value.to_string());
        Ok(())
    }

    async fn list_range(&self, key: &str) -> Result<Vec<String>, StoreError> {
        let shelves = self.inner.read().await;
        Ok(shelves.lists.get(key).cloned().unwrap_or_default())
    }

    async fn apply(&self, batch: Vec<WriteOp>) -> Result<(), StoreError> {
        // One write guard for the whole batch keeps it atomic.
        let mut shelves = self.inner.write().await;
        for op in batch {
            match op {
                WriteOp::HashSet {
                    collection,
                    id,
                    value,
                } => {
                    shelves.hashes.entry(collection).or_default().insert(id, value);
                }
                WriteOp::ListPushFront { key, value } => {
                    shelves.lists.entry(key).or_default().insert(0, value);
                }
            }
        }
        Ok(())
    }
}
