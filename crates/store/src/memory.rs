use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    EntityId, Result, StoreError,
    collection::{Collection, Stored},
};

/// In-memory record collection.
///
/// Backs the default server and the test suites; provides the same
/// interface as the PostgreSQL implementation.
#[derive(Clone)]
pub struct InMemoryCollection<T> {
    records: Arc<RwLock<HashMap<EntityId, T>>>,
}

impl<T: Stored> InMemoryCollection<T> {
    /// Creates a new empty collection.
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns the number of records stored.
    pub async fn count(&self) -> usize {
        self.records.read().await.len()
    }

    /// Removes all records.
    pub async fn clear(&self) {
        self.records.write().await.clear();
    }
}

impl<T: Stored> Default for InMemoryCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Stored> Collection<T> for InMemoryCollection<T> {
    async fn get(&self, id: EntityId) -> Result<Option<T>> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn insert(&self, record: T) -> Result<()> {
        let mut records = self.records.write().await;
        let id = record.id();
        if records.contains_key(&id) {
            return Err(StoreError::DuplicateId {
                collection: T::COLLECTION,
                id,
            });
        }
        records.insert(id, record);
        Ok(())
    }

    async fn replace(&self, record: T) -> Result<()> {
        let mut records = self.records.write().await;
        let id = record.id();
        if !records.contains_key(&id) {
            return Err(StoreError::NotFound {
                collection: T::COLLECTION,
                id,
            });
        }
        records.insert(id, record);
        Ok(())
    }

    async fn delete(&self, id: EntityId) -> Result<bool> {
        Ok(self.records.write().await.remove(&id).is_some())
    }

    async fn all(&self) -> Result<Vec<T>> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    async fn find(
        &self,
        predicate: &(dyn for<'a> Fn(&'a T) -> bool + Send + Sync),
    ) -> Result<Vec<T>> {
        let records = self.records.read().await;
        Ok(records.values().filter(|r| predicate(r)).cloned().collect())
    }
}
