//! Core collection trait for per-entity-type record stores.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{EntityId, Result};

/// Trait for records that live in a store collection.
///
/// Every stored record exposes its unique id and the name of the
/// collection it belongs to.
pub trait Stored: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Name of the collection this record type lives in.
    const COLLECTION: &'static str;

    /// Returns the record's unique identifier.
    fn id(&self) -> EntityId;
}

/// A flat record collection keyed by [`EntityId`].
///
/// All implementations must be thread-safe (Send + Sync). The trait is
/// object-safe so that a store bundle can hold `Arc<dyn Collection<T>>`
/// handles and tests can substitute failing doubles.
#[async_trait]
pub trait Collection<T: Stored>: Send + Sync {
    /// Point lookup by id. Returns None if the record doesn't exist.
    async fn get(&self, id: EntityId) -> Result<Option<T>>;

    /// Inserts a new record.
    ///
    /// Fails with `DuplicateId` if a record with the same id exists.
    async fn insert(&self, record: T) -> Result<()>;

    /// Replaces an existing record with an updated copy.
    ///
    /// Fails with `NotFound` if no record with that id exists. Partial
    /// updates are expressed as read-modify-replace by the caller.
    async fn replace(&self, record: T) -> Result<()>;

    /// Deletes a record. Returns true if a record was removed.
    async fn delete(&self, id: EntityId) -> Result<bool>;

    /// Returns every record in the collection.
    async fn all(&self) -> Result<Vec<T>>;

    /// Returns records matching the predicate.
    ///
    /// The default implementation filters `all()` client-side; backends
    /// may override with something smarter.
    async fn find(
        &self,
        predicate: &(dyn for<'a> Fn(&'a T) -> bool + Send + Sync),
    ) -> Result<Vec<T>> {
        let records = self.all().await?;
        Ok(records.into_iter().filter(|r| predicate(r)).collect())
    }
}
