use thiserror::Error;

use crate::EntityId;

/// Errors that can occur when interacting with a record collection.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The record was not found in the collection.
    #[error("Record not found in {collection}: {id}")]
    NotFound {
        collection: &'static str,
        id: EntityId,
    },

    /// A record with the same id already exists.
    #[error("Duplicate id in {collection}: {id}")]
    DuplicateId {
        collection: &'static str,
        id: EntityId,
    },

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backing store could not service the request.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
