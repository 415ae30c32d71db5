use thiserror::Error;

/// Errors that can occur when interacting with the ledger.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The backing ledger could not service the request.
    #[error("Ledger unavailable: {0}")]
    Unavailable(String),

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
