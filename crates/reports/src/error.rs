//! Report error types.

use thiserror::Error;

/// Errors that can occur while computing a report.
#[derive(Debug, Error)]
pub enum ReportsError {
    /// An error occurred in the entity store.
    #[error("Store error: {0}")]
    Store(#[from] store::StoreError),
}

/// Result type for report queries.
pub type Result<T> = std::result::Result<T, ReportsError>;
