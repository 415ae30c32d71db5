//! Domain error types.

use common::EntityId;
use ledger::LedgerError;
use store::StoreError;
use thiserror::Error;

use crate::herd::Sex;

/// Errors that can occur during domain operations.
///
/// All variants are recoverable at the caller boundary and carry a
/// descriptive, user-facing message.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The referenced record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: EntityId },

    /// A secondary reference (e.g. a breeding partner) does not exist.
    #[error("Referenced {entity} does not exist: {id}")]
    InvalidReference { entity: &'static str, id: EntityId },

    /// The action is not permitted in the current state.
    #[error("Cannot {action}: current state is {state}")]
    InvalidState { action: &'static str, state: String },

    /// A breeding action was applied to a non-female primary animal.
    #[error("Cannot {action}: animal {animal_id} is {sex}")]
    InvalidSex {
        action: &'static str,
        animal_id: EntityId,
        sex: Sex,
    },

    /// A date is malformed or logically impossible.
    #[error("Invalid date: {reason}")]
    InvalidDate { reason: String },

    /// The entity write succeeded but the ledger append failed.
    ///
    /// The system is left with a state change that has no audit trail;
    /// the operator must reconcile. Never silently swallowed.
    #[error("Ledger append failed after updating animal {animal_id} during {action}: {source}")]
    LedgerInconsistency {
        animal_id: EntityId,
        action: &'static str,
        #[source]
        source: LedgerError,
    },

    /// An error occurred in the entity store.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// An error occurred in the ledger before any entity write.
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

/// Result type for domain operations.
pub type Result<T> = std::result::Result<T, DomainError>;
