use async_trait::async_trait;

use crate::{EntityId, HistoryEvent, LedgerQuery, Result};

/// Core trait for history ledger implementations.
///
/// The ledger is append-only: entries are never updated, and the only
/// delete path is the cascade invoked when an animal is permanently
/// removed. All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Appends an entry to the ledger.
    ///
    /// Assigns the insertion sequence number and returns the stored entry.
    /// The entry's id and date are taken as built (the builder generates
    /// defaults for both).
    async fn append(&self, event: HistoryEvent) -> Result<HistoryEvent>;

    /// Returns entries matching the query.
    ///
    /// Ordered by event date descending, insertion order as tiebreak.
    async fn list(&self, query: LedgerQuery) -> Result<Vec<HistoryEvent>>;

    /// Removes every entry for the given animal.
    ///
    /// Only called as part of cascading animal deletion. Returns the
    /// number of entries removed.
    async fn remove_for_animal(&self, animal_id: EntityId) -> Result<usize>;
}
