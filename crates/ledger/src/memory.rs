use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{EntityId, HistoryEvent, Ledger, LedgerQuery, Result};

/// In-memory ledger implementation.
///
/// Backs the default server and the test suites; provides the same
/// interface as the PostgreSQL implementation.
#[derive(Clone, Default)]
pub struct InMemoryLedger {
    entries: Arc<RwLock<Vec<HistoryEvent>>>,
    next_seq: Arc<AtomicU64>,
}

impl InMemoryLedger {
    /// Creates a new empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of entries stored.
    pub async fn entry_count(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Removes all entries.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

#[async_trait]
impl Ledger for InMemoryLedger {
    async fn append(&self, mut event: HistoryEvent) -> Result<HistoryEvent> {
        event.seq = self.next_seq.fetch_add(1, Ordering::SeqCst) + 1;

        let mut entries = self.entries.write().await;
        entries.push(event.clone());
        metrics::counter!("ledger_entries_appended").increment(1);

        Ok(event)
    }

    async fn list(&self, query: LedgerQuery) -> Result<Vec<HistoryEvent>> {
        let entries = self.entries.read().await;
        let mut matched: Vec<_> = entries
            .iter()
            .filter(|e| query.matches(e))
            .cloned()
            .collect();

        // Date descending, insertion order as tiebreak
        matched.sort_by(|a, b| b.date.cmp(&a.date).then(a.seq.cmp(&b.seq)));

        if let Some(limit) = query.limit {
            matched.truncate(limit);
        }

        Ok(matched)
    }

    async fn remove_for_animal(&self, animal_id: EntityId) -> Result<usize> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|e| e.animal_id != Some(animal_id));
        Ok(before - entries.len())
    }
}
