use chrono::{DateTime, Utc};

use crate::{EntityId, event::EventKind};

/// Builder for constructing ledger queries.
///
/// Allows filtering entries by subject animal, event kind, and date range.
/// Results are always ordered by event date descending, insertion order
/// as tiebreak.
#[derive(Debug, Clone, Default)]
pub struct LedgerQuery {
    /// Filter by subject animal ID.
    pub animal_id: Option<EntityId>,

    /// Filter by event kind.
    pub kind: Option<EventKind>,

    /// Filter by entries on or after this instant.
    pub from: Option<DateTime<Utc>>,

    /// Filter by entries on or before this instant.
    pub to: Option<DateTime<Utc>>,

    /// Maximum number of entries to return.
    pub limit: Option<usize>,
}

impl LedgerQuery {
    /// Creates a new empty query (the full herd-wide feed).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a query scoped to a specific animal.
    pub fn for_animal(animal_id: EntityId) -> Self {
        Self {
            animal_id: Some(animal_id),
            ..Default::default()
        }
    }

    /// Filters by event kind.
    pub fn kind(mut self, kind: EventKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Filters by entries on or after this instant (inclusive).
    pub fn from(mut self, from: DateTime<Utc>) -> Self {
        self.from = Some(from);
        self
    }

    /// Filters by entries on or before this instant (inclusive).
    pub fn to(mut self, to: DateTime<Utc>) -> Self {
        self.to = Some(to);
        self
    }

    /// Limits the number of entries returned.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns true if the entry passes every filter in this query.
    pub fn matches(&self, event: &crate::HistoryEvent) -> bool {
        if let Some(id) = self.animal_id
            && event.animal_id != Some(id)
        {
            return false;
        }
        if let Some(kind) = self.kind
            && event.kind != kind
        {
            return false;
        }
        if let Some(from) = self.from
            && event.date < from
        {
            return false;
        }
        if let Some(to) = self.to
            && event.date > to
        {
            return false;
        }
        true
    }
}
