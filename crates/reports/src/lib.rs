//! Read-side aggregation queries over the herd collections.
//!
//! Three query families, each a synchronous pull-based scan with in-memory
//! reduction (a small farm's inventories stay small):
//! - population statistics ([`PopulationStats`])
//! - financial summaries over an inclusive date range ([`FinancialSummary`])
//! - forward-looking reminder windows ([`Reminder`])
//!
//! Herd-wide queries never fail on empty collections; they return
//! zero-valued aggregates.

pub mod error;
pub mod financial;
pub mod population;
pub mod reminders;

use chrono::NaiveDate;
use domain::HerdStore;

pub use error::{ReportsError, Result};
pub use financial::{CategoryTotal, DateRange, FinancialSummary};
pub use population::{PopulationStats, SpeciesBreakdown};
pub use reminders::{AnimalSummary, Reminder, ReminderKind};

/// Aggregation engine over a herd store.
///
/// Stateless: every query is computed on demand from the collections.
#[derive(Clone)]
pub struct ReportsEngine {
    store: HerdStore,
}

impl ReportsEngine {
    /// Creates a new engine over the given store bundle.
    pub fn new(store: HerdStore) -> Self {
        Self { store }
    }

    /// Computes population statistics for the herd.
    #[tracing::instrument(skip(self))]
    pub async fn population_stats(&self) -> Result<PopulationStats> {
        population::population_stats(&self.store).await
    }

    /// Sums financial records whose date falls in the inclusive range.
    #[tracing::instrument(skip(self))]
    pub async fn financial_summary(&self, range: DateRange) -> Result<FinancialSummary> {
        financial::financial_summary(&self.store, range).await
    }

    /// Returns medical follow-ups and expected births due within
    /// `[today, today + window_days]`, ascending by due date.
    #[tracing::instrument(skip(self))]
    pub async fn upcoming_reminders(
        &self,
        today: NaiveDate,
        window_days: u32,
    ) -> Result<Vec<Reminder>> {
        reminders::upcoming_reminders(&self.store, today, window_days).await
    }
}
