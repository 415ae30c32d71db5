//! Append-only history ledger.
//!
//! Every state-changing action on the herd produces exactly one
//! [`HistoryEvent`]. Entries are immutable once appended: the only write
//! operations are [`Ledger::append`] and the cascading
//! [`Ledger::remove_for_animal`] invoked when an animal is permanently
//! removed. Display ordering is event date descending, insertion order as
//! tiebreak.

pub mod error;
pub mod event;
pub mod journal;
pub mod memory;
pub mod postgres;
pub mod query;

pub use common::EntityId;
pub use error::{LedgerError, Result};
pub use event::{EventKind, HistoryEvent, HistoryEventBuilder};
pub use journal::Ledger;
pub use memory::InMemoryLedger;
pub use postgres::PgLedger;
pub use query::LedgerQuery;
