//! Lifecycle and ledger consistency engine for the herd.
//!
//! This crate owns the non-trivial invariants of the system:
//! - Animal `status`/`reproduction_status` transitions happen only through
//!   recorded actions on [`LivestockService`]
//! - Every state-changing action appends exactly one history ledger entry
//! - Expected birth dates are projected from breeding dates using
//!   species-specific gestation periods
//!
//! The engine is handed its collaborators explicitly: a [`HerdStore`]
//! bundle of record collections and a [`ledger::Ledger`] implementation.
//! No ambient process-wide state is accessed, which is what makes the
//! failure-injection tests possible.

pub mod error;
pub mod herd;

pub use error::DomainError;
pub use herd::{
    Animal, AnimalPatch, AnimalStatus, BirthOutcome, BreedingEvent, CascadePolicy,
    FinancialRecord, HerdStore, LivestockService, MedicalKind, MedicalRecord, NewAnimal,
    NewBreedingRecord, NewFinancialRecord, NewMedicalRecord, NewSale, ReproductionRecord,
    ReproductionStatus, SaleRecord, Sex, Species, TransactionCategory, TransactionKind,
    project_birth_date,
};
