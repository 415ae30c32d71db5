//! Entity store bundle handed to the engine.

use std::sync::Arc;

use store::{Collection, InMemoryCollection};

use super::{Animal, FinancialRecord, MedicalRecord, ReproductionRecord, SaleRecord};

/// The full set of record collections the engine works against.
///
/// Passed explicitly into [`super::LivestockService`], never reached for
/// as ambient process-wide state, so tests can substitute any collection
/// with a double.
#[derive(Clone)]
pub struct HerdStore {
    pub animals: Arc<dyn Collection<Animal>>,
    pub medical: Arc<dyn Collection<MedicalRecord>>,
    pub reproduction: Arc<dyn Collection<ReproductionRecord>>,
    pub sales: Arc<dyn Collection<SaleRecord>>,
    pub financial: Arc<dyn Collection<FinancialRecord>>,
}

impl HerdStore {
    /// Creates a store backed by in-memory collections.
    pub fn in_memory() -> Self {
        Self {
            animals: Arc::new(InMemoryCollection::<Animal>::new()),
            medical: Arc::new(InMemoryCollection::<MedicalRecord>::new()),
            reproduction: Arc::new(InMemoryCollection::<ReproductionRecord>::new()),
            sales: Arc::new(InMemoryCollection::<SaleRecord>::new()),
            financial: Arc::new(InMemoryCollection::<FinancialRecord>::new()),
        }
    }
}
