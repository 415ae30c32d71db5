//! Domain-event records: medical, reproduction, sale, and financial.

use chrono::{DateTime, NaiveDate, Utc};
use common::{EntityId, Money};
use serde::{Deserialize, Serialize};
use store::Stored;

/// The kind of a medical intervention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MedicalKind {
    Vaccination,
    Treatment,
    Checkup,
    Surgery,
    Other,
}

impl MedicalKind {
    /// Returns the kind name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            MedicalKind::Vaccination => "vaccination",
            MedicalKind::Treatment => "treatment",
            MedicalKind::Checkup => "checkup",
            MedicalKind::Surgery => "surgery",
            MedicalKind::Other => "other",
        }
    }
}

impl std::fmt::Display for MedicalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A medical intervention performed on an animal.
///
/// Immutable once created; removed only by the cascade when its animal
/// is permanently deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicalRecord {
    pub id: EntityId,
    pub animal_id: EntityId,
    pub kind: MedicalKind,
    pub description: String,
    pub veterinarian: Option<String>,
    pub cost: Option<Money>,
    /// When the intervention took place.
    pub date: NaiveDate,
    /// Reminder date for a follow-up visit.
    pub next_visit: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl Stored for MedicalRecord {
    const COLLECTION: &'static str = "medical_records";

    fn id(&self) -> EntityId {
        self.id
    }
}

/// Fields for recording a medical intervention.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMedicalRecord {
    pub animal_id: EntityId,
    pub kind: MedicalKind,
    pub description: String,
    #[serde(default)]
    pub veterinarian: Option<String>,
    #[serde(default)]
    pub cost: Option<Money>,
    /// Defaults to today when absent.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub next_visit: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// The kind of reproduction event a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BreedingEvent {
    #[default]
    Mating,
    Insemination,
    Birth,
    Weaning,
}

impl BreedingEvent {
    /// Returns the event name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            BreedingEvent::Mating => "mating",
            BreedingEvent::Insemination => "insemination",
            BreedingEvent::Birth => "birth",
            BreedingEvent::Weaning => "weaning",
        }
    }
}

impl std::fmt::Display for BreedingEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A reproduction record for a female animal.
///
/// Created open by a breeding event; closed when the birth outcome is
/// recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReproductionRecord {
    pub id: EntityId,
    /// The female animal this record belongs to.
    pub female_id: EntityId,
    /// Optional breeding partner.
    pub male_id: Option<EntityId>,
    pub event: BreedingEvent,
    pub breeding_date: NaiveDate,
    /// Projected from the breeding date unless explicitly supplied.
    pub expected_birth_date: Option<NaiveDate>,
    pub actual_birth_date: Option<NaiveDate>,
    pub live_offspring: Option<u32>,
    pub dead_offspring: Option<u32>,
    pub avg_offspring_weight_kg: Option<f64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ReproductionRecord {
    /// Returns true while no birth outcome has been recorded.
    pub fn is_open(&self) -> bool {
        self.actual_birth_date.is_none()
    }
}

impl Stored for ReproductionRecord {
    const COLLECTION: &'static str = "reproduction_records";

    fn id(&self) -> EntityId {
        self.id
    }
}

/// Fields for recording a breeding event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBreedingRecord {
    pub female_id: EntityId,
    #[serde(default)]
    pub male_id: Option<EntityId>,
    #[serde(default)]
    pub event: BreedingEvent,
    pub breeding_date: NaiveDate,
    /// Overrides the gestation projection when supplied.
    #[serde(default)]
    pub expected_birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// The outcome of a birth, applied to an open breeding record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BirthOutcome {
    pub live_offspring: u32,
    pub dead_offspring: u32,
    pub avg_weight_kg: f64,
    /// Defaults to today when absent.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// A sale of an animal.
///
/// Creating one is the trigger that transitions the animal to sold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleRecord {
    pub id: EntityId,
    pub animal_id: EntityId,
    pub price: Money,
    pub quantity: u32,
    pub buyer: Option<String>,
    pub buyer_contact: Option<String>,
    pub payment_method: Option<String>,
    pub sale_date: NaiveDate,
}

impl Stored for SaleRecord {
    const COLLECTION: &'static str = "sale_records";

    fn id(&self) -> EntityId {
        self.id
    }
}

/// Fields for recording a sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSale {
    pub animal_id: EntityId,
    pub price: Money,
    /// Defaults to 1 when absent.
    #[serde(default)]
    pub quantity: Option<u32>,
    #[serde(default)]
    pub buyer: Option<String>,
    #[serde(default)]
    pub buyer_contact: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    /// Defaults to today when absent.
    #[serde(default)]
    pub sale_date: Option<NaiveDate>,
}

/// Whether a financial record is money in or money out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Expense,
    Revenue,
}

impl TransactionKind {
    /// Returns the kind name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Expense => "expense",
            TransactionKind::Revenue => "revenue",
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The budget category of a financial record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionCategory {
    Feed,
    Care,
    Equipment,
    Sale,
    Other,
}

impl TransactionCategory {
    /// Returns the category name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionCategory::Feed => "feed",
            TransactionCategory::Care => "care",
            TransactionCategory::Equipment => "equipment",
            TransactionCategory::Sale => "sale",
            TransactionCategory::Other => "other",
        }
    }
}

impl std::fmt::Display for TransactionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A financial transaction, independent of the animal lifecycle.
///
/// Used only by the aggregation queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialRecord {
    pub id: EntityId,
    pub kind: TransactionKind,
    pub category: TransactionCategory,
    pub amount: Money,
    pub date: NaiveDate,
    pub animal_id: Option<EntityId>,
    pub description: String,
}

impl Stored for FinancialRecord {
    const COLLECTION: &'static str = "financial_records";

    fn id(&self) -> EntityId {
        self.id
    }
}

/// Fields for recording a financial transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFinancialRecord {
    pub kind: TransactionKind,
    pub category: TransactionCategory,
    pub amount: Money,
    /// Defaults to today when absent.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub animal_id: Option<EntityId>,
    pub description: String,
}
