//! The animal record and its input types.

use chrono::{DateTime, NaiveDate, Utc};
use common::{EntityId, Money};
use serde::{Deserialize, Serialize};
use store::Stored;

use super::{AnimalStatus, ReproductionStatus, Species};

/// The sex of an animal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Returns true for female animals.
    pub fn is_female(&self) -> bool {
        matches!(self, Sex::Female)
    }

    /// Returns the sex name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An animal in the herd inventory.
///
/// `status` and `reproduction_status` are owned by the lifecycle service:
/// they change only as a side effect of recorded actions, never through a
/// plain field update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Animal {
    /// Unique animal identifier.
    pub id: EntityId,

    /// Species tag.
    pub species: Species,

    /// Breed within the species.
    pub breed: String,

    /// Sex of the animal.
    pub sex: Sex,

    /// Date of birth.
    pub birth_date: NaiveDate,

    /// Current weight in kilograms.
    pub weight_kg: f64,

    /// Optional display name.
    pub name: Option<String>,

    /// Free-form notes.
    pub notes: Option<String>,

    /// Lifecycle status. Terminal once sold/dead/slaughtered.
    pub status: AnimalStatus,

    /// Reproduction cycle status.
    pub reproduction_status: ReproductionStatus,

    /// Stamped when a sale is recorded.
    pub sale_date: Option<NaiveDate>,

    /// Stamped when a sale is recorded.
    pub sale_price: Option<Money>,

    /// When the animal was taken into the inventory.
    pub created_at: DateTime<Utc>,
}

impl Animal {
    /// Creates a new animal on intake with initial lifecycle state.
    pub fn new(fields: NewAnimal) -> Self {
        Self {
            id: EntityId::new(),
            species: fields.species,
            breed: fields.breed,
            sex: fields.sex,
            birth_date: fields.birth_date,
            weight_kg: fields.weight_kg,
            name: fields.name,
            notes: fields.notes,
            status: AnimalStatus::Active,
            reproduction_status: ReproductionStatus::Available,
            sale_date: None,
            sale_price: None,
            created_at: Utc::now(),
        }
    }

    /// Human-readable label for lists and ledger entries.
    ///
    /// Falls back to `"{species} #{last 4 chars of id}"` when the animal
    /// has no name.
    pub fn display_label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("{} #{}", self.species, self.id.short_code()),
        }
    }

    /// Returns true if the animal's status permits no further transitions.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

impl Stored for Animal {
    const COLLECTION: &'static str = "animals";

    fn id(&self) -> EntityId {
        self.id
    }
}

/// Fields for taking a new animal into the inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAnimal {
    pub species: Species,
    pub breed: String,
    pub sex: Sex,
    pub birth_date: NaiveDate,
    pub weight_kg: f64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Partial update of an animal's non-lifecycle fields.
///
/// A patch naming a `status` different from the current one is rejected;
/// lifecycle state changes only through recorded actions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnimalPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub breed: Option<String>,
    #[serde(default)]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: Option<AnimalStatus>,
    #[serde(default)]
    pub reproduction_status: Option<ReproductionStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_animal() -> NewAnimal {
        NewAnimal {
            species: Species::Poultry,
            breed: "Sussex".to_string(),
            sex: Sex::Female,
            birth_date: "2024-01-01".parse().unwrap(),
            weight_kg: 1.5,
            name: None,
            notes: None,
        }
    }

    #[test]
    fn test_new_animal_starts_active_and_available() {
        let animal = Animal::new(new_animal());
        assert_eq!(animal.status, AnimalStatus::Active);
        assert_eq!(animal.reproduction_status, ReproductionStatus::Available);
        assert!(animal.sale_date.is_none());
        assert!(animal.sale_price.is_none());
        assert!(!animal.is_terminal());
    }

    #[test]
    fn test_display_label_uses_name_when_present() {
        let mut fields = new_animal();
        fields.name = Some("Henrietta".to_string());
        let animal = Animal::new(fields);
        assert_eq!(animal.display_label(), "Henrietta");
    }

    #[test]
    fn test_display_label_falls_back_to_species_and_short_id() {
        let animal = Animal::new(new_animal());
        let expected = format!("poultry #{}", animal.id.short_code());
        assert_eq!(animal.display_label(), expected);
    }

    #[test]
    fn test_animal_serialization_roundtrip() {
        let animal = Animal::new(new_animal());
        let json = serde_json::to_string(&animal).unwrap();
        let back: Animal = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, animal.id);
        assert_eq!(back.status, AnimalStatus::Active);
        assert_eq!(back.species, Species::Poultry);
    }

    #[test]
    fn test_unknown_sex_rejected_at_boundary() {
        let result: Result<Sex, _> = serde_json::from_str("\"unknown\"");
        assert!(result.is_err());
    }
}
