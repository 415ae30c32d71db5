//! Animal lifecycle state machines.

use serde::{Deserialize, Serialize};

/// The lifecycle status of an animal.
///
/// State transitions:
/// ```text
/// Active ──┬──► Sold
///          ├──► Dead
///          └──► Slaughtered
/// ```
/// Active is the initial state; all others are terminal: no outgoing
/// transitions exist, and no further status-changing action may apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnimalStatus {
    /// Animal is on the farm, all actions apply.
    #[default]
    Active,

    /// Animal was sold (terminal state).
    Sold,

    /// Animal died (terminal state).
    Dead,

    /// Animal was slaughtered (terminal state).
    Slaughtered,
}

impl AnimalStatus {
    /// Returns true if a sale can be recorded in this status.
    pub fn can_sell(&self) -> bool {
        matches!(self, AnimalStatus::Active)
    }

    /// Returns true if a breeding event can be recorded in this status.
    pub fn can_breed(&self) -> bool {
        matches!(self, AnimalStatus::Active)
    }

    /// Returns true if this is a terminal status (no further transitions).
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AnimalStatus::Sold | AnimalStatus::Dead | AnimalStatus::Slaughtered
        )
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            AnimalStatus::Active => "active",
            AnimalStatus::Sold => "sold",
            AnimalStatus::Dead => "dead",
            AnimalStatus::Slaughtered => "slaughtered",
        }
    }
}

impl std::fmt::Display for AnimalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The reproduction status of an animal.
///
/// Available is the initial state. The cycle has no terminal state:
/// Available → Breeding → Pregnant → Lactating → Resting → Available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReproductionStatus {
    /// Available for breeding.
    #[default]
    Available,

    /// A breeding event was recorded.
    Breeding,

    /// Pregnancy confirmed.
    Pregnant,

    /// Nursing offspring after a birth.
    Lactating,

    /// Resting between cycles.
    Resting,
}

impl ReproductionStatus {
    /// Returns true if the animal counts toward expecting-mother stats.
    pub fn is_expecting(&self) -> bool {
        matches!(
            self,
            ReproductionStatus::Breeding | ReproductionStatus::Pregnant
        )
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReproductionStatus::Available => "available",
            ReproductionStatus::Breeding => "breeding",
            ReproductionStatus::Pregnant => "pregnant",
            ReproductionStatus::Lactating => "lactating",
            ReproductionStatus::Resting => "resting",
        }
    }
}

impl std::fmt::Display for ReproductionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
