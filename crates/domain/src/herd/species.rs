//! Species tags and their gestation constants.

use serde::{Deserialize, Serialize};

/// The species an animal belongs to.
///
/// A closed set: unknown species strings are rejected when the value is
/// constructed or deserialized, never deep inside transition logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Swine,
    Poultry,
}

impl Species {
    /// Days between mating and expected birth for this species.
    pub fn gestation_days(&self) -> u64 {
        match self {
            Species::Swine => 114,
            Species::Poultry => 21,
        }
    }

    /// Returns the species name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Species::Swine => "swine",
            Species::Poultry => "poultry",
        }
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Species {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "swine" => Ok(Species::Swine),
            "poultry" => Ok(Species::Poultry),
            other => Err(format!("unknown species: {other}")),
        }
    }
}
