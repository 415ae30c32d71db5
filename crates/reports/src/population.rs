//! Population statistics.

use domain::{Animal, HerdStore, Species};
use serde::Serialize;
use store::Collection;

use crate::Result;

/// Per-species population split.
#[derive(Debug, Clone, Serialize)]
pub struct SpeciesBreakdown {
    pub species: Species,
    pub count: u64,
    pub males: u64,
    pub females: u64,
}

/// Herd-wide population counts.
///
/// All counts except `sold` and `total_recorded` cover active animals only.
#[derive(Debug, Clone, Serialize)]
pub struct PopulationStats {
    /// Active animals across all species.
    pub total_active: u64,
    /// Active males.
    pub males: u64,
    /// Active females.
    pub females: u64,
    /// Active split per species, in a fixed species order.
    pub by_species: Vec<SpeciesBreakdown>,
    /// Active animals currently breeding or pregnant.
    pub expecting: u64,
    /// Animals whose status is sold.
    pub sold: u64,
    /// Every animal on record regardless of status.
    pub total_recorded: u64,
}

pub(crate) async fn population_stats(store: &HerdStore) -> Result<PopulationStats> {
    let animals = store.animals.all().await?;

    let active: Vec<&Animal> = animals.iter().filter(|a| !a.is_terminal()).collect();

    let by_species = [Species::Swine, Species::Poultry]
        .into_iter()
        .map(|species| {
            let of_species: Vec<_> = active.iter().filter(|a| a.species == species).collect();
            SpeciesBreakdown {
                species,
                count: of_species.len() as u64,
                males: of_species.iter().filter(|a| !a.sex.is_female()).count() as u64,
                females: of_species.iter().filter(|a| a.sex.is_female()).count() as u64,
            }
        })
        .collect();

    Ok(PopulationStats {
        total_active: active.len() as u64,
        males: active.iter().filter(|a| !a.sex.is_female()).count() as u64,
        females: active.iter().filter(|a| a.sex.is_female()).count() as u64,
        by_species,
        expecting: active
            .iter()
            .filter(|a| a.reproduction_status.is_expecting())
            .count() as u64,
        sold: animals
            .iter()
            .filter(|a| a.status == domain::AnimalStatus::Sold)
            .count() as u64,
        total_recorded: animals.len() as u64,
    })
}
