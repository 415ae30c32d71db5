//! Forward-looking reminder windows.

use chrono::{Days, NaiveDate};
use common::EntityId;
use domain::{Animal, HerdStore, MedicalRecord, ReproductionRecord, Species};
use serde::Serialize;
use store::Collection;

use crate::Result;

/// What kind of due date a reminder surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderKind {
    MedicalFollowUp,
    ExpectedBirth,
}

/// Denormalized summary of a reminder's subject animal.
#[derive(Debug, Clone, Serialize)]
pub struct AnimalSummary {
    pub id: EntityId,
    /// Display name, falling back to `"{species} #{short id}"`.
    pub label: String,
    pub breed: String,
    pub species: Species,
}

impl AnimalSummary {
    fn of(animal: &Animal) -> Self {
        Self {
            id: animal.id,
            label: animal.display_label(),
            breed: animal.breed.clone(),
            species: animal.species,
        }
    }
}

/// A due date inside the reminder window.
#[derive(Debug, Clone, Serialize)]
pub struct Reminder {
    pub due: NaiveDate,
    pub kind: ReminderKind,
    /// The medical or reproduction record the reminder came from.
    pub record_id: EntityId,
    pub animal: AnimalSummary,
    pub description: String,
}

pub(crate) async fn upcoming_reminders(
    store: &HerdStore,
    today: NaiveDate,
    window_days: u32,
) -> Result<Vec<Reminder>> {
    let window_end = today
        .checked_add_days(Days::new(window_days as u64))
        .unwrap_or(NaiveDate::MAX);
    let in_window = |date: NaiveDate| today <= date && date <= window_end;

    let mut reminders = Vec::new();

    let medical = store
        .medical
        .find(&|r: &MedicalRecord| r.next_visit.is_some_and(in_window))
        .await?;
    for record in medical {
        let Some(due) = record.next_visit else {
            continue;
        };
        if let Some(animal) = store.animals.get(record.animal_id).await? {
            reminders.push(Reminder {
                due,
                kind: ReminderKind::MedicalFollowUp,
                record_id: record.id,
                animal: AnimalSummary::of(&animal),
                description: record.description.clone(),
            });
        }
    }

    let expecting = store
        .reproduction
        .find(&|r: &ReproductionRecord| {
            r.is_open() && r.expected_birth_date.is_some_and(in_window)
        })
        .await?;
    for record in expecting {
        let Some(due) = record.expected_birth_date else {
            continue;
        };
        if let Some(animal) = store.animals.get(record.female_id).await? {
            reminders.push(Reminder {
                due,
                kind: ReminderKind::ExpectedBirth,
                record_id: record.id,
                animal: AnimalSummary::of(&animal),
                description: format!("Expected birth for {}", animal.display_label()),
            });
        }
    }

    reminders.sort_by(|a, b| a.due.cmp(&b.due));
    Ok(reminders)
}
