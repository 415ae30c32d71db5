//! Lifecycle service: the single writer of animal lifecycle state.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use common::EntityId;
use ledger::{EventKind, HistoryEvent, Ledger, LedgerQuery};
use store::Collection;
use tokio::sync::Mutex;

use crate::error::{DomainError, Result};

use super::store::HerdStore;
use super::{
    Animal, AnimalPatch, AnimalStatus, BirthOutcome, FinancialRecord, MedicalRecord, NewAnimal,
    NewBreedingRecord, NewFinancialRecord, NewMedicalRecord, NewSale, ReproductionRecord,
    ReproductionStatus, SaleRecord, gestation::project_birth_date,
};

/// Whether deleting an animal also removes financial records that merely
/// reference it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CascadePolicy {
    /// Keep financial records; they are aggregation data, not lifecycle data.
    #[default]
    KeepFinancials,
    /// Remove financial records referencing the deleted animal too.
    All,
}

/// Service for managing the herd lifecycle.
///
/// Owns every mutation of `status` and `reproduction_status` and appends
/// one ledger entry per state-changing action. Each transition runs inside
/// a per-animal critical section so that the read-validate-write-append
/// sequence is atomic relative to other transitions on the same animal;
/// cross-animal operations take no shared lock.
pub struct LivestockService {
    store: HerdStore,
    ledger: Arc<dyn Ledger>,
    cascade: CascadePolicy,
    locks: Mutex<HashMap<EntityId, Arc<Mutex<()>>>>,
}

impl LivestockService {
    /// Creates a new service with the default cascade policy.
    pub fn new(store: HerdStore, ledger: Arc<dyn Ledger>) -> Self {
        Self::with_cascade(store, ledger, CascadePolicy::default())
    }

    /// Creates a new service with an explicit cascade policy.
    pub fn with_cascade(store: HerdStore, ledger: Arc<dyn Ledger>, cascade: CascadePolicy) -> Self {
        Self {
            store,
            ledger,
            cascade,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Returns a reference to the underlying store bundle.
    pub fn store(&self) -> &HerdStore {
        &self.store
    }

    /// Returns the per-animal transition lock, creating it on first use.
    async fn transition_lock(&self, id: EntityId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks
            .entry(id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    async fn load_animal(&self, id: EntityId) -> Result<Animal> {
        self.store
            .animals
            .get(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "animal",
                id,
            })
    }

    fn ledger_instant(date: NaiveDate) -> DateTime<Utc> {
        date.and_time(NaiveTime::MIN).and_utc()
    }

    // -- Intake and plain field access --

    /// Takes a new animal into the inventory.
    #[tracing::instrument(skip(self, fields))]
    pub async fn create_animal(&self, fields: NewAnimal) -> Result<Animal> {
        let animal = Animal::new(fields);
        self.store.animals.insert(animal.clone()).await?;
        metrics::counter!("herd_animals_created").increment(1);
        tracing::info!(animal_id = %animal.id, species = %animal.species, "animal created");
        Ok(animal)
    }

    /// Loads an animal by ID.
    #[tracing::instrument(skip(self))]
    pub async fn get_animal(&self, id: EntityId) -> Result<Animal> {
        self.load_animal(id).await
    }

    /// Lists all animals, oldest intake first.
    #[tracing::instrument(skip(self))]
    pub async fn list_animals(&self) -> Result<Vec<Animal>> {
        let mut animals = self.store.animals.all().await?;
        animals.sort_by_key(|a| a.created_at);
        Ok(animals)
    }

    /// Applies a partial update to an animal's non-lifecycle fields.
    ///
    /// A patch naming a status different from the current one is rejected:
    /// lifecycle state changes only through recorded actions, preserving
    /// ledger consistency.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update_animal(&self, id: EntityId, patch: AnimalPatch) -> Result<Animal> {
        let lock = self.transition_lock(id).await;
        let _guard = lock.lock().await;

        let mut animal = self.load_animal(id).await?;

        if let Some(status) = patch.status
            && status != animal.status
        {
            return Err(DomainError::InvalidState {
                action: "change status through a field update",
                state: animal.status.to_string(),
            });
        }

        if let Some(name) = patch.name {
            animal.name = Some(name);
        }
        if let Some(breed) = patch.breed {
            animal.breed = breed;
        }
        if let Some(weight_kg) = patch.weight_kg {
            animal.weight_kg = weight_kg;
        }
        if let Some(notes) = patch.notes {
            animal.notes = Some(notes);
        }
        if let Some(reproduction_status) = patch.reproduction_status {
            animal.reproduction_status = reproduction_status;
        }

        self.store.animals.replace(animal.clone()).await?;
        Ok(animal)
    }

    /// Permanently removes an animal and cascades to its dependents.
    ///
    /// Medical, reproduction, and sale records plus ledger entries go with
    /// the animal; financial records follow the configured
    /// [`CascadePolicy`].
    #[tracing::instrument(skip(self))]
    pub async fn delete_animal(&self, id: EntityId) -> Result<()> {
        let lock = self.transition_lock(id).await;
        let _guard = lock.lock().await;

        self.load_animal(id).await?;

        let medical = self
            .store
            .medical
            .find(&|r: &MedicalRecord| r.animal_id == id)
            .await?;
        for record in medical {
            self.store.medical.delete(record.id).await?;
        }

        let owned = self
            .store
            .reproduction
            .find(&|r: &ReproductionRecord| r.female_id == id)
            .await?;
        for record in owned {
            self.store.reproduction.delete(record.id).await?;
        }

        // Partner references are cleared, not cascaded: the female's
        // record must survive the partner's removal.
        let partnered = self
            .store
            .reproduction
            .find(&|r: &ReproductionRecord| r.male_id == Some(id))
            .await?;
        for mut record in partnered {
            record.male_id = None;
            self.store.reproduction.replace(record).await?;
        }

        let sales = self
            .store
            .sales
            .find(&|r: &SaleRecord| r.animal_id == id)
            .await?;
        for record in sales {
            self.store.sales.delete(record.id).await?;
        }

        if self.cascade == CascadePolicy::All {
            let financial = self
                .store
                .financial
                .find(&|r: &FinancialRecord| r.animal_id == Some(id))
                .await?;
            for record in financial {
                self.store.financial.delete(record.id).await?;
            }
        }

        self.ledger.remove_for_animal(id).await?;
        self.store.animals.delete(id).await?;

        self.locks.lock().await.remove(&id);
        tracing::info!(animal_id = %id, "animal deleted with cascade");
        Ok(())
    }

    // -- Recorded actions (state transitions + ledger entries) --

    /// Records a sale, transitioning the animal to sold.
    #[tracing::instrument(skip(self, fields))]
    pub async fn record_sale(&self, fields: NewSale) -> Result<SaleRecord> {
        let animal_id = fields.animal_id;
        let lock = self.transition_lock(animal_id).await;
        let _guard = lock.lock().await;

        let mut animal = self.load_animal(animal_id).await?;
        if !animal.status.can_sell() {
            return Err(DomainError::InvalidState {
                action: "record sale",
                state: animal.status.to_string(),
            });
        }

        let sale_date = fields
            .sale_date
            .unwrap_or_else(|| Utc::now().date_naive());
        let sale = SaleRecord {
            id: EntityId::new(),
            animal_id,
            price: fields.price,
            quantity: fields.quantity.unwrap_or(1),
            buyer: fields.buyer,
            buyer_contact: fields.buyer_contact,
            payment_method: fields.payment_method,
            sale_date,
        };
        self.store.sales.insert(sale.clone()).await?;

        animal.status = AnimalStatus::Sold;
        animal.sale_date = Some(sale_date);
        animal.sale_price = Some(fields.price);
        self.store.animals.replace(animal.clone()).await?;

        let entry = HistoryEvent::builder()
            .animal_id(animal_id)
            .kind(EventKind::Sale)
            .title(format!("Sale of {}", animal.display_label()))
            .description(match &sale.buyer {
                Some(buyer) => format!("Sold to {buyer}"),
                None => "Sold".to_string(),
            })
            .date(Self::ledger_instant(sale_date))
            .cost(fields.price)
            .metadata("sale_id", serde_json::json!(sale.id.to_string()))
            .build();
        self.ledger
            .append(entry)
            .await
            .map_err(|source| DomainError::LedgerInconsistency {
                animal_id,
                action: "record sale",
                source,
            })?;

        metrics::counter!("herd_sales_recorded").increment(1);
        tracing::info!(animal_id = %animal_id, price = %fields.price, "sale recorded");
        Ok(sale)
    }

    /// Records a breeding event for a female animal.
    ///
    /// The expected birth date is projected from the breeding date via the
    /// species gestation period unless explicitly supplied.
    #[tracing::instrument(skip(self, fields))]
    pub async fn record_breeding(&self, fields: NewBreedingRecord) -> Result<ReproductionRecord> {
        let female_id = fields.female_id;
        let lock = self.transition_lock(female_id).await;
        let _guard = lock.lock().await;

        let mut female = self.load_animal(female_id).await?;
        if !female.sex.is_female() {
            return Err(DomainError::InvalidSex {
                action: "record breeding event",
                animal_id: female_id,
                sex: female.sex,
            });
        }
        if !female.status.can_breed() {
            return Err(DomainError::InvalidState {
                action: "record breeding event",
                state: female.status.to_string(),
            });
        }
        if let Some(male_id) = fields.male_id
            && self.store.animals.get(male_id).await?.is_none()
        {
            return Err(DomainError::InvalidReference {
                entity: "animal",
                id: male_id,
            });
        }

        let expected = match fields.expected_birth_date {
            Some(date) => date,
            None => project_birth_date(fields.breeding_date, female.species)?,
        };
        let record = ReproductionRecord {
            id: EntityId::new(),
            female_id,
            male_id: fields.male_id,
            event: fields.event,
            breeding_date: fields.breeding_date,
            expected_birth_date: Some(expected),
            actual_birth_date: None,
            live_offspring: None,
            dead_offspring: None,
            avg_offspring_weight_kg: None,
            notes: fields.notes,
            created_at: Utc::now(),
        };
        self.store.reproduction.insert(record.clone()).await?;

        female.reproduction_status = ReproductionStatus::Breeding;
        self.store.animals.replace(female.clone()).await?;

        let entry = HistoryEvent::builder()
            .animal_id(female_id)
            .kind(EventKind::Reproduction)
            .title(format!("Breeding recorded for {}", female.display_label()))
            .description(format!("Expected birth on {expected}"))
            .date(Self::ledger_instant(fields.breeding_date))
            .metadata("reproduction_id", serde_json::json!(record.id.to_string()))
            .build();
        self.ledger
            .append(entry)
            .await
            .map_err(|source| DomainError::LedgerInconsistency {
                animal_id: female_id,
                action: "record breeding event",
                source,
            })?;

        metrics::counter!("herd_breedings_recorded").increment(1);
        Ok(record)
    }

    /// Records the birth outcome on an open breeding record.
    #[tracing::instrument(skip(self, outcome))]
    pub async fn record_birth(
        &self,
        breeding_id: EntityId,
        outcome: BirthOutcome,
    ) -> Result<ReproductionRecord> {
        let mut record = self
            .store
            .reproduction
            .get(breeding_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "reproduction record",
                id: breeding_id,
            })?;
        if !record.is_open() {
            return Err(DomainError::InvalidState {
                action: "record birth",
                state: "closed breeding record".to_string(),
            });
        }

        let birth_date = outcome.date.unwrap_or_else(|| Utc::now().date_naive());
        if birth_date < record.breeding_date {
            return Err(DomainError::InvalidDate {
                reason: format!(
                    "birth date {birth_date} precedes breeding date {}",
                    record.breeding_date
                ),
            });
        }

        let female_id = record.female_id;
        let lock = self.transition_lock(female_id).await;
        let _guard = lock.lock().await;

        let mut female = self.load_animal(female_id).await?;

        record.actual_birth_date = Some(birth_date);
        record.live_offspring = Some(outcome.live_offspring);
        record.dead_offspring = Some(outcome.dead_offspring);
        record.avg_offspring_weight_kg = Some(outcome.avg_weight_kg);
        self.store.reproduction.replace(record.clone()).await?;

        female.reproduction_status = ReproductionStatus::Lactating;
        self.store.animals.replace(female.clone()).await?;

        let entry = HistoryEvent::builder()
            .animal_id(female_id)
            .kind(EventKind::Birth)
            .title(format!("Birth for {}", female.display_label()))
            .description(format!(
                "{} live, {} dead offspring",
                outcome.live_offspring, outcome.dead_offspring
            ))
            .date(Self::ledger_instant(birth_date))
            .metadata("reproduction_id", serde_json::json!(record.id.to_string()))
            .build();
        self.ledger
            .append(entry)
            .await
            .map_err(|source| DomainError::LedgerInconsistency {
                animal_id: female_id,
                action: "record birth",
                source,
            })?;

        metrics::counter!("herd_births_recorded").increment(1);
        Ok(record)
    }

    /// Records a medical intervention.
    ///
    /// Never changes `status` or `reproduction_status`; applies to animals
    /// in any status.
    #[tracing::instrument(skip(self, fields))]
    pub async fn record_medical(&self, fields: NewMedicalRecord) -> Result<MedicalRecord> {
        let animal_id = fields.animal_id;
        let animal = self.load_animal(animal_id).await?;

        let date = fields.date.unwrap_or_else(|| Utc::now().date_naive());
        if let Some(next_visit) = fields.next_visit
            && next_visit < date
        {
            return Err(DomainError::InvalidDate {
                reason: format!("next visit {next_visit} precedes intervention date {date}"),
            });
        }

        let record = MedicalRecord {
            id: EntityId::new(),
            animal_id,
            kind: fields.kind,
            description: fields.description,
            veterinarian: fields.veterinarian,
            cost: fields.cost,
            date,
            next_visit: fields.next_visit,
            notes: fields.notes,
        };
        self.store.medical.insert(record.clone()).await?;

        let mut builder = HistoryEvent::builder()
            .animal_id(animal_id)
            .kind(EventKind::Medical)
            .title(format!("{} for {}", record.kind, animal.display_label()))
            .description(record.description.clone())
            .date(Self::ledger_instant(date))
            .metadata("medical_id", serde_json::json!(record.id.to_string()));
        if let Some(cost) = record.cost {
            builder = builder.cost(cost);
        }
        self.ledger
            .append(builder.build())
            .await
            .map_err(|source| DomainError::LedgerInconsistency {
                animal_id,
                action: "record medical intervention",
                source,
            })?;

        metrics::counter!("herd_medical_recorded").increment(1);
        Ok(record)
    }

    /// Records a financial transaction.
    ///
    /// Aggregation-only data: no lifecycle effect and no ledger entry.
    #[tracing::instrument(skip(self, fields))]
    pub async fn record_financial(&self, fields: NewFinancialRecord) -> Result<FinancialRecord> {
        if let Some(animal_id) = fields.animal_id
            && self.store.animals.get(animal_id).await?.is_none()
        {
            return Err(DomainError::InvalidReference {
                entity: "animal",
                id: animal_id,
            });
        }

        let record = FinancialRecord {
            id: EntityId::new(),
            kind: fields.kind,
            category: fields.category,
            amount: fields.amount,
            date: fields.date.unwrap_or_else(|| Utc::now().date_naive()),
            animal_id: fields.animal_id,
            description: fields.description,
        };
        self.store.financial.insert(record.clone()).await?;
        Ok(record)
    }

    // -- Listings --

    /// Returns the history feed, herd-wide or scoped to one animal.
    ///
    /// Ordered by event date descending, insertion order as tiebreak.
    #[tracing::instrument(skip(self))]
    pub async fn list_history(&self, animal_id: Option<EntityId>) -> Result<Vec<HistoryEvent>> {
        let query = match animal_id {
            Some(id) => {
                self.load_animal(id).await?;
                LedgerQuery::for_animal(id)
            }
            None => LedgerQuery::new(),
        };
        Ok(self.ledger.list(query).await?)
    }

    /// Returns an animal's medical records, most recent first.
    #[tracing::instrument(skip(self))]
    pub async fn list_medical(&self, animal_id: EntityId) -> Result<Vec<MedicalRecord>> {
        self.load_animal(animal_id).await?;
        let mut records = self
            .store
            .medical
            .find(&|r: &MedicalRecord| r.animal_id == animal_id)
            .await?;
        records.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(records)
    }

    /// Returns reproduction records an animal appears in, most recent first.
    #[tracing::instrument(skip(self))]
    pub async fn list_reproduction(&self, animal_id: EntityId) -> Result<Vec<ReproductionRecord>> {
        self.load_animal(animal_id).await?;
        let mut records = self
            .store
            .reproduction
            .find(&|r: &ReproductionRecord| {
                r.female_id == animal_id || r.male_id == Some(animal_id)
            })
            .await?;
        records.sort_by(|a, b| b.breeding_date.cmp(&a.breeding_date));
        Ok(records)
    }
}
