//! Integration tests for the lifecycle engine.

use std::sync::Arc;

use async_trait::async_trait;
use common::{EntityId, Money};
use domain::{
    AnimalPatch, AnimalStatus, BirthOutcome, BreedingEvent, CascadePolicy, DomainError, HerdStore,
    LivestockService, MedicalKind, NewAnimal, NewBreedingRecord, NewFinancialRecord,
    NewMedicalRecord, NewSale, ReproductionStatus, Sex, Species, TransactionCategory,
    TransactionKind,
};
use ledger::{EventKind, HistoryEvent, InMemoryLedger, Ledger, LedgerError, LedgerQuery};
use store::Collection;

fn service() -> LivestockService {
    LivestockService::new(HerdStore::in_memory(), Arc::new(InMemoryLedger::new()))
}

fn hen(name: Option<&str>) -> NewAnimal {
    NewAnimal {
        species: Species::Poultry,
        breed: "Sussex".to_string(),
        sex: Sex::Female,
        birth_date: "2023-11-01".parse().unwrap(),
        weight_kg: 1.5,
        name: name.map(String::from),
        notes: None,
    }
}

fn sale_of(animal_id: EntityId) -> NewSale {
    NewSale {
        animal_id,
        price: Money::from_cents(50_000),
        quantity: None,
        buyer: None,
        buyer_contact: None,
        payment_method: None,
        sale_date: Some("2024-02-10".parse().unwrap()),
    }
}

/// A ledger that refuses every append, for forcing the partial-failure
/// path after a successful entity write.
struct FailingLedger;

#[async_trait]
impl Ledger for FailingLedger {
    async fn append(&self, _event: HistoryEvent) -> ledger::Result<HistoryEvent> {
        Err(LedgerError::Unavailable("append rejected".to_string()))
    }

    async fn list(&self, _query: LedgerQuery) -> ledger::Result<Vec<HistoryEvent>> {
        Ok(vec![])
    }

    async fn remove_for_animal(&self, _animal_id: EntityId) -> ledger::Result<usize> {
        Ok(0)
    }
}

#[tokio::test]
async fn breeding_to_birth_end_to_end() {
    let service = service();
    let a = service.create_animal(hen(None)).await.unwrap();
    assert_eq!(a.status, AnimalStatus::Active);

    // Breeding on 2024-01-01 projects the poultry gestation period
    let record = service
        .record_breeding(NewBreedingRecord {
            female_id: a.id,
            male_id: None,
            event: BreedingEvent::Mating,
            breeding_date: "2024-01-01".parse().unwrap(),
            expected_birth_date: None,
            notes: None,
        })
        .await
        .unwrap();
    assert_eq!(
        record.expected_birth_date,
        Some("2024-01-22".parse().unwrap())
    );
    let a = service.get_animal(a.id).await.unwrap();
    assert_eq!(a.reproduction_status, ReproductionStatus::Breeding);

    // Birth outcome closes the record and moves the female to lactating
    let closed = service
        .record_birth(
            record.id,
            BirthOutcome {
                live_offspring: 5,
                dead_offspring: 1,
                avg_weight_kg: 0.04,
                date: Some("2024-01-21".parse().unwrap()),
            },
        )
        .await
        .unwrap();
    assert_eq!(closed.live_offspring, Some(5));
    assert_eq!(closed.dead_offspring, Some(1));

    let a = service.get_animal(a.id).await.unwrap();
    assert_eq!(a.reproduction_status, ReproductionStatus::Lactating);

    // Two ledger entries for the animal, [breeding, birth] in date order
    let mut history = service.list_history(Some(a.id)).await.unwrap();
    assert_eq!(history.len(), 2);
    history.reverse(); // feed is date-descending; check ascending pair
    assert_eq!(history[0].kind, EventKind::Reproduction);
    assert_eq!(history[1].kind, EventKind::Birth);
    assert!(history[0].date <= history[1].date);
}

#[tokio::test]
async fn racing_sales_apply_exactly_once() {
    let service = Arc::new(service());
    let animal = service.create_animal(hen(None)).await.unwrap();

    let (first, second) = tokio::join!(
        service.record_sale(sale_of(animal.id)),
        service.record_sale(sale_of(animal.id)),
    );

    let outcomes = [first.is_ok(), second.is_ok()];
    assert_eq!(
        outcomes.iter().filter(|ok| **ok).count(),
        1,
        "exactly one sale must win the race"
    );
    for result in [first, second] {
        if let Err(err) = result {
            assert!(matches!(err, DomainError::InvalidState { .. }));
        }
    }

    let history = service.list_history(Some(animal.id)).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].kind, EventKind::Sale);
}

#[tokio::test]
async fn ledger_failure_after_entity_write_is_surfaced() {
    let service = LivestockService::new(HerdStore::in_memory(), Arc::new(FailingLedger));
    let animal = service.create_animal(hen(None)).await.unwrap();

    let result = service.record_sale(sale_of(animal.id)).await;
    match result {
        Err(DomainError::LedgerInconsistency {
            animal_id, action, ..
        }) => {
            assert_eq!(animal_id, animal.id);
            assert_eq!(action, "record sale");
        }
        other => panic!("expected LedgerInconsistency, got {other:?}"),
    }

    // The entity write is not silently rolled back; the error is the signal
    let sold = service.get_animal(animal.id).await.unwrap();
    assert_eq!(sold.status, AnimalStatus::Sold);
}

#[tokio::test]
async fn delete_cascades_to_dependent_records() {
    let service = service();
    let female = service.create_animal(hen(Some("Henrietta"))).await.unwrap();
    let other = service.create_animal(hen(None)).await.unwrap();

    service
        .record_medical(NewMedicalRecord {
            animal_id: female.id,
            kind: MedicalKind::Vaccination,
            description: "Newcastle vaccine".to_string(),
            veterinarian: None,
            cost: Some(Money::from_cents(2_500)),
            date: Some("2024-01-05".parse().unwrap()),
            next_visit: None,
            notes: None,
        })
        .await
        .unwrap();
    service
        .record_breeding(NewBreedingRecord {
            female_id: female.id,
            male_id: None,
            event: BreedingEvent::Mating,
            breeding_date: "2024-01-10".parse().unwrap(),
            expected_birth_date: None,
            notes: None,
        })
        .await
        .unwrap();
    service
        .record_medical(NewMedicalRecord {
            animal_id: other.id,
            kind: MedicalKind::Checkup,
            description: "Routine".to_string(),
            veterinarian: None,
            cost: None,
            date: Some("2024-01-06".parse().unwrap()),
            next_visit: None,
            notes: None,
        })
        .await
        .unwrap();

    service.delete_animal(female.id).await.unwrap();

    // Animal-scoped queries now report NotFound, never orphaned records
    assert!(matches!(
        service.get_animal(female.id).await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(matches!(
        service.list_history(Some(female.id)).await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(matches!(
        service.list_medical(female.id).await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(matches!(
        service.list_reproduction(female.id).await,
        Err(DomainError::NotFound { .. })
    ));

    // The herd-wide feed no longer mentions the deleted animal
    let feed = service.list_history(None).await.unwrap();
    assert!(feed.iter().all(|e| e.animal_id != Some(female.id)));

    // The other animal's records are untouched
    assert_eq!(service.list_medical(other.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn delete_clears_partner_references_without_dropping_records() {
    let service = service();
    let female = service.create_animal(hen(None)).await.unwrap();
    let male = service
        .create_animal(NewAnimal {
            sex: Sex::Male,
            ..hen(None)
        })
        .await
        .unwrap();

    let record = service
        .record_breeding(NewBreedingRecord {
            female_id: female.id,
            male_id: Some(male.id),
            event: BreedingEvent::Mating,
            breeding_date: "2024-01-10".parse().unwrap(),
            expected_birth_date: None,
            notes: None,
        })
        .await
        .unwrap();

    service.delete_animal(male.id).await.unwrap();

    let records = service.list_reproduction(female.id).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, record.id);
    assert!(records[0].male_id.is_none());
}

#[tokio::test]
async fn financial_records_survive_default_cascade() {
    let service = service();
    let animal = service.create_animal(hen(None)).await.unwrap();

    service
        .record_financial(NewFinancialRecord {
            kind: TransactionKind::Expense,
            category: TransactionCategory::Care,
            amount: Money::from_cents(2_500),
            date: Some("2024-01-05".parse().unwrap()),
            animal_id: Some(animal.id),
            description: "Vaccine".to_string(),
        })
        .await
        .unwrap();

    service.delete_animal(animal.id).await.unwrap();

    let remaining = service.store().financial.all().await.unwrap();
    assert_eq!(remaining.len(), 1);
}

#[tokio::test]
async fn financial_records_removed_under_full_cascade() {
    let service = LivestockService::with_cascade(
        HerdStore::in_memory(),
        Arc::new(InMemoryLedger::new()),
        CascadePolicy::All,
    );
    let animal = service.create_animal(hen(None)).await.unwrap();

    service
        .record_financial(NewFinancialRecord {
            kind: TransactionKind::Expense,
            category: TransactionCategory::Care,
            amount: Money::from_cents(2_500),
            date: Some("2024-01-05".parse().unwrap()),
            animal_id: Some(animal.id),
            description: "Vaccine".to_string(),
        })
        .await
        .unwrap();
    service
        .record_financial(NewFinancialRecord {
            kind: TransactionKind::Expense,
            category: TransactionCategory::Feed,
            amount: Money::from_cents(9_000),
            date: Some("2024-01-06".parse().unwrap()),
            animal_id: None,
            description: "Feed bags".to_string(),
        })
        .await
        .unwrap();

    service.delete_animal(animal.id).await.unwrap();

    let remaining = service.store().financial.all().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert!(remaining[0].animal_id.is_none());
}

#[tokio::test]
async fn patch_cannot_resurrect_sold_animal() {
    let service = service();
    let animal = service.create_animal(hen(None)).await.unwrap();
    service.record_sale(sale_of(animal.id)).await.unwrap();

    let result = service
        .update_animal(
            animal.id,
            AnimalPatch {
                status: Some(AnimalStatus::Active),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(DomainError::InvalidState { .. })));
}
