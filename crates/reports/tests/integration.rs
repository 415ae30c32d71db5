//! Integration tests driving reports through the lifecycle service.

use std::sync::Arc;

use chrono::NaiveDate;
use common::Money;
use domain::{
    BreedingEvent, HerdStore, LivestockService, MedicalKind, NewAnimal, NewBreedingRecord,
    NewFinancialRecord, NewMedicalRecord, NewSale, Sex, Species, TransactionCategory,
    TransactionKind,
};
use ledger::InMemoryLedger;
use reports::{DateRange, ReminderKind, ReportsEngine};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn setup() -> (LivestockService, ReportsEngine) {
    let store = HerdStore::in_memory();
    let service = LivestockService::new(store.clone(), Arc::new(InMemoryLedger::new()));
    let engine = ReportsEngine::new(store);
    (service, engine)
}

fn animal(species: Species, sex: Sex) -> NewAnimal {
    NewAnimal {
        species,
        breed: "Test".to_string(),
        sex,
        birth_date: date("2023-11-01"),
        weight_kg: 1.0,
        name: None,
        notes: None,
    }
}

#[tokio::test]
async fn population_reflects_lifecycle_transitions() {
    let (service, engine) = setup();

    let hen = service
        .create_animal(animal(Species::Poultry, Sex::Female))
        .await
        .unwrap();
    service
        .create_animal(animal(Species::Poultry, Sex::Male))
        .await
        .unwrap();
    let sow = service
        .create_animal(animal(Species::Swine, Sex::Female))
        .await
        .unwrap();

    service
        .record_breeding(NewBreedingRecord {
            female_id: sow.id,
            male_id: None,
            event: BreedingEvent::Insemination,
            breeding_date: date("2024-01-01"),
            expected_birth_date: None,
            notes: None,
        })
        .await
        .unwrap();
    service
        .record_sale(NewSale {
            animal_id: hen.id,
            price: Money::from_cents(45_000),
            quantity: None,
            buyer: None,
            buyer_contact: None,
            payment_method: None,
            sale_date: Some(date("2024-01-15")),
        })
        .await
        .unwrap();

    let stats = engine.population_stats().await.unwrap();
    assert_eq!(stats.total_recorded, 3);
    assert_eq!(stats.total_active, 2);
    assert_eq!(stats.sold, 1);
    assert_eq!(stats.expecting, 1);

    let swine = stats
        .by_species
        .iter()
        .find(|s| s.species == Species::Swine)
        .unwrap();
    assert_eq!(swine.females, 1);
}

#[tokio::test]
async fn financial_summary_matches_recorded_amounts_exactly() {
    let (service, engine) = setup();

    for (kind, category, cents, on) in [
        (TransactionKind::Expense, TransactionCategory::Feed, 12_000, "2024-03-02"),
        (TransactionKind::Expense, TransactionCategory::Feed, 8_000, "2024-03-28"),
        (TransactionKind::Revenue, TransactionCategory::Sale, 90_000, "2024-03-15"),
        (TransactionKind::Expense, TransactionCategory::Care, 4_000, "2024-04-01"),
    ] {
        service
            .record_financial(NewFinancialRecord {
                kind,
                category,
                amount: Money::from_cents(cents),
                date: Some(date(on)),
                animal_id: None,
                description: "entry".to_string(),
            })
            .await
            .unwrap();
    }

    let summary = engine
        .financial_summary(DateRange::month_of(date("2024-03-10")))
        .await
        .unwrap();

    assert_eq!(summary.expense, Money::from_cents(20_000));
    assert_eq!(summary.revenue, Money::from_cents(90_000));
    assert_eq!(summary.net, Money::from_cents(70_000));

    let feed = summary
        .by_category
        .iter()
        .find(|c| c.category == TransactionCategory::Feed)
        .unwrap();
    assert_eq!(feed.expense, Money::from_cents(20_000));
    assert!(
        !summary
            .by_category
            .iter()
            .any(|c| c.category == TransactionCategory::Care),
        "April record must not appear in the March summary"
    );
}

#[tokio::test]
async fn reminders_combine_medical_and_birth_windows() {
    let (service, engine) = setup();
    let today = date("2024-01-01");

    let hen = service
        .create_animal(animal(Species::Poultry, Sex::Female))
        .await
        .unwrap();
    service
        .record_medical(NewMedicalRecord {
            animal_id: hen.id,
            kind: MedicalKind::Vaccination,
            description: "Booster".to_string(),
            veterinarian: None,
            cost: None,
            date: Some(today),
            next_visit: Some(date("2024-01-16")), // today + 15
            notes: None,
        })
        .await
        .unwrap();
    service
        .record_medical(NewMedicalRecord {
            animal_id: hen.id,
            kind: MedicalKind::Checkup,
            description: "Distant follow-up".to_string(),
            veterinarian: None,
            cost: None,
            date: Some(today),
            next_visit: Some(date("2024-02-15")), // today + 45
            notes: None,
        })
        .await
        .unwrap();
    service
        .record_breeding(NewBreedingRecord {
            female_id: hen.id,
            male_id: None,
            event: BreedingEvent::Mating,
            breeding_date: today,
            expected_birth_date: None, // projects to today + 21
            notes: None,
        })
        .await
        .unwrap();

    let reminders = engine.upcoming_reminders(today, 30).await.unwrap();

    assert_eq!(reminders.len(), 2);
    assert_eq!(reminders[0].due, date("2024-01-16"));
    assert_eq!(reminders[0].kind, ReminderKind::MedicalFollowUp);
    assert_eq!(reminders[1].due, date("2024-01-22"));
    assert_eq!(reminders[1].kind, ReminderKind::ExpectedBirth);
}
