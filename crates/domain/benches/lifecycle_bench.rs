use std::sync::Arc;

use common::Money;
use criterion::{Criterion, criterion_group, criterion_main};
use domain::{HerdStore, LivestockService, NewAnimal, NewSale, Sex, Species};
use ledger::InMemoryLedger;

fn new_service() -> LivestockService {
    LivestockService::new(HerdStore::in_memory(), Arc::new(InMemoryLedger::new()))
}

fn hen() -> NewAnimal {
    NewAnimal {
        species: Species::Poultry,
        breed: "Sussex".to_string(),
        sex: Sex::Female,
        birth_date: "2023-11-01".parse().unwrap(),
        weight_kg: 1.5,
        name: None,
        notes: None,
    }
}

fn bench_create_animal(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("domain/create_animal", |b| {
        b.iter(|| {
            rt.block_on(async {
                let service = new_service();
                service.create_animal(hen()).await.unwrap();
            });
        });
    });
}

fn bench_sale_transition(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("domain/create_and_sell", |b| {
        b.iter(|| {
            rt.block_on(async {
                let service = new_service();
                let animal = service.create_animal(hen()).await.unwrap();
                service
                    .record_sale(NewSale {
                        animal_id: animal.id,
                        price: Money::from_cents(50_000),
                        quantity: None,
                        buyer: None,
                        buyer_contact: None,
                        payment_method: None,
                        sale_date: None,
                    })
                    .await
                    .unwrap();
            });
        });
    });
}

criterion_group!(benches, bench_create_animal, bench_sale_transition);
criterion_main!(benches);
