//! API server entry point.

use std::sync::Arc;

use api::AppState;
use api::config::Config;
use domain::{
    Animal, FinancialRecord, HerdStore, LivestockService, MedicalRecord, ReproductionRecord,
    SaleRecord,
};
use ledger::{InMemoryLedger, Ledger, PgLedger};
use reports::ReportsEngine;
use store::PgCollection;
use tokio::signal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

/// Builds the store bundle and ledger, PostgreSQL-backed when a
/// `DATABASE_URL` is configured.
async fn build_state(config: &Config) -> Arc<AppState> {
    match &config.database_url {
        Some(url) => {
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(5)
                .connect(url)
                .await
                .expect("failed to connect to database");
            store::run_migrations(&pool)
                .await
                .expect("failed to run migrations");

            let store = HerdStore {
                animals: Arc::new(PgCollection::<Animal>::new(pool.clone())),
                medical: Arc::new(PgCollection::<MedicalRecord>::new(pool.clone())),
                reproduction: Arc::new(PgCollection::<ReproductionRecord>::new(pool.clone())),
                sales: Arc::new(PgCollection::<SaleRecord>::new(pool.clone())),
                financial: Arc::new(PgCollection::<FinancialRecord>::new(pool.clone())),
            };
            let ledger: Arc<dyn Ledger> = Arc::new(PgLedger::new(pool));

            tracing::info!("using PostgreSQL-backed storage");
            let service = Arc::new(LivestockService::new(store.clone(), ledger));
            let reports = ReportsEngine::new(store);
            Arc::new(AppState { service, reports })
        }
        None => {
            tracing::info!("using in-memory storage");
            let store = HerdStore::in_memory();
            let ledger: Arc<dyn Ledger> = Arc::new(InMemoryLedger::new());
            let service = Arc::new(LivestockService::new(store.clone(), ledger));
            let reports = ReportsEngine::new(store);
            Arc::new(AppState { service, reports })
        }
    }
}

#[tokio::main]
async fn main() {
    let config = Config::from_env();

    // 1. Initialize tracing
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2. Install Prometheus metrics recorder
    let prometheus_builder = metrics_exporter_prometheus::PrometheusBuilder::new();
    let metrics_handle = prometheus_builder
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // 3. Build storage and application state
    let state = build_state(&config).await;

    // 4. Build the application
    let app = api::create_app(state, metrics_handle);

    // 5. Start server
    let addr = config.addr();
    tracing::info!(%addr, "starting API server");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("server shut down gracefully");
}
