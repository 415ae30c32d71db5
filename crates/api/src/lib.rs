//! HTTP surface for the herdbook lifecycle engine.
//!
//! A thin axum layer over [`domain::LivestockService`] and
//! [`reports::ReportsEngine`], with structured logging (tracing) and
//! Prometheus metrics. All invariants live below this layer.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post, put};
use domain::{HerdStore, LivestockService};
use ledger::InMemoryLedger;
use metrics_exporter_prometheus::PrometheusHandle;
use reports::ReportsEngine;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub service: Arc<LivestockService>,
    pub reports: ReportsEngine,
}

/// Creates the axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::render))
        .with_state(metrics_handle);

    let api = Router::new()
        .route("/animals", post(routes::animals::create))
        .route("/animals", get(routes::animals::list))
        .route("/animals/{id}", get(routes::animals::get))
        .route("/animals/{id}", put(routes::animals::update))
        .route("/animals/{id}", delete(routes::animals::delete))
        .route("/animals/{id}/medical", get(routes::animals::medical))
        .route(
            "/animals/{id}/reproduction",
            get(routes::animals::reproduction),
        )
        .route("/animals/{id}/history", get(routes::animals::history))
        .route("/sales", post(routes::records::create_sale))
        .route("/medical", post(routes::records::create_medical))
        .route("/reproduction", post(routes::records::create_breeding))
        .route(
            "/reproduction/{id}/birth",
            post(routes::records::record_birth),
        )
        .route("/financial", post(routes::records::create_financial))
        .route("/history", get(routes::records::herd_history))
        .route("/stats", get(routes::reports::stats))
        .route("/finance/summary", get(routes::reports::financial_summary))
        .route("/reminders", get(routes::reports::reminders));

    Router::new()
        .route("/health", get(routes::health::check))
        .nest("/api", api)
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates application state backed by in-memory storage.
pub fn create_default_state() -> Arc<AppState> {
    let store = HerdStore::in_memory();
    let ledger = Arc::new(InMemoryLedger::new());
    let service = Arc::new(LivestockService::new(store.clone(), ledger));
    let reports = ReportsEngine::new(store);

    Arc::new(AppState { service, reports })
}
