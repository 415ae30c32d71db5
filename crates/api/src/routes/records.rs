//! Recorded-action endpoints: sales, medical, reproduction, financial.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use domain::{
    BirthOutcome, FinancialRecord, MedicalRecord, NewBreedingRecord, NewFinancialRecord,
    NewMedicalRecord, NewSale, ReproductionRecord, SaleRecord,
};
use ledger::HistoryEvent;

use crate::AppState;
use crate::error::ApiError;
use crate::routes::animals::parse_entity_id;

/// POST /api/sales — record a sale, transitioning the animal to sold.
#[tracing::instrument(skip(state, req))]
pub async fn create_sale(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewSale>,
) -> Result<(StatusCode, Json<SaleRecord>), ApiError> {
    let sale = state.service.record_sale(req).await?;
    Ok((StatusCode::CREATED, Json(sale)))
}

/// POST /api/medical — record a medical intervention.
#[tracing::instrument(skip(state, req))]
pub async fn create_medical(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewMedicalRecord>,
) -> Result<(StatusCode, Json<MedicalRecord>), ApiError> {
    let record = state.service.record_medical(req).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// POST /api/reproduction — record a breeding event for a female.
#[tracing::instrument(skip(state, req))]
pub async fn create_breeding(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewBreedingRecord>,
) -> Result<(StatusCode, Json<ReproductionRecord>), ApiError> {
    let record = state.service.record_breeding(req).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// POST /api/reproduction/{id}/birth — record the birth outcome on an
/// open breeding record.
#[tracing::instrument(skip(state, req))]
pub async fn record_birth(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<BirthOutcome>,
) -> Result<Json<ReproductionRecord>, ApiError> {
    let id = parse_entity_id(&id)?;
    Ok(Json(state.service.record_birth(id, req).await?))
}

/// POST /api/financial — record a financial transaction.
#[tracing::instrument(skip(state, req))]
pub async fn create_financial(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewFinancialRecord>,
) -> Result<(StatusCode, Json<FinancialRecord>), ApiError> {
    let record = state.service.record_financial(req).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/history — the herd-wide ledger feed, newest first.
#[tracing::instrument(skip(state))]
pub async fn herd_history(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<HistoryEvent>>, ApiError> {
    Ok(Json(state.service.list_history(None).await?))
}
