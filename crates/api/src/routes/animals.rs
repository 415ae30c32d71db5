//! Animal inventory endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::EntityId;
use domain::{Animal, AnimalPatch, MedicalRecord, NewAnimal, ReproductionRecord};
use ledger::HistoryEvent;

use crate::AppState;
use crate::error::ApiError;

pub(crate) fn parse_entity_id(id: &str) -> Result<EntityId, ApiError> {
    let uuid = uuid::Uuid::parse_str(id)
        .map_err(|e| ApiError::BadRequest(format!("Invalid ID format: {e}")))?;
    Ok(EntityId::from_uuid(uuid))
}

/// POST /api/animals — take a new animal into the inventory.
#[tracing::instrument(skip(state, req))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewAnimal>,
) -> Result<(StatusCode, Json<Animal>), ApiError> {
    let animal = state.service.create_animal(req).await?;
    Ok((StatusCode::CREATED, Json(animal)))
}

/// GET /api/animals — list the whole inventory.
#[tracing::instrument(skip(state))]
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Animal>>, ApiError> {
    Ok(Json(state.service.list_animals().await?))
}

/// GET /api/animals/{id} — load one animal.
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Animal>, ApiError> {
    let id = parse_entity_id(&id)?;
    Ok(Json(state.service.get_animal(id).await?))
}

/// PUT /api/animals/{id} — patch non-lifecycle fields.
#[tracing::instrument(skip(state, patch))]
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<AnimalPatch>,
) -> Result<Json<Animal>, ApiError> {
    let id = parse_entity_id(&id)?;
    Ok(Json(state.service.update_animal(id, patch).await?))
}

/// DELETE /api/animals/{id} — remove an animal and cascade its records.
#[tracing::instrument(skip(state))]
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_entity_id(&id)?;
    state.service.delete_animal(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/animals/{id}/medical — the animal's medical records.
#[tracing::instrument(skip(state))]
pub async fn medical(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<MedicalRecord>>, ApiError> {
    let id = parse_entity_id(&id)?;
    Ok(Json(state.service.list_medical(id).await?))
}

/// GET /api/animals/{id}/reproduction — reproduction records the animal
/// appears in.
#[tracing::instrument(skip(state))]
pub async fn reproduction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ReproductionRecord>>, ApiError> {
    let id = parse_entity_id(&id)?;
    Ok(Json(state.service.list_reproduction(id).await?))
}

/// GET /api/animals/{id}/history — the animal-scoped ledger feed.
#[tracing::instrument(skip(state))]
pub async fn history(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<HistoryEvent>>, ApiError> {
    let id = parse_entity_id(&id)?;
    Ok(Json(state.service.list_history(Some(id)).await?))
}
