//! Aggregation endpoints: population stats, finances, reminders.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use chrono::{NaiveDate, Utc};
use reports::{DateRange, FinancialSummary, PopulationStats, Reminder};
use serde::Deserialize;

use crate::AppState;
use crate::error::ApiError;

/// GET /api/stats — population statistics.
#[tracing::instrument(skip(state))]
pub async fn stats(State(state): State<Arc<AppState>>) -> Result<Json<PopulationStats>, ApiError> {
    Ok(Json(state.reports.population_stats().await?))
}

#[derive(Debug, Deserialize)]
pub struct SummaryParams {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// GET /api/finance/summary — financial totals over an inclusive range.
///
/// Defaults to the current calendar month when bounds are not supplied.
#[tracing::instrument(skip(state))]
pub async fn financial_summary(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SummaryParams>,
) -> Result<Json<FinancialSummary>, ApiError> {
    let month = DateRange::month_of(Utc::now().date_naive());
    let range = DateRange::new(
        params.start.unwrap_or(month.start),
        params.end.unwrap_or(month.end),
    );
    if range.start > range.end {
        return Err(ApiError::BadRequest(format!(
            "start {} is after end {}",
            range.start, range.end
        )));
    }
    Ok(Json(state.reports.financial_summary(range).await?))
}

#[derive(Debug, Deserialize)]
pub struct ReminderParams {
    pub days: Option<u32>,
}

/// GET /api/reminders — medical follow-ups and expected births due soon.
#[tracing::instrument(skip(state))]
pub async fn reminders(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReminderParams>,
) -> Result<Json<Vec<Reminder>>, ApiError> {
    let today = Utc::now().date_naive();
    let window_days = params.days.unwrap_or(30);
    Ok(Json(
        state.reports.upcoming_reminders(today, window_days).await?,
    ))
}
