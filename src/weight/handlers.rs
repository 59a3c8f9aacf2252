use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument, warn};

use crate::auth::jwt::AuthUser;
use crate::error::{ApiError, WriteOutcome};
use crate::state::AppState;
use crate::weight::dto::{HistoryQuery, LogWeightRequest};
use crate::weight::repo;
use crate::weight::trend::{compute_trend, validate_weight, WeightTrend};
use crate::window::MonthsWindow;

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/weight/history", get(weight_history))
}

pub fn write_routes() -> Router<AppState> {
    Router::new().route("/weight", post(log_weight))
}

#[instrument(skip(state))]
pub async fn weight_history(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<HistoryQuery>,
) -> Result<Json<WeightTrend>, ApiError> {
    let since = q
        .months
        .unwrap_or(MonthsWindow::All)
        .start(OffsetDateTime::now_utc());
    let rows = repo::fetch_weight_logs(&state.db, user_id, since)
        .await
        .unwrap_or_else(|e| {
            warn!(error = %e, %user_id, "fetch_weight_logs failed; returning no data");
            Vec::new()
        });
    Ok(Json(compute_trend(&rows)))
}

#[instrument(skip(state))]
pub async fn log_weight(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<LogWeightRequest>,
) -> Result<(StatusCode, Json<WriteOutcome>), ApiError> {
    validate_weight(payload.weight_kg)?;

    let row = repo::log_weight(&state.db, user_id, payload.weight_kg).await?;
    info!(%user_id, weight_kg = payload.weight_kg, "weight logged");
    Ok((StatusCode::CREATED, Json(WriteOutcome::created(row.id))))
}
