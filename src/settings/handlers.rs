use axum::{extract::State, routing::get, Json, Router};
use tracing::{info, instrument};

use crate::auth::jwt::AuthUser;
use crate::error::ApiError;
use crate::settings::dto::UpdateSettingsRequest;
use crate::settings::repo::Settings;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/settings", get(get_settings).put(update_settings))
}

#[instrument(skip(state))]
pub async fn get_settings(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Settings>, ApiError> {
    let settings = Settings::get_or_create(&state.db, user_id).await?;
    Ok(Json(settings))
}

#[instrument(skip(state, payload))]
pub async fn update_settings(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<UpdateSettingsRequest>,
) -> Result<Json<Settings>, ApiError> {
    // Ensure the row exists before the partial update touches it.
    Settings::get_or_create(&state.db, user_id).await?;
    let settings = Settings::update(&state.db, user_id, &payload).await?;
    info!(%user_id, "settings updated");
    Ok(Json(settings))
}
