use axum::{extract::State, routing::get, Json, Router};
use tracing::{info, instrument};

use crate::auth::jwt::AuthUser;
use crate::error::ApiError;
use crate::profile::dto::UpdateProfileRequest;
use crate::profile::repo::Profile;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/profile", get(get_profile).put(update_profile))
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Profile>, ApiError> {
    let profile = Profile::find(&state.db, user_id)
        .await?
        .ok_or(ApiError::NotFound("profile"))?;
    Ok(Json(profile))
}

#[instrument(skip(state, payload))]
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<Profile>, ApiError> {
    let profile = Profile::update(&state.db, user_id, &payload).await?;
    info!(%user_id, "profile updated");
    Ok(Json(profile))
}
