use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::auth::jwt::AuthUser;
use crate::error::{ApiError, ValidationError, WriteOutcome};
use crate::goals::dto::{CreateGoalRequest, GoalListQuery};
use crate::goals::repo::{self, Goal, GoalStatus};
use crate::state::AppState;

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/goals", get(list_goals))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/goals", post(create_goal))
        .route("/goals/:id/complete", post(complete_goal))
        .route("/goals/:id", delete(delete_goal))
}

#[instrument(skip(state))]
pub async fn list_goals(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<GoalListQuery>,
) -> Result<Json<Vec<Goal>>, ApiError> {
    let status = q.status.unwrap_or(GoalStatus::Active);
    let goals = repo::list_goals(&state.db, user_id, status)
        .await
        .unwrap_or_else(|e| {
            warn!(error = %e, %user_id, "list_goals failed; returning no data");
            Vec::new()
        });
    Ok(Json(goals))
}

#[instrument(skip(state, payload))]
pub async fn create_goal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateGoalRequest>,
) -> Result<(StatusCode, Json<WriteOutcome>), ApiError> {
    let title = payload.title.trim();
    if title.is_empty() {
        return Err(ValidationError::GoalTitleEmpty.into());
    }

    let goal = repo::create_goal(
        &state.db,
        user_id,
        payload.goal_type,
        title,
        payload.description.as_deref(),
        payload.target_date,
    )
    .await?;
    info!(%user_id, goal_id = %goal.id, goal_type = ?goal.goal_type, "goal created");
    Ok((StatusCode::CREATED, Json(WriteOutcome::created(goal.id))))
}

#[instrument(skip(state))]
pub async fn complete_goal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<WriteOutcome>, ApiError> {
    if repo::complete_goal(&state.db, user_id, id).await? {
        info!(%user_id, goal_id = %id, "goal completed");
        Ok(Json(WriteOutcome::ok()))
    } else {
        Err(ApiError::NotFound("active goal"))
    }
}

#[instrument(skip(state))]
pub async fn delete_goal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<WriteOutcome>, ApiError> {
    if repo::delete_goal(&state.db, user_id, id).await? {
        info!(%user_id, goal_id = %id, "goal deleted");
        Ok(Json(WriteOutcome::ok()))
    } else {
        Err(ApiError::NotFound("goal"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goal_type_deserializes_from_snake_case() {
        let req: CreateGoalRequest = serde_json::from_str(
            r#"{"goal_type":"short_term","title":"Run a 5K"}"#,
        )
        .unwrap();
        assert_eq!(req.goal_type, crate::goals::repo::GoalType::ShortTerm);
        assert_eq!(req.title, "Run a 5K");
        assert!(req.description.is_none());
        assert!(req.target_date.is_none());
    }

    #[test]
    fn unknown_goal_type_is_rejected() {
        let res = serde_json::from_str::<CreateGoalRequest>(
            r#"{"goal_type":"forever","title":"x"}"#,
        );
        assert!(res.is_err());
    }
}
