use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::auth::jwt::AuthUser;
use crate::error::{ApiError, ValidationError, WriteOutcome};
use crate::state::AppState;
use crate::window::MonthsWindow;
use crate::workouts::dto::{LogWorkoutRequest, WindowQuery};
use crate::workouts::progress::{strength_progress, StrengthPoint};
use crate::workouts::repo::{self, NewExercise, NewWorkout, Workout};
use crate::workouts::stats::{summarize_workouts, WorkoutStats};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/workouts", get(list_workouts))
        .route("/workouts/stats", get(workout_stats))
        .route("/workouts/progress", get(workout_progress))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/workouts", post(log_workout))
        .route("/workouts/:id", delete(delete_workout))
}

async fn fetch_window(
    state: &AppState,
    user_id: Uuid,
    months: Option<MonthsWindow>,
) -> Vec<Workout> {
    let since = months
        .unwrap_or(MonthsWindow::All)
        .start(OffsetDateTime::now_utc());
    repo::fetch_workouts(&state.db, user_id, since)
        .await
        .unwrap_or_else(|e| {
            warn!(error = %e, %user_id, "fetch_workouts failed; returning no data");
            Vec::new()
        })
}

#[instrument(skip(state))]
pub async fn list_workouts(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<WindowQuery>,
) -> Result<Json<Vec<Workout>>, ApiError> {
    Ok(Json(fetch_window(&state, user_id, q.months).await))
}

#[instrument(skip(state))]
pub async fn workout_stats(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<WindowQuery>,
) -> Result<Json<WorkoutStats>, ApiError> {
    let workouts = fetch_window(&state, user_id, q.months).await;
    Ok(Json(summarize_workouts(&workouts)))
}

#[instrument(skip(state))]
pub async fn workout_progress(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<WindowQuery>,
) -> Result<Json<Vec<StrengthPoint>>, ApiError> {
    let workouts = fetch_window(&state, user_id, q.months).await;
    let ids: Vec<Uuid> = workouts.iter().map(|w| w.id).collect();
    let exercises = repo::fetch_exercises(&state.db, &ids)
        .await
        .unwrap_or_else(|e| {
            warn!(error = %e, %user_id, "fetch_exercises failed; returning no data");
            Vec::new()
        });
    Ok(Json(strength_progress(&workouts, &exercises)))
}

#[instrument(skip(state, payload))]
pub async fn log_workout(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<LogWorkoutRequest>,
) -> Result<(StatusCode, Json<WriteOutcome>), ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ValidationError::WorkoutNameEmpty.into());
    }
    for ex in &payload.exercises {
        if let Some(weight) = ex.weight_kg {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ValidationError::NegativeExerciseWeight.into());
            }
        }
    }

    let workout = NewWorkout {
        name: payload.name.trim().to_string(),
        performed_at: payload.performed_at.unwrap_or_else(OffsetDateTime::now_utc),
        duration_min: payload.duration_min,
        calories_burned: payload.calories_burned,
        exercises: payload
            .exercises
            .into_iter()
            .map(|e| NewExercise {
                name: e.name,
                sets: e.sets,
                reps: e.reps,
                weight_kg: e.weight_kg,
            })
            .collect(),
    };
    let row = repo::create_workout(&state.db, user_id, workout).await?;
    Ok((StatusCode::CREATED, Json(WriteOutcome::created(row.id))))
}

#[instrument(skip(state))]
pub async fn delete_workout(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<WriteOutcome>, ApiError> {
    if repo::delete_workout(&state.db, user_id, id).await? {
        Ok(Json(WriteOutcome::ok()))
    } else {
        Err(ApiError::NotFound("workout"))
    }
}
