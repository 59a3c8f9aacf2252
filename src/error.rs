use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

/// Rejected before any row is written.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("weight must be greater than 0 kg")]
    WeightNotPositive,
    #[error("weight must be 500 kg or less")]
    WeightTooLarge,
    #[error("goal title must not be empty")]
    GoalTitleEmpty,
    #[error("meal name must not be empty")]
    MealNameEmpty,
    #[error("macro values must be non-negative")]
    NegativeMacro,
    #[error("exercise weight must be non-negative")]
    NegativeExerciseWeight,
    #[error("workout name must not be empty")]
    WorkoutNameEmpty,
    #[error("invalid date, expected YYYY-MM-DD")]
    BadDate,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("User not authenticated")]
    NotAuthenticated,
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    Internal(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::NotAuthenticated => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        }
        let body = Json(json!({ "success": false, "error": self.to_string() }));
        (status, body).into_response()
    }
}

/// Uniform success body for write endpoints.
#[derive(Debug, Serialize)]
pub struct WriteOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
}

impl WriteOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            id: None,
        }
    }

    pub fn created(id: Uuid) -> Self {
        Self {
            success: true,
            id: Some(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_outcome_omits_id_when_absent() {
        let json = serde_json::to_string(&WriteOutcome::ok()).unwrap();
        assert_eq!(json, r#"{"success":true}"#);
    }

    #[test]
    fn write_outcome_includes_created_id() {
        let id = Uuid::new_v4();
        let json = serde_json::to_string(&WriteOutcome::created(id)).unwrap();
        assert!(json.contains(&id.to_string()));
    }

    #[test]
    fn validation_errors_render_user_facing_messages() {
        assert_eq!(
            ValidationError::WeightNotPositive.to_string(),
            "weight must be greater than 0 kg"
        );
        assert_eq!(
            ValidationError::GoalTitleEmpty.to_string(),
            "goal title must not be empty"
        );
    }
}
