use serde::Deserialize;
use time::OffsetDateTime;

use crate::window::MonthsWindow;

#[derive(Debug, Deserialize)]
pub struct ExerciseInput {
    pub name: String,
    pub sets: Option<i32>,
    pub reps: Option<i32>,
    pub weight_kg: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct LogWorkoutRequest {
    pub name: String,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub performed_at: Option<OffsetDateTime>,
    pub duration_min: Option<i32>,
    pub calories_burned: Option<i32>,
    #[serde(default)]
    pub exercises: Vec<ExerciseInput>,
}

#[derive(Debug, Deserialize)]
pub struct WindowQuery {
    /// `1|3|6|12|all`; defaults to all-time.
    pub months: Option<MonthsWindow>,
}
