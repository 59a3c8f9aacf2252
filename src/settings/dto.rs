use serde::Deserialize;

/// All fields optional; only present fields are written.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateSettingsRequest {
    pub distance_unit: Option<String>,
    pub weight_unit: Option<String>,
    pub energy_unit: Option<String>,
    pub primary_focus: Option<String>,
    pub weekly_workout_goal: Option<i32>,
    pub weekly_weight_change_kg: Option<f64>,
    pub activity_level: Option<String>,
    pub calorie_goal_kcal: Option<f64>,
    pub protein_goal_g: Option<f64>,
    pub carbs_goal_g: Option<f64>,
    pub fat_goal_g: Option<f64>,
    pub profile_public: Option<bool>,
    pub notifications_enabled: Option<bool>,
}
