use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::settings::dto::UpdateSettingsRequest;

/// Unit preferences, training focus and the nutrition goals that
/// parameterize the daily macro summary. Stored values are always kg, kcal
/// and grams; unit preferences are display hints only.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Settings {
    pub user_id: Uuid,
    pub distance_unit: String,
    pub weight_unit: String,
    pub energy_unit: String,
    pub primary_focus: String,
    pub weekly_workout_goal: i32,
    pub weekly_weight_change_kg: f64,
    pub activity_level: String,
    pub calorie_goal_kcal: f64,
    pub protein_goal_g: f64,
    pub carbs_goal_g: f64,
    pub fat_goal_g: f64,
    pub profile_public: bool,
    pub notifications_enabled: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

const SETTINGS_COLUMNS: &str = r#"user_id, distance_unit, weight_unit, energy_unit,
    primary_focus, weekly_workout_goal, weekly_weight_change_kg, activity_level,
    calorie_goal_kcal, protein_goal_g, carbs_goal_g, fat_goal_g, profile_public,
    notifications_enabled, updated_at"#;

impl Settings {
    pub const DEFAULT_CALORIE_GOAL_KCAL: f64 = 2000.0;

    /// Reads the user's settings, inserting the defaults row on first use.
    pub async fn get_or_create(db: &PgPool, user_id: Uuid) -> anyhow::Result<Settings> {
        sqlx::query("INSERT INTO settings (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
            .bind(user_id)
            .execute(db)
            .await?;

        let row = sqlx::query_as::<_, Settings>(&format!(
            "SELECT {SETTINGS_COLUMNS} FROM settings WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    /// Partial update; absent fields keep their stored value.
    pub async fn update(
        db: &PgPool,
        user_id: Uuid,
        patch: &UpdateSettingsRequest,
    ) -> anyhow::Result<Settings> {
        let row = sqlx::query_as::<_, Settings>(&format!(
            r#"
            UPDATE settings SET
                distance_unit = COALESCE($2, distance_unit),
                weight_unit = COALESCE($3, weight_unit),
                energy_unit = COALESCE($4, energy_unit),
                primary_focus = COALESCE($5, primary_focus),
                weekly_workout_goal = COALESCE($6, weekly_workout_goal),
                weekly_weight_change_kg = COALESCE($7, weekly_weight_change_kg),
                activity_level = COALESCE($8, activity_level),
                calorie_goal_kcal = COALESCE($9, calorie_goal_kcal),
                protein_goal_g = COALESCE($10, protein_goal_g),
                carbs_goal_g = COALESCE($11, carbs_goal_g),
                fat_goal_g = COALESCE($12, fat_goal_g),
                profile_public = COALESCE($13, profile_public),
                notifications_enabled = COALESCE($14, notifications_enabled),
                updated_at = now()
            WHERE user_id = $1
            RETURNING {SETTINGS_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(&patch.distance_unit)
        .bind(&patch.weight_unit)
        .bind(&patch.energy_unit)
        .bind(&patch.primary_focus)
        .bind(patch.weekly_workout_goal)
        .bind(patch.weekly_weight_change_kg)
        .bind(&patch.activity_level)
        .bind(patch.calorie_goal_kcal)
        .bind(patch.protein_goal_g)
        .bind(patch.carbs_goal_g)
        .bind(patch.fat_goal_g)
        .bind(patch.profile_public)
        .bind(patch.notifications_enabled)
        .fetch_one(db)
        .await?;
        Ok(row)
    }
}
