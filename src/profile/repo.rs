use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::profile::dto::UpdateProfileRequest;

/// Identity attributes; created empty at signup, never hard-deleted.
/// `current_weight_kg` mirrors the latest weight log (last write wins).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub user_id: Uuid,
    pub display_name: Option<String>,
    pub gender: Option<String>,
    pub birth_date: Option<Date>,
    pub height_cm: Option<f64>,
    pub current_weight_kg: Option<f64>,
    pub activity_level: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Profile {
    pub async fn find(db: &PgPool, user_id: Uuid) -> anyhow::Result<Option<Profile>> {
        let row = sqlx::query_as::<_, Profile>(
            r#"
            SELECT user_id, display_name, gender, birth_date, height_cm, current_weight_kg,
                   activity_level, created_at, updated_at
            FROM profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    /// Partial update of identity fields. The current weight is not written
    /// here; it only moves through weight logging.
    pub async fn update(
        db: &PgPool,
        user_id: Uuid,
        patch: &UpdateProfileRequest,
    ) -> anyhow::Result<Profile> {
        let row = sqlx::query_as::<_, Profile>(
            r#"
            UPDATE profiles SET
                display_name = COALESCE($2, display_name),
                gender = COALESCE($3, gender),
                birth_date = COALESCE($4, birth_date),
                height_cm = COALESCE($5, height_cm),
                activity_level = COALESCE($6, activity_level),
                updated_at = now()
            WHERE user_id = $1
            RETURNING user_id, display_name, gender, birth_date, height_cm, current_weight_kg,
                      activity_level, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(&patch.display_name)
        .bind(&patch.gender)
        .bind(patch.birth_date)
        .bind(patch.height_cm)
        .bind(&patch.activity_level)
        .fetch_one(db)
        .await?;
        Ok(row)
    }
}
