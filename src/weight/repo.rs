use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WeightLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub weight_kg: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub logged_at: OffsetDateTime,
}

/// Ascending history, optionally bounded below by a trailing window start.
pub async fn fetch_weight_logs(
    db: &PgPool,
    user_id: Uuid,
    since: Option<OffsetDateTime>,
) -> anyhow::Result<Vec<WeightLog>> {
    let rows = sqlx::query_as::<_, WeightLog>(
        r#"
        SELECT id, user_id, weight_kg, logged_at
        FROM weight_logs
        WHERE user_id = $1
          AND ($2::timestamptz IS NULL OR logged_at >= $2)
        ORDER BY logged_at ASC
        "#,
    )
    .bind(user_id)
    .bind(since)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Appends one history row and mirrors the value into the profile's current
/// weight in the same transaction. Concurrent logs resolve by last write to
/// the profile winning.
pub async fn log_weight(db: &PgPool, user_id: Uuid, weight_kg: f64) -> anyhow::Result<WeightLog> {
    let mut tx = db.begin().await?;

    let row = sqlx::query_as::<_, WeightLog>(
        r#"
        INSERT INTO weight_logs (user_id, weight_kg)
        VALUES ($1, $2)
        RETURNING id, user_id, weight_kg, logged_at
        "#,
    )
    .bind(user_id)
    .bind(weight_kg)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        UPDATE profiles
        SET current_weight_kg = $2, updated_at = now()
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .bind(weight_kg)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(row)
}
