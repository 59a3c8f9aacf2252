use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "goal_type", rename_all = "snake_case")]
pub enum GoalType {
    ShortTerm,
    MediumTerm,
    LongTerm,
}

/// Lifecycle: active -> completed and active -> deleted are the only
/// transitions; both end states are terminal. Completing flips the status
/// and keeps the row; deleting removes the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "goal_status", rename_all = "lowercase")]
pub enum GoalStatus {
    Active,
    Completed,
    Deleted,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Goal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub goal_type: GoalType,
    pub title: String,
    pub description: Option<String>,
    pub target_date: Option<Date>,
    pub status: GoalStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub completed_at: Option<OffsetDateTime>,
}

pub async fn create_goal(
    db: &PgPool,
    user_id: Uuid,
    goal_type: GoalType,
    title: &str,
    description: Option<&str>,
    target_date: Option<Date>,
) -> anyhow::Result<Goal> {
    let row = sqlx::query_as::<_, Goal>(
        r#"
        INSERT INTO goals (user_id, goal_type, title, description, target_date)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, user_id, goal_type, title, description, target_date, status,
                  created_at, completed_at
        "#,
    )
    .bind(user_id)
    .bind(goal_type)
    .bind(title)
    .bind(description)
    .bind(target_date)
    .fetch_one(db)
    .await?;
    Ok(row)
}

pub async fn list_goals(
    db: &PgPool,
    user_id: Uuid,
    status: GoalStatus,
) -> anyhow::Result<Vec<Goal>> {
    let rows = sqlx::query_as::<_, Goal>(
        r#"
        SELECT id, user_id, goal_type, title, description, target_date, status,
               created_at, completed_at
        FROM goals
        WHERE user_id = $1 AND status = $2
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .bind(status)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Status flip; only an active goal can complete. Returns false when the
/// goal does not exist, belongs to someone else, or is already terminal.
pub async fn complete_goal(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE goals
        SET status = 'completed', completed_at = now()
        WHERE id = $1 AND user_id = $2 AND status = 'active'
        "#,
    )
    .bind(id)
    .bind(user_id)
    .execute(db)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Hard delete, unlike completion. The asymmetry is intentional.
pub async fn delete_goal(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query("DELETE FROM goals WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}
