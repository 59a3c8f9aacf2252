use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Workout {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub performed_at: OffsetDateTime,
    pub duration_min: Option<i32>,
    pub calories_burned: Option<i32>,
    pub status: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WorkoutExercise {
    pub id: Uuid,
    pub workout_id: Uuid,
    pub name: String,
    pub sets: Option<i32>,
    pub reps: Option<i32>,
    pub weight_kg: Option<f64>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewExercise {
    pub name: String,
    pub sets: Option<i32>,
    pub reps: Option<i32>,
    pub weight_kg: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct NewWorkout {
    pub name: String,
    pub performed_at: OffsetDateTime,
    pub duration_min: Option<i32>,
    pub calories_burned: Option<i32>,
    pub exercises: Vec<NewExercise>,
}

/// Ascending by performed_at, optionally bounded by a trailing window start.
pub async fn fetch_workouts(
    db: &PgPool,
    user_id: Uuid,
    since: Option<OffsetDateTime>,
) -> anyhow::Result<Vec<Workout>> {
    let rows = sqlx::query_as::<_, Workout>(
        r#"
        SELECT id, user_id, name, performed_at, duration_min, calories_burned, status, created_at
        FROM workouts
        WHERE user_id = $1
          AND ($2::timestamptz IS NULL OR performed_at >= $2)
        ORDER BY performed_at ASC
        "#,
    )
    .bind(user_id)
    .bind(since)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Exercises for a set of workouts, in creation order so that the earliest
/// equal weight wins in max-per-day grouping.
pub async fn fetch_exercises(
    db: &PgPool,
    workout_ids: &[Uuid],
) -> anyhow::Result<Vec<WorkoutExercise>> {
    if workout_ids.is_empty() {
        return Ok(Vec::new());
    }
    let rows = sqlx::query_as::<_, WorkoutExercise>(
        r#"
        SELECT id, workout_id, name, sets, reps, weight_kg, created_at
        FROM workout_exercises
        WHERE workout_id = ANY($1)
        ORDER BY created_at ASC
        "#,
    )
    .bind(workout_ids)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn create_workout(
    db: &PgPool,
    user_id: Uuid,
    workout: NewWorkout,
) -> anyhow::Result<Workout> {
    let mut tx = db.begin().await?;

    let row = sqlx::query_as::<_, Workout>(
        r#"
        INSERT INTO workouts (user_id, name, performed_at, duration_min, calories_burned)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, user_id, name, performed_at, duration_min, calories_burned, status,
                  created_at
        "#,
    )
    .bind(user_id)
    .bind(&workout.name)
    .bind(workout.performed_at)
    .bind(workout.duration_min)
    .bind(workout.calories_burned)
    .fetch_one(&mut *tx)
    .await?;

    for ex in &workout.exercises {
        sqlx::query(
            r#"
            INSERT INTO workout_exercises (workout_id, name, sets, reps, weight_kg)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(row.id)
        .bind(&ex.name)
        .bind(ex.sets)
        .bind(ex.reps)
        .bind(ex.weight_kg)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(row)
}

pub async fn delete_workout(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query("DELETE FROM workouts WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}
