use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Closed set of meal partitions; a day's logs split across these with no
/// overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "meal_type", rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MealLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub meal_type: MealType,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub eaten_at: OffsetDateTime,
    pub template_id: Option<Uuid>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewMealLog {
    pub name: String,
    pub meal_type: MealType,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub eaten_at: OffsetDateTime,
    pub template_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MealTemplate {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub total_calories: f64,
    pub total_protein_g: f64,
    pub total_carbs_g: f64,
    pub total_fat_g: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TemplateIngredient {
    pub id: Uuid,
    pub template_id: Uuid,
    pub name: String,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

pub async fn fetch_meal_logs(
    db: &PgPool,
    user_id: Uuid,
    from: OffsetDateTime,
    to: OffsetDateTime,
    meal_type: Option<MealType>,
) -> anyhow::Result<Vec<MealLog>> {
    let rows = sqlx::query_as::<_, MealLog>(
        r#"
        SELECT id, user_id, name, meal_type, calories, protein_g, carbs_g, fat_g,
               eaten_at, template_id, created_at
        FROM meal_logs
        WHERE user_id = $1
          AND eaten_at >= $2
          AND eaten_at < $3
          AND ($4::meal_type IS NULL OR meal_type = $4)
        ORDER BY eaten_at ASC
        "#,
    )
    .bind(user_id)
    .bind(from)
    .bind(to)
    .bind(meal_type)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn insert_meal_log(
    db: &PgPool,
    user_id: Uuid,
    entry: NewMealLog,
) -> anyhow::Result<MealLog> {
    let row = sqlx::query_as::<_, MealLog>(
        r#"
        INSERT INTO meal_logs (user_id, name, meal_type, calories, protein_g, carbs_g, fat_g,
                               eaten_at, template_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id, user_id, name, meal_type, calories, protein_g, carbs_g, fat_g,
                  eaten_at, template_id, created_at
        "#,
    )
    .bind(user_id)
    .bind(&entry.name)
    .bind(entry.meal_type)
    .bind(entry.calories)
    .bind(entry.protein_g)
    .bind(entry.carbs_g)
    .bind(entry.fat_g)
    .bind(entry.eaten_at)
    .bind(entry.template_id)
    .fetch_one(db)
    .await?;
    Ok(row)
}

pub async fn delete_meal_log(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query("DELETE FROM meal_logs WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn find_template(
    db: &PgPool,
    user_id: Uuid,
    id: Uuid,
) -> anyhow::Result<Option<MealTemplate>> {
    let row = sqlx::query_as::<_, MealTemplate>(
        r#"
        SELECT id, user_id, name, total_calories, total_protein_g, total_carbs_g, total_fat_g,
               created_at
        FROM meal_templates
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn list_templates(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<MealTemplate>> {
    let rows = sqlx::query_as::<_, MealTemplate>(
        r#"
        SELECT id, user_id, name, total_calories, total_protein_g, total_carbs_g, total_fat_g,
               created_at
        FROM meal_templates
        WHERE user_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn list_template_ingredients(
    db: &PgPool,
    template_id: Uuid,
) -> anyhow::Result<Vec<TemplateIngredient>> {
    let rows = sqlx::query_as::<_, TemplateIngredient>(
        r#"
        SELECT id, template_id, name, calories, protein_g, carbs_g, fat_g, created_at
        FROM meal_template_ingredients
        WHERE template_id = $1
        ORDER BY created_at ASC
        "#,
    )
    .bind(template_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub struct NewIngredient {
    pub name: String,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

/// Creates a template with its ingredient rows in one transaction. The
/// stored totals are the exact sum of the ingredient rows at this moment;
/// they are not recomputed afterwards.
pub async fn create_template(
    db: &PgPool,
    user_id: Uuid,
    name: &str,
    ingredients: &[NewIngredient],
) -> anyhow::Result<MealTemplate> {
    let total_calories: f64 = ingredients.iter().map(|i| i.calories).sum();
    let total_protein: f64 = ingredients.iter().map(|i| i.protein_g).sum();
    let total_carbs: f64 = ingredients.iter().map(|i| i.carbs_g).sum();
    let total_fat: f64 = ingredients.iter().map(|i| i.fat_g).sum();

    let mut tx = db.begin().await?;
    let template = sqlx::query_as::<_, MealTemplate>(
        r#"
        INSERT INTO meal_templates (user_id, name, total_calories, total_protein_g,
                                    total_carbs_g, total_fat_g)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, user_id, name, total_calories, total_protein_g, total_carbs_g,
                  total_fat_g, created_at
        "#,
    )
    .bind(user_id)
    .bind(name)
    .bind(total_calories)
    .bind(total_protein)
    .bind(total_carbs)
    .bind(total_fat)
    .fetch_one(&mut *tx)
    .await?;

    for ing in ingredients {
        sqlx::query(
            r#"
            INSERT INTO meal_template_ingredients (template_id, name, calories, protein_g,
                                                   carbs_g, fat_g)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(template.id)
        .bind(&ing.name)
        .bind(ing.calories)
        .bind(ing.protein_g)
        .bind(ing.carbs_g)
        .bind(ing.fat_g)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(template)
}

pub async fn delete_template(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query("DELETE FROM meal_templates WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}
