use serde::Deserialize;
use time::OffsetDateTime;

use crate::meals::repo::MealType;

/// Ad-hoc meal entry.
#[derive(Debug, Deserialize)]
pub struct LogMealRequest {
    pub name: String,
    pub meal_type: MealType,
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein_g: f64,
    #[serde(default)]
    pub carbs_g: f64,
    #[serde(default)]
    pub fat_g: f64,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub eaten_at: Option<OffsetDateTime>,
}

/// Meal entry materialized from a stored template.
#[derive(Debug, Deserialize)]
pub struct LogFromTemplateRequest {
    pub meal_type: MealType,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub eaten_at: Option<OffsetDateTime>,
}

#[derive(Debug, Deserialize)]
pub struct DayQuery {
    /// `YYYY-MM-DD`; defaults to the current UTC date.
    pub date: Option<String>,
    pub meal_type: Option<MealType>,
}

#[derive(Debug, Deserialize)]
pub struct IngredientInput {
    pub name: String,
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein_g: f64,
    #[serde(default)]
    pub carbs_g: f64,
    #[serde(default)]
    pub fat_g: f64,
}

#[derive(Debug, Deserialize)]
pub struct CreateTemplateRequest {
    pub name: String,
    pub ingredients: Vec<IngredientInput>,
}
