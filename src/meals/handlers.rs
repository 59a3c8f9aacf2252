use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use time::{Date, OffsetDateTime};
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::auth::jwt::AuthUser;
use crate::error::{ApiError, ValidationError, WriteOutcome};
use crate::meals::dto::{
    CreateTemplateRequest, DayQuery, LogFromTemplateRequest, LogMealRequest,
};
use crate::meals::repo::{self, MealLog, MealTemplate, NewIngredient, NewMealLog};
use crate::meals::summary::{summarize_day, DailySummary};
use crate::settings::repo::Settings;
use crate::state::AppState;
use crate::window::{day_bounds, parse_day_param};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/meals", get(list_meals))
        .route("/meals/summary", get(daily_summary))
        .route("/meal-templates", get(list_templates))
        .route("/meal-templates/:id", get(get_template))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/meals", post(log_meal))
        .route("/meals/from-template/:id", post(log_meal_from_template))
        .route("/meals/:id", delete(delete_meal))
        .route("/meal-templates", post(create_template))
        .route("/meal-templates/:id", delete(delete_template))
}

fn resolve_day(param: Option<&str>) -> Result<Date, ValidationError> {
    match param {
        Some(s) => parse_day_param(s),
        None => Ok(OffsetDateTime::now_utc().date()),
    }
}

fn validate_macros(calories: f64, protein_g: f64, carbs_g: f64, fat_g: f64) -> Result<(), ValidationError> {
    let all_non_negative = [calories, protein_g, carbs_g, fat_g]
        .iter()
        .all(|v| v.is_finite() && *v >= 0.0);
    if all_non_negative {
        Ok(())
    } else {
        Err(ValidationError::NegativeMacro)
    }
}

#[instrument(skip(state))]
pub async fn list_meals(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<DayQuery>,
) -> Result<Json<Vec<MealLog>>, ApiError> {
    let day = resolve_day(q.date.as_deref())?;
    let (from, to) = day_bounds(day);
    let logs = repo::fetch_meal_logs(&state.db, user_id, from, to, q.meal_type)
        .await
        .unwrap_or_else(|e| {
            warn!(error = %e, %user_id, "fetch_meal_logs failed; returning no data");
            Vec::new()
        });
    Ok(Json(logs))
}

#[instrument(skip(state))]
pub async fn daily_summary(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<DayQuery>,
) -> Result<Json<DailySummary>, ApiError> {
    let day = resolve_day(q.date.as_deref())?;
    let (from, to) = day_bounds(day);

    let logs = repo::fetch_meal_logs(&state.db, user_id, from, to, q.meal_type)
        .await
        .unwrap_or_else(|e| {
            warn!(error = %e, %user_id, "fetch_meal_logs failed; summarizing no data");
            Vec::new()
        });
    let calorie_goal = match Settings::get_or_create(&state.db, user_id).await {
        Ok(s) => s.calorie_goal_kcal,
        Err(e) => {
            warn!(error = %e, %user_id, "settings fetch failed; using default calorie goal");
            Settings::DEFAULT_CALORIE_GOAL_KCAL
        }
    };

    Ok(Json(summarize_day(day, &logs, calorie_goal)))
}

#[instrument(skip(state, payload))]
pub async fn log_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<LogMealRequest>,
) -> Result<(StatusCode, Json<WriteOutcome>), ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ValidationError::MealNameEmpty.into());
    }
    validate_macros(
        payload.calories,
        payload.protein_g,
        payload.carbs_g,
        payload.fat_g,
    )?;

    let entry = NewMealLog {
        name: payload.name.trim().to_string(),
        meal_type: payload.meal_type,
        calories: payload.calories,
        protein_g: payload.protein_g,
        carbs_g: payload.carbs_g,
        fat_g: payload.fat_g,
        eaten_at: payload.eaten_at.unwrap_or_else(OffsetDateTime::now_utc),
        template_id: None,
    };
    let row = repo::insert_meal_log(&state.db, user_id, entry).await?;
    Ok((StatusCode::CREATED, Json(WriteOutcome::created(row.id))))
}

/// Logs a meal from a template's stored totals. The totals are used exactly
/// as stored at template creation and are not recomputed against the
/// ingredient rows here.
#[instrument(skip(state))]
pub async fn log_meal_from_template(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(template_id): Path<Uuid>,
    Json(payload): Json<LogFromTemplateRequest>,
) -> Result<(StatusCode, Json<WriteOutcome>), ApiError> {
    let template = repo::find_template(&state.db, user_id, template_id)
        .await?
        .ok_or(ApiError::NotFound("meal template"))?;

    let entry = NewMealLog {
        name: template.name.clone(),
        meal_type: payload.meal_type,
        calories: template.total_calories,
        protein_g: template.total_protein_g,
        carbs_g: template.total_carbs_g,
        fat_g: template.total_fat_g,
        eaten_at: payload.eaten_at.unwrap_or_else(OffsetDateTime::now_utc),
        template_id: Some(template.id),
    };
    let row = repo::insert_meal_log(&state.db, user_id, entry).await?;
    Ok((StatusCode::CREATED, Json(WriteOutcome::created(row.id))))
}

#[instrument(skip(state))]
pub async fn delete_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<WriteOutcome>, ApiError> {
    if repo::delete_meal_log(&state.db, user_id, id).await? {
        Ok(Json(WriteOutcome::ok()))
    } else {
        Err(ApiError::NotFound("meal log"))
    }
}

#[instrument(skip(state))]
pub async fn list_templates(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<MealTemplate>>, ApiError> {
    let templates = repo::list_templates(&state.db, user_id)
        .await
        .unwrap_or_else(|e| {
            warn!(error = %e, %user_id, "list_templates failed; returning no data");
            Vec::new()
        });
    Ok(Json(templates))
}

#[derive(Debug, serde::Serialize)]
pub struct TemplateDetails {
    #[serde(flatten)]
    pub template: MealTemplate,
    pub ingredients: Vec<repo::TemplateIngredient>,
}

#[instrument(skip(state))]
pub async fn get_template(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<TemplateDetails>, ApiError> {
    let template = repo::find_template(&state.db, user_id, id)
        .await?
        .ok_or(ApiError::NotFound("meal template"))?;
    let ingredients = repo::list_template_ingredients(&state.db, template.id).await?;
    Ok(Json(TemplateDetails {
        template,
        ingredients,
    }))
}

#[instrument(skip(state, payload))]
pub async fn create_template(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateTemplateRequest>,
) -> Result<(StatusCode, Json<WriteOutcome>), ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ValidationError::MealNameEmpty.into());
    }
    for ing in &payload.ingredients {
        if ing.name.trim().is_empty() {
            return Err(ValidationError::MealNameEmpty.into());
        }
        validate_macros(ing.calories, ing.protein_g, ing.carbs_g, ing.fat_g)?;
    }

    let ingredients: Vec<NewIngredient> = payload
        .ingredients
        .into_iter()
        .map(|i| NewIngredient {
            name: i.name.trim().to_string(),
            calories: i.calories,
            protein_g: i.protein_g,
            carbs_g: i.carbs_g,
            fat_g: i.fat_g,
        })
        .collect();

    let template =
        repo::create_template(&state.db, user_id, payload.name.trim(), &ingredients).await?;
    Ok((StatusCode::CREATED, Json(WriteOutcome::created(template.id))))
}

#[instrument(skip(state))]
pub async fn delete_template(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<WriteOutcome>, ApiError> {
    if repo::delete_template(&state.db, user_id, id).await? {
        Ok(Json(WriteOutcome::ok()))
    } else {
        Err(ApiError::NotFound("meal template"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macro_validation_rejects_negative_and_non_finite() {
        assert!(validate_macros(100.0, 10.0, 20.0, 5.0).is_ok());
        assert_eq!(
            validate_macros(-1.0, 0.0, 0.0, 0.0),
            Err(ValidationError::NegativeMacro)
        );
        assert_eq!(
            validate_macros(f64::NAN, 0.0, 0.0, 0.0),
            Err(ValidationError::NegativeMacro)
        );
    }

    #[test]
    fn resolve_day_defaults_to_today() {
        let today = OffsetDateTime::now_utc().date();
        assert_eq!(resolve_day(None), Ok(today));
        assert!(resolve_day(Some("not-a-date")).is_err());
    }
}
