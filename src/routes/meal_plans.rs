use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use mealplanner_mealplan::{EntryInput, EntryUpdate};
use mealplanner_shared::mealplan::{MealPlan, MealPlanEntry};
use serde::Deserialize;
use time::{Date, OffsetDateTime};

use crate::error::AppError;
use crate::routes::AppState;

#[derive(Debug, Deserialize)]
pub struct WeekParams {
    pub date: Option<Date>,
}

/// GET /api/meal-plans - Most recent week first
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<MealPlan>>, AppError> {
    Ok(Json(state.plan_query.find_all().await?))
}

/// GET /api/meal-plans/week?date= - Plan of the week containing `date` (today
/// by default), created on first access
pub async fn week(
    State(state): State<AppState>,
    Query(params): Query<WeekParams>,
) -> Result<Json<MealPlan>, AppError> {
    let date = params
        .date
        .unwrap_or_else(|| OffsetDateTime::now_utc().date());

    Ok(Json(
        state
            .plan_command
            .get_or_create_for_week(date, state.week_start)
            .await?,
    ))
}

pub async fn find(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MealPlan>, AppError> {
    let plan = state.plan_query.find(&id).await?.ok_or_else(|| {
        mealplanner_shared::Error::NotFound(format!("Meal plan not found with id: {id}"))
    })?;

    Ok(Json(plan))
}

pub async fn add_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<EntryInput>,
) -> Result<(StatusCode, Json<MealPlanEntry>), AppError> {
    let entry = state.plan_command.add_entry(&id, input).await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn update_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<EntryUpdate>,
) -> Result<Json<MealPlanEntry>, AppError> {
    Ok(Json(state.plan_command.update_entry(&id, input).await?))
}

pub async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.plan_command.delete_entry(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/meal-plans/{id}/notes - Replaces all day notes of the plan
pub async fn update_notes(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(notes): Json<BTreeMap<String, String>>,
) -> Result<Json<MealPlan>, AppError> {
    Ok(Json(state.plan_command.update_day_notes(&id, notes).await?))
}
