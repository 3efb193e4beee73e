use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use mealplanner_meal::{ImportSummary, MealInput};
use mealplanner_shared::meal::Meal;
use serde::Deserialize;

use crate::error::AppError;
use crate::routes::AppState;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
}

async fn load(state: &AppState, id: &str) -> Result<Meal, AppError> {
    state.meal_query.find(id).await?.ok_or_else(|| {
        mealplanner_shared::Error::NotFound(format!("Meal not found with id: {id}")).into()
    })
}

/// GET /api/meals - All meals by title, or those matching `?search=`
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Meal>>, AppError> {
    let meals = match params.search.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => state.meal_query.search(text).await?,
        _ => state.meal_query.list().await?,
    };

    Ok(Json(meals))
}

pub async fn find(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Meal>, AppError> {
    Ok(Json(load(&state, &id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<MealInput>,
) -> Result<(StatusCode, Json<Meal>), AppError> {
    let id = state.meal_command.create(input).await?;

    Ok((StatusCode::CREATED, Json(load(&state, &id).await?)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<MealInput>,
) -> Result<Json<Meal>, AppError> {
    state.meal_command.update(&id, input).await?;

    Ok(Json(load(&state, &id).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    load(&state, &id).await?;
    state.meal_command.delete(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/meals/import - Bulk create, skipping titles that already exist
pub async fn import(
    State(state): State<AppState>,
    Json(inputs): Json<Vec<MealInput>>,
) -> Result<Json<ImportSummary>, AppError> {
    Ok(Json(state.meal_command.import(inputs).await?))
}
