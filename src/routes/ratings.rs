use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use mealplanner_rating::{RatingInput, RatingUpdate};
use mealplanner_shared::rating::MealRating;
use serde::Serialize;

use crate::error::AppError;
use crate::routes::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AverageRating {
    pub meal_id: String,
    pub average_rating: Option<f64>,
}

async fn load(state: &AppState, id: &str) -> Result<MealRating, AppError> {
    state.rating_query.find(id).await?.ok_or_else(|| {
        mealplanner_shared::Error::NotFound(format!("Rating not found with id: {id}")).into()
    })
}

/// GET /api/ratings/meal/{meal_id} - Latest rating of each person
pub async fn for_meal(
    State(state): State<AppState>,
    Path(meal_id): Path<String>,
) -> Result<Json<Vec<MealRating>>, AppError> {
    Ok(Json(state.rating_query.find_by_meal(&meal_id).await?))
}

/// GET /api/ratings/meal/{meal_id}/average - Mean rating to one decimal
pub async fn average(
    State(state): State<AppState>,
    Path(meal_id): Path<String>,
) -> Result<Json<AverageRating>, AppError> {
    let average_rating = state
        .rating_query
        .average_rating(&meal_id)
        .await?
        .map(|avg| (avg * 10.0).round() / 10.0);

    Ok(Json(AverageRating {
        meal_id,
        average_rating,
    }))
}

/// POST /api/ratings - Rate a meal, replacing the person's earlier rating
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<RatingInput>,
) -> Result<(StatusCode, Json<MealRating>), AppError> {
    let id = state.rating_command.create(input).await?;

    Ok((StatusCode::CREATED, Json(load(&state, &id).await?)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<RatingUpdate>,
) -> Result<Json<MealRating>, AppError> {
    state.rating_command.update(&id, input).await?;

    Ok(Json(load(&state, &id).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.rating_command.delete(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}
