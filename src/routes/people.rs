use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use mealplanner_person::PersonInput;
use mealplanner_shared::person::Person;

use crate::error::AppError;
use crate::routes::AppState;

async fn load(state: &AppState, id: &str) -> Result<Person, AppError> {
    state.person_query.find(id).await?.ok_or_else(|| {
        mealplanner_shared::Error::NotFound(format!("Person not found with id: {id}")).into()
    })
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Person>>, AppError> {
    Ok(Json(state.person_query.list().await?))
}

pub async fn find(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Person>, AppError> {
    Ok(Json(load(&state, &id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<PersonInput>,
) -> Result<(StatusCode, Json<Person>), AppError> {
    let id = state.person_command.create(input).await?;

    Ok((StatusCode::CREATED, Json(load(&state, &id).await?)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<PersonInput>,
) -> Result<Json<Person>, AppError> {
    state.person_command.update(&id, input).await?;

    Ok(Json(load(&state, &id).await?))
}

/// DELETE /api/people/{id} - Also drops their ratings and unassigns their entries
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    load(&state, &id).await?;
    state.person_command.delete(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}
