use axum::{
    Json,
    extract::{Path, Query, State},
};
use mealplanner_shopping::ShoppingItem;
use serde::Deserialize;
use time::Date;

use crate::error::AppError;
use crate::routes::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeParams {
    pub start_date: Date,
    pub end_date: Date,
}

/// GET /api/meal-plans/{id}/shopping-list
pub async fn for_plan(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ShoppingItem>>, AppError> {
    Ok(Json(state.shopping.generate_shopping_list(&id).await?))
}

/// GET /api/meal-plans/shopping-list?startDate=&endDate= - Both dates inclusive
pub async fn for_range(
    State(state): State<AppState>,
    Query(params): Query<RangeParams>,
) -> Result<Json<Vec<ShoppingItem>>, AppError> {
    Ok(Json(
        state
            .shopping
            .generate_shopping_list_for_range(params.start_date, params.end_date)
            .await?,
    ))
}
