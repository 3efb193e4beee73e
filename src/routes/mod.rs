use axum::{
    Router,
    routing::{get, post, put},
};
use sqlx::SqlitePool;
use time::Weekday;

mod health;
mod meal_plans;
mod meals;
mod people;
mod ratings;
mod shopping;

#[derive(Clone)]
pub struct AppState {
    pub meal_command: mealplanner_meal::Command,
    pub meal_query: mealplanner_meal::Query,
    pub plan_command: mealplanner_mealplan::Command,
    pub plan_query: mealplanner_mealplan::Query,
    pub person_command: mealplanner_person::Command,
    pub person_query: mealplanner_person::Query,
    pub rating_command: mealplanner_rating::Command,
    pub rating_query: mealplanner_rating::Query,
    pub shopping: mealplanner_shopping::ShoppingList<mealplanner_mealplan::Query>,
    pub week_start: Weekday,
    pub pool: SqlitePool,
}

impl AppState {
    pub fn new(pool: SqlitePool, week_start: Weekday) -> Self {
        Self {
            meal_command: mealplanner_meal::Command(pool.clone()),
            meal_query: mealplanner_meal::Query(pool.clone()),
            plan_command: mealplanner_mealplan::Command(pool.clone()),
            plan_query: mealplanner_mealplan::Query(pool.clone()),
            person_command: mealplanner_person::Command(pool.clone()),
            person_query: mealplanner_person::Query(pool.clone()),
            rating_command: mealplanner_rating::Command(pool.clone()),
            rating_query: mealplanner_rating::Query(pool.clone()),
            shopping: mealplanner_shopping::ShoppingList::new(
                mealplanner_mealplan::Query(pool.clone()),
                week_start,
            ),
            week_start,
            pool,
        }
    }
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        // Health check endpoints
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(app_state.pool.clone())
        .route("/api/meals", get(meals::list).post(meals::create))
        .route("/api/meals/import", post(meals::import))
        .route(
            "/api/meals/{id}",
            get(meals::find).put(meals::update).delete(meals::delete),
        )
        .route("/api/people", get(people::list).post(people::create))
        .route(
            "/api/people/{id}",
            get(people::find).put(people::update).delete(people::delete),
        )
        .route("/api/ratings", post(ratings::create))
        .route(
            "/api/ratings/{id}",
            put(ratings::update).delete(ratings::delete),
        )
        .route("/api/ratings/meal/{meal_id}", get(ratings::for_meal))
        .route("/api/ratings/meal/{meal_id}/average", get(ratings::average))
        .route("/api/meal-plans", get(meal_plans::list))
        .route("/api/meal-plans/week", get(meal_plans::week))
        .route(
            "/api/meal-plans/shopping-list",
            get(shopping::for_range),
        )
        .route(
            "/api/meal-plans/entries/{id}",
            put(meal_plans::update_entry).delete(meal_plans::delete_entry),
        )
        .route("/api/meal-plans/{id}", get(meal_plans::find))
        .route("/api/meal-plans/{id}/entries", post(meal_plans::add_entry))
        .route("/api/meal-plans/{id}/notes", put(meal_plans::update_notes))
        .route("/api/meal-plans/{id}/shopping-list", get(shopping::for_plan))
        .with_state(app_state)
}
