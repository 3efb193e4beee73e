use std::{path::PathBuf, str::FromStr};

use mealplanner_meal::MealInput;
use mealplanner_person::PersonInput;
use mealplanner_rating::RatingInput;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};

pub struct TestState {
    pub pool: SqlitePool,
}

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<TestState> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    mealplanner_db::migrator::<sqlx::Sqlite>()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    Ok(TestState { pool })
}

pub async fn create_meal(pool: &SqlitePool, title: &str) -> anyhow::Result<String> {
    let id = mealplanner_meal::Command(pool.clone())
        .create(MealInput {
            title: title.to_owned(),
            description: None,
            ingredients: vec![],
            prep_time_minutes: None,
            cook_time_minutes: None,
            effort: None,
            image_url: None,
        })
        .await?;

    Ok(id)
}

pub async fn create_person(pool: &SqlitePool, name: &str) -> anyhow::Result<String> {
    let id = mealplanner_person::Command(pool.clone())
        .create(PersonInput {
            name: name.to_owned(),
            eating_preferences: None,
            cooking_preferences: None,
        })
        .await?;

    Ok(id)
}

pub fn input(meal_id: &str, person_id: &str, rating: u8) -> RatingInput {
    RatingInput {
        meal_id: meal_id.to_owned(),
        person_id: person_id.to_owned(),
        rating,
        comment: None,
    }
}
