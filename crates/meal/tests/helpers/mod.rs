use std::{path::PathBuf, str::FromStr};

use mealplanner_meal::MealInput;
use mealplanner_shared::meal::Ingredient;
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

pub fn input(title: &str) -> MealInput {
    MealInput {
        title: title.to_owned(),
        description: Some(format!("{title} description")),
        ingredients: vec![
            Ingredient::new("onions", 2.0, "pcs"),
            Ingredient::new("salt", 1.0, "pinch"),
        ],
        prep_time_minutes: Some(10),
        cook_time_minutes: Some(25),
        effort: None,
        image_url: None,
    }
}
