use std::{path::PathBuf, str::FromStr};

use mealplanner_person::PersonInput;
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

pub fn input(name: &str) -> PersonInput {
    PersonInput {
        name: name.to_owned(),
        eating_preferences: Some("no mushrooms".to_owned()),
        cooking_preferences: None,
    }
}
