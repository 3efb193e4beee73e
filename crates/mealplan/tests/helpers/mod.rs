#![allow(dead_code)]

use std::{path::PathBuf, str::FromStr};

use mealplanner_meal::MealInput;
use mealplanner_mealplan::EntryInput;
use mealplanner_person::PersonInput;
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

pub async fn create_meal(pool: &SqlitePool, title: &str) -> anyhow::Result<String> {
    let id = mealplanner_meal::Command(pool.clone())
        .create(MealInput {
            title: title.to_owned(),
            description: None,
            ingredients: vec![Ingredient::new("rice", 1.0, "cup")],
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
            cooking_preferences: Some("quick dinners".to_owned()),
        })
        .await?;

    Ok(id)
}

pub fn entry(meal_id: &str, day: &str, meal_type: &str) -> EntryInput {
    EntryInput {
        meal_id: meal_id.to_owned(),
        day_of_week: day.to_owned(),
        meal_type: meal_type.to_owned(),
        display_order: None,
        assigned_cook_id: None,
    }
}
