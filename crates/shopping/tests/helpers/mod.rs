use std::{collections::BTreeMap, path::PathBuf, str::FromStr};

use mealplanner_mealplan::PlanStore;
use mealplanner_shared::{
    meal::{Ingredient, Meal},
    mealplan::{MealPlan, MealPlanEntry},
};
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};
use time::Date;

#[allow(dead_code)]
pub struct TestState {
    pub pool: SqlitePool,
}

#[allow(dead_code)]
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

/// Plans held in memory, standing in for the SQLite store.
#[derive(Default)]
pub struct MemoryStore(pub Vec<MealPlan>);

#[async_trait::async_trait]
impl PlanStore for MemoryStore {
    async fn find_plan_by_id(&self, id: &str) -> anyhow::Result<Option<MealPlan>> {
        Ok(self.0.iter().find(|p| p.id == id).cloned())
    }

    async fn find_plans_by_week_start_in(
        &self,
        from: Date,
        to: Date,
    ) -> anyhow::Result<Vec<MealPlan>> {
        let mut plans = self
            .0
            .iter()
            .filter(|p| from <= p.week_start_date && p.week_start_date <= to)
            .cloned()
            .collect::<Vec<_>>();
        plans.sort_by_key(|p| p.week_start_date);

        Ok(plans)
    }
}

#[allow(dead_code)]
pub fn meal(title: &str, ingredients: &[(&str, f64, &str)]) -> Meal {
    Meal {
        id: format!("meal-{title}"),
        title: title.to_owned(),
        ingredients: ingredients
            .iter()
            .map(|(name, quantity, unit)| Ingredient::new(*name, *quantity, *unit))
            .collect(),
        ..Default::default()
    }
}

#[allow(dead_code)]
pub fn entry(id: &str, day: &str, meal: Option<Meal>) -> MealPlanEntry {
    MealPlanEntry {
        id: id.to_owned(),
        meal,
        day_of_week: day.to_owned(),
        meal_type: None,
        display_order: 0,
        assigned_cook: None,
    }
}

#[allow(dead_code)]
pub fn plan(id: &str, week_start_date: Date, entries: Vec<MealPlanEntry>) -> MealPlan {
    MealPlan {
        id: id.to_owned(),
        week_start_date,
        entries,
        day_notes: BTreeMap::new(),
    }
}
