mod meal;
mod meal_plan;
mod meal_plan_entry;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "mealplanner",
    "m0001",
    vec_box![],
    vec_box![
        meal::CreateTable,
        meal_plan::CreateTable,
        meal_plan::CreateUk1,
        meal_plan_entry::CreateTable,
        meal_plan_entry::CreateIdx1,
    ]
);
