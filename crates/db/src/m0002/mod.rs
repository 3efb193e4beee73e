mod meal_plan_entry;
mod meal_rating;
mod person;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "mealplanner",
    "m0002",
    vec_box![("mealplanner", "m0001")],
    vec_box![
        person::CreateTable,
        meal_rating::CreateTable,
        meal_rating::CreateIdx1,
        meal_plan_entry::AddAssignedCook,
    ]
);
