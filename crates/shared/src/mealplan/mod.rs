use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};
use time::{Date, Weekday};

use crate::{meal::Meal, person::Person};

#[derive(
    EnumString,
    Display,
    AsRefStr,
    VariantArray,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanEntry {
    pub id: String,
    pub meal: Option<Meal>,
    /// Raw stored day name, see [`crate::DayOfWeek`].
    pub day_of_week: String,
    pub meal_type: Option<MealType>,
    pub display_order: i32,
    pub assigned_cook: Option<Person>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MealPlan {
    pub id: String,
    pub week_start_date: Date,
    pub entries: Vec<MealPlanEntry>,
    pub day_notes: BTreeMap<String, String>,
}

impl MealPlan {
    /// Calendar date an entry of this plan falls on, `None` when it lies past
    /// the last representable date.
    pub fn entry_date(&self, entry: &MealPlanEntry, week_start: Weekday) -> Option<Date> {
        crate::entry_date(self.week_start_date, &entry.day_of_week, week_start)
    }
}
