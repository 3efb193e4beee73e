use serde::{Deserialize, Serialize};
use time::Date;

use crate::person::Person;

/// One person's score for a meal, from 1 to 5.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MealRating {
    pub id: String,
    pub meal_id: String,
    pub person: Person,
    pub rating: u8,
    pub comment: Option<String>,
    pub rated_date: Date,
}
