mod command;
mod date;
pub mod meal;
pub mod mealplan;
pub mod person;
pub mod rating;

pub use command::*;
pub use date::*;
