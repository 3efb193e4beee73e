use mealplanner_mealplan::PlanStore;
use time::{Date, Weekday};

use crate::{ShoppingItem, build, collect_for_plan, collect_for_range};

/// Shopping lists over the plans of a [`PlanStore`].
#[derive(Clone)]
pub struct ShoppingList<S> {
    store: S,
    week_start: Weekday,
}

impl<S: PlanStore> ShoppingList<S> {
    pub fn new(store: S, week_start: Weekday) -> Self {
        Self { store, week_start }
    }

    /// Shopping list of a single plan.
    #[tracing::instrument(skip(self))]
    pub async fn generate_shopping_list(
        &self,
        plan_id: &str,
    ) -> mealplanner_shared::Result<Vec<ShoppingItem>> {
        let entries = collect_for_plan(&self.store, plan_id).await?;

        Ok(build(&entries))
    }

    /// Shopping list of every planned meal dated within `start..=end`.
    #[tracing::instrument(skip(self))]
    pub async fn generate_shopping_list_for_range(
        &self,
        start: Date,
        end: Date,
    ) -> mealplanner_shared::Result<Vec<ShoppingItem>> {
        let entries = collect_for_range(&self.store, start, end, self.week_start).await?;

        Ok(build(&entries))
    }
}
