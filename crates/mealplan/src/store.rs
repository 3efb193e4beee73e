use mealplanner_shared::mealplan::MealPlan;
use time::Date;

/// Read access to stored meal plans, as needed to build shopping lists.
#[async_trait::async_trait]
pub trait PlanStore: Send + Sync {
    async fn find_plan_by_id(&self, id: &str) -> anyhow::Result<Option<MealPlan>>;

    /// Plans whose week start lies in `from..=to`, ordered by week start.
    async fn find_plans_by_week_start_in(
        &self,
        from: Date,
        to: Date,
    ) -> anyhow::Result<Vec<MealPlan>>;
}

#[async_trait::async_trait]
impl PlanStore for crate::Query {
    async fn find_plan_by_id(&self, id: &str) -> anyhow::Result<Option<MealPlan>> {
        self.find(id).await
    }

    async fn find_plans_by_week_start_in(
        &self,
        from: Date,
        to: Date,
    ) -> anyhow::Result<Vec<MealPlan>> {
        self.filter_week_start_between(from, to).await
    }
}
