use mealplanner_mealplan::PlanStore;
use mealplanner_shared::{invalid, mealplan::MealPlanEntry, not_found};
use time::{Date, Duration, Weekday};

/// Every entry of one plan, whatever day it falls on.
pub async fn collect_for_plan<S: PlanStore + ?Sized>(
    store: &S,
    plan_id: &str,
) -> mealplanner_shared::Result<Vec<MealPlanEntry>> {
    match store.find_plan_by_id(plan_id).await? {
        Some(plan) => Ok(plan.entries),
        None => not_found!("Meal plan not found with id: {plan_id}"),
    }
}

/// Entries whose calendar date lies in `start..=end`.
///
/// A week that starts up to six days before `start` can still reach into the
/// range, so plans are fetched from `start - 6 days` and filtered by their
/// entries' reconstructed dates.
pub async fn collect_for_range<S: PlanStore + ?Sized>(
    store: &S,
    start: Date,
    end: Date,
    week_start: Weekday,
) -> mealplanner_shared::Result<Vec<MealPlanEntry>> {
    if start > end {
        invalid!("start date {start} is after end date {end}");
    }

    let search_from = start.checked_sub(Duration::days(6)).unwrap_or(Date::MIN);
    let plans = store.find_plans_by_week_start_in(search_from, end).await?;

    let mut entries = vec![];
    for plan in plans {
        for entry in plan.entries.iter() {
            let Some(date) = plan.entry_date(entry, week_start) else {
                tracing::warn!(
                    plan_id = plan.id,
                    day = entry.day_of_week,
                    "entry date out of range, skipping"
                );
                continue;
            };

            if start <= date && date <= end {
                entries.push(entry.clone());
            }
        }
    }

    tracing::debug!(
        %start,
        %end,
        entries = entries.len(),
        "Collected plan entries in range"
    );

    Ok(entries)
}
