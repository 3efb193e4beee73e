use std::{
    collections::{BTreeMap, HashMap},
    str::FromStr,
};

use mealplanner_db::table::{MealPlan as MealPlanTable, MealPlanEntry as MealPlanEntryTable};
use mealplanner_shared::{
    meal::Meal,
    mealplan::{MealPlan, MealPlanEntry, MealType},
    person::Person,
};
use sea_query::{Expr, ExprTrait, Order, SelectStatement, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::prelude::FromRow;
use time::Date;

#[derive(FromRow)]
pub struct PlanRow {
    pub id: String,
    pub week_start: i32,
    pub day_notes: sqlx::types::Json<BTreeMap<String, String>>,
}

#[derive(FromRow)]
pub struct EntryRow {
    pub id: String,
    pub meal_plan_id: String,
    pub meal_id: Option<String>,
    pub day_of_week: String,
    pub meal_type: Option<String>,
    pub display_order: i32,
    pub assigned_cook_id: Option<String>,
}

impl EntryRow {
    fn into_entry(
        self,
        meals: &HashMap<String, Meal>,
        people: &HashMap<String, Person>,
    ) -> MealPlanEntry {
        let meal_type = self.meal_type.and_then(|t| match MealType::from_str(&t) {
            Ok(t) => Some(t),
            Err(_) => {
                tracing::warn!(entry = %self.id, meal_type = %t, "unknown meal type ignored");
                None
            }
        });

        MealPlanEntry {
            meal: self.meal_id.and_then(|id| meals.get(&id).cloned()),
            assigned_cook: self.assigned_cook_id.and_then(|id| people.get(&id).cloned()),
            id: self.id,
            day_of_week: self.day_of_week,
            meal_type,
            display_order: self.display_order,
        }
    }
}

#[derive(Clone)]
pub struct Query(pub sqlx::SqlitePool);

impl Query {
    pub async fn find(&self, id: impl Into<String>) -> anyhow::Result<Option<MealPlan>> {
        let id = id.into();
        let statement = select_plans()
            .and_where(Expr::col(MealPlanTable::Id).eq(&id))
            .limit(1)
            .to_owned();

        Ok(self.fetch_plans(statement).await?.pop())
    }

    pub async fn find_by_week_start(&self, week_start: Date) -> anyhow::Result<Option<MealPlan>> {
        let statement = select_plans()
            .and_where(Expr::col(MealPlanTable::WeekStart).eq(week_start.to_julian_day()))
            .limit(1)
            .to_owned();

        Ok(self.fetch_plans(statement).await?.pop())
    }

    /// All plans, most recent week first.
    pub async fn find_all(&self) -> anyhow::Result<Vec<MealPlan>> {
        let statement = select_plans()
            .order_by_expr(Expr::col(MealPlanTable::WeekStart), Order::Desc)
            .to_owned();

        self.fetch_plans(statement).await
    }

    pub async fn filter_week_start_between(
        &self,
        from: Date,
        to: Date,
    ) -> anyhow::Result<Vec<MealPlan>> {
        let statement = select_plans()
            .and_where(Expr::col(MealPlanTable::WeekStart).gte(from.to_julian_day()))
            .and_where(Expr::col(MealPlanTable::WeekStart).lte(to.to_julian_day()))
            .order_by_expr(Expr::col(MealPlanTable::WeekStart), Order::Asc)
            .to_owned();

        self.fetch_plans(statement).await
    }

    pub async fn find_entry(&self, id: impl Into<String>) -> anyhow::Result<Option<MealPlanEntry>> {
        let id = id.into();
        let statement = select_entries()
            .and_where(Expr::col(MealPlanEntryTable::Id).eq(&id))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let Some(row) = sqlx::query_as_with::<_, EntryRow, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?
        else {
            return Ok(None);
        };

        let rows = std::slice::from_ref(&row);
        let meals = self.load_meals(rows).await?;
        let people = self.load_people(rows).await?;

        Ok(Some(row.into_entry(&meals, &people)))
    }

    async fn fetch_plans(&self, statement: SelectStatement) -> anyhow::Result<Vec<MealPlan>> {
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let plans = sqlx::query_as_with::<_, PlanRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?;

        if plans.is_empty() {
            return Ok(vec![]);
        }

        let statement = select_entries()
            .and_where(
                Expr::col(MealPlanEntryTable::MealPlanId)
                    .is_in(plans.iter().map(|p| p.id.to_owned())),
            )
            .order_by_expr(Expr::col(MealPlanEntryTable::DisplayOrder), Order::Asc)
            .order_by_expr(Expr::cust("rowid"), Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let entries = sqlx::query_as_with::<_, EntryRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?;

        let meals = self.load_meals(&entries).await?;
        let people = self.load_people(&entries).await?;

        let mut entries_by_plan: HashMap<String, Vec<MealPlanEntry>> = HashMap::new();
        for row in entries {
            entries_by_plan
                .entry(row.meal_plan_id.to_owned())
                .or_default()
                .push(row.into_entry(&meals, &people));
        }

        plans
            .into_iter()
            .map(|row| -> anyhow::Result<MealPlan> {
                Ok(MealPlan {
                    entries: entries_by_plan.remove(&row.id).unwrap_or_default(),
                    week_start_date: Date::from_julian_day(row.week_start)?,
                    day_notes: row.day_notes.0,
                    id: row.id,
                })
            })
            .collect()
    }

    async fn load_meals(&self, entries: &[EntryRow]) -> anyhow::Result<HashMap<String, Meal>> {
        let mut ids = entries
            .iter()
            .filter_map(|e| e.meal_id.to_owned())
            .collect::<Vec<_>>();
        ids.sort();
        ids.dedup();

        Ok(mealplanner_meal::Query(self.0.clone())
            .find_many(ids)
            .await?
            .into_iter()
            .map(|meal| (meal.id.to_owned(), meal))
            .collect())
    }

    async fn load_people(&self, entries: &[EntryRow]) -> anyhow::Result<HashMap<String, Person>> {
        let mut ids = entries
            .iter()
            .filter_map(|e| e.assigned_cook_id.to_owned())
            .collect::<Vec<_>>();
        ids.sort();
        ids.dedup();

        Ok(mealplanner_person::Query(self.0.clone())
            .find_many(ids)
            .await?
            .into_iter()
            .map(|person| (person.id.to_owned(), person))
            .collect())
    }
}

fn select_plans() -> SelectStatement {
    sea_query::Query::select()
        .columns([
            MealPlanTable::Id,
            MealPlanTable::WeekStart,
            MealPlanTable::DayNotes,
        ])
        .from(MealPlanTable::Table)
        .to_owned()
}

fn select_entries() -> SelectStatement {
    sea_query::Query::select()
        .columns([
            MealPlanEntryTable::Id,
            MealPlanEntryTable::MealPlanId,
            MealPlanEntryTable::MealId,
            MealPlanEntryTable::DayOfWeek,
            MealPlanEntryTable::MealType,
            MealPlanEntryTable::DisplayOrder,
            MealPlanEntryTable::AssignedCookId,
        ])
        .from(MealPlanEntryTable::Table)
        .to_owned()
}
