use std::{collections::BTreeMap, str::FromStr};

use mealplanner_db::table::{MealPlan as MealPlanTable, MealPlanEntry as MealPlanEntryTable};
use mealplanner_shared::{
    DayOfWeek, invalid,
    mealplan::{MealPlan, MealPlanEntry, MealType},
    not_found,
};
use sea_query::{Expr, ExprTrait, OnConflict, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use sqlx::SqlitePool;
use time::{Date, Weekday};
use ulid::Ulid;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryInput {
    pub meal_id: String,
    pub day_of_week: String,
    pub meal_type: String,
    pub display_order: Option<i32>,
    pub assigned_cook_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryUpdate {
    pub meal_id: Option<String>,
    pub day_of_week: Option<String>,
    pub meal_type: Option<String>,
    pub display_order: Option<i32>,
    pub assigned_cook_id: Option<String>,
}

fn parse_meal_type(value: &str) -> mealplanner_shared::Result<MealType> {
    match MealType::from_str(value.trim()) {
        Ok(meal_type) => Ok(meal_type),
        Err(_) => invalid!("unknown meal type '{value}'"),
    }
}

#[derive(Clone)]
pub struct Command(pub SqlitePool);

impl Command {
    fn query(&self) -> crate::Query {
        crate::Query(self.0.clone())
    }

    async fn ensure_meal(&self, meal_id: &str) -> mealplanner_shared::Result<()> {
        if mealplanner_meal::Query(self.0.clone())
            .find(meal_id)
            .await?
            .is_none()
        {
            not_found!("Meal not found with id: {meal_id}");
        }

        Ok(())
    }

    async fn ensure_person(&self, person_id: &str) -> mealplanner_shared::Result<()> {
        if mealplanner_person::Query(self.0.clone())
            .find(person_id)
            .await?
            .is_none()
        {
            not_found!("Person not found with id: {person_id}");
        }

        Ok(())
    }

    /// Returns the plan of the week containing `date`, creating an empty one
    /// when that week has none yet.
    #[tracing::instrument(skip(self))]
    pub async fn get_or_create_for_week(
        &self,
        date: Date,
        week_start: Weekday,
    ) -> mealplanner_shared::Result<MealPlan> {
        let week_start_date = mealplanner_shared::week_start(date, week_start)?;

        if let Some(plan) = self.query().find_by_week_start(week_start_date).await? {
            return Ok(plan);
        }

        let mut statement = sea_query::Query::insert()
            .into_table(MealPlanTable::Table)
            .columns([
                MealPlanTable::Id,
                MealPlanTable::WeekStart,
                MealPlanTable::DayNotes,
            ])
            .to_owned();

        statement.values_panic([
            Ulid::new().to_string().into(),
            week_start_date.to_julian_day().into(),
            "{}".into(),
        ]);

        statement.on_conflict(
            OnConflict::column(MealPlanTable::WeekStart)
                .do_nothing()
                .to_owned(),
        );

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.0).await?;

        tracing::info!(week_start = %week_start_date, "Meal plan created");

        match self.query().find_by_week_start(week_start_date).await? {
            Some(plan) => Ok(plan),
            None => Err(anyhow::anyhow!("meal plan for week {week_start_date} vanished").into()),
        }
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn add_entry(
        &self,
        plan_id: &str,
        input: EntryInput,
    ) -> mealplanner_shared::Result<MealPlanEntry> {
        let Some(plan) = self.query().find(plan_id).await? else {
            not_found!("Meal plan not found with id: {plan_id}");
        };

        let day = DayOfWeek::parse(&input.day_of_week)?;
        let meal_type = parse_meal_type(&input.meal_type)?;
        self.ensure_meal(&input.meal_id).await?;
        if let Some(cook_id) = &input.assigned_cook_id {
            self.ensure_person(cook_id).await?;
        }

        let display_order = match input.display_order {
            Some(order) => order,
            None => plan
                .entries
                .iter()
                .filter(|e| DayOfWeek::parse(&e.day_of_week).ok() == Some(day))
                .count()
                .try_into()
                .map_err(anyhow::Error::from)?,
        };

        let id = Ulid::new().to_string();
        let mut statement = sea_query::Query::insert()
            .into_table(MealPlanEntryTable::Table)
            .columns([
                MealPlanEntryTable::Id,
                MealPlanEntryTable::MealPlanId,
                MealPlanEntryTable::MealId,
                MealPlanEntryTable::DayOfWeek,
                MealPlanEntryTable::MealType,
                MealPlanEntryTable::DisplayOrder,
                MealPlanEntryTable::AssignedCookId,
            ])
            .to_owned();

        statement.values_panic([
            id.to_owned().into(),
            plan.id.into(),
            input.meal_id.into(),
            day.to_string().into(),
            meal_type.to_string().into(),
            display_order.into(),
            input.assigned_cook_id.into(),
        ]);

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.0).await?;

        self.load_entry(&id).await
    }

    /// Applies the fields present in `input`, leaving the others untouched.
    #[tracing::instrument(skip(self, input))]
    pub async fn update_entry(
        &self,
        entry_id: &str,
        input: EntryUpdate,
    ) -> mealplanner_shared::Result<MealPlanEntry> {
        if self.query().find_entry(entry_id).await?.is_none() {
            not_found!("Entry not found with id: {entry_id}");
        }

        let mut values: Vec<(MealPlanEntryTable, Expr)> = vec![];

        if let Some(day_of_week) = input.day_of_week {
            let day = DayOfWeek::parse(&day_of_week)?;
            values.push((MealPlanEntryTable::DayOfWeek, day.to_string().into()));
        }

        if let Some(meal_type) = input.meal_type {
            let meal_type = parse_meal_type(&meal_type)?;
            values.push((MealPlanEntryTable::MealType, meal_type.to_string().into()));
        }

        if let Some(meal_id) = input.meal_id {
            self.ensure_meal(&meal_id).await?;
            values.push((MealPlanEntryTable::MealId, meal_id.into()));
        }

        if let Some(display_order) = input.display_order {
            values.push((MealPlanEntryTable::DisplayOrder, display_order.into()));
        }

        if let Some(cook_id) = input.assigned_cook_id {
            self.ensure_person(&cook_id).await?;
            values.push((MealPlanEntryTable::AssignedCookId, cook_id.into()));
        }

        if !values.is_empty() {
            let statement = sea_query::Query::update()
                .table(MealPlanEntryTable::Table)
                .values(values)
                .and_where(Expr::col(MealPlanEntryTable::Id).eq(entry_id))
                .to_owned();

            let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
            sqlx::query_with(&sql, values).execute(&self.0).await?;
        }

        self.load_entry(entry_id).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_entry(&self, entry_id: &str) -> mealplanner_shared::Result<()> {
        let statement = sea_query::Query::delete()
            .from_table(MealPlanEntryTable::Table)
            .and_where(Expr::col(MealPlanEntryTable::Id).eq(entry_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.0).await?;

        if result.rows_affected() == 0 {
            not_found!("Entry not found with id: {entry_id}");
        }

        Ok(())
    }

    /// Replaces the plan's day notes. Keys are normalized to stored day names.
    #[tracing::instrument(skip(self, notes))]
    pub async fn update_day_notes(
        &self,
        plan_id: &str,
        notes: BTreeMap<String, String>,
    ) -> mealplanner_shared::Result<MealPlan> {
        let mut day_notes = BTreeMap::new();
        for (day, note) in notes {
            day_notes.insert(DayOfWeek::parse(&day)?.to_string(), note);
        }

        let statement = sea_query::Query::update()
            .table(MealPlanTable::Table)
            .values([(
                MealPlanTable::DayNotes,
                serde_json::to_string(&day_notes)?.into(),
            )])
            .and_where(Expr::col(MealPlanTable::Id).eq(plan_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.0).await?;

        if result.rows_affected() == 0 {
            not_found!("Meal plan not found with id: {plan_id}");
        }

        match self.query().find(plan_id).await? {
            Some(plan) => Ok(plan),
            None => not_found!("Meal plan not found with id: {plan_id}"),
        }
    }

    async fn load_entry(&self, entry_id: &str) -> mealplanner_shared::Result<MealPlanEntry> {
        match self.query().find_entry(entry_id).await? {
            Some(entry) => Ok(entry),
            None => not_found!("Entry not found with id: {entry_id}"),
        }
    }
}
