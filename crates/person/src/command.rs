use mealplanner_db::table::{MealPlanEntry, MealRating, Person};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use sqlx::SqlitePool;
use ulid::Ulid;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PersonInput {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    #[validate(length(
        max = 1000,
        message = "Eating preferences must be at most 1000 characters"
    ))]
    pub eating_preferences: Option<String>,

    #[validate(length(
        max = 1000,
        message = "Cooking preferences must be at most 1000 characters"
    ))]
    pub cooking_preferences: Option<String>,
}

#[derive(Clone)]
pub struct Command(pub SqlitePool);

impl Command {
    #[tracing::instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: PersonInput) -> mealplanner_shared::Result<String> {
        input.validate()?;

        let id = Ulid::new().to_string();
        let mut statement = Query::insert()
            .into_table(Person::Table)
            .columns([
                Person::Id,
                Person::Name,
                Person::EatingPreferences,
                Person::CookingPreferences,
            ])
            .to_owned();

        statement.values_panic([
            id.to_owned().into(),
            input.name.into(),
            input.eating_preferences.into(),
            input.cooking_preferences.into(),
        ]);

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.0).await?;

        Ok(id)
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn update(&self, id: &str, input: PersonInput) -> mealplanner_shared::Result<()> {
        input.validate()?;

        let statement = Query::update()
            .table(Person::Table)
            .values([
                (Person::Name, input.name.into()),
                (Person::EatingPreferences, input.eating_preferences.into()),
                (Person::CookingPreferences, input.cooking_preferences.into()),
            ])
            .and_where(Expr::col(Person::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.0).await?;

        if result.rows_affected() == 0 {
            mealplanner_shared::not_found!("Person not found with id: {id}");
        }

        Ok(())
    }

    /// Deletes a person with their ratings. Entries they cooked lose their cook.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> mealplanner_shared::Result<()> {
        let mut tx = self.0.begin().await?;

        let statement = Query::update()
            .table(MealPlanEntry::Table)
            .values([(MealPlanEntry::AssignedCookId, Option::<String>::None.into())])
            .and_where(Expr::col(MealPlanEntry::AssignedCookId).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        let statement = Query::delete()
            .from_table(MealRating::Table)
            .and_where(Expr::col(MealRating::PersonId).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        let statement = Query::delete()
            .from_table(Person::Table)
            .and_where(Expr::col(Person::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        tx.commit().await?;

        Ok(())
    }
}
