use mealplanner_db::table::MealRating;
use mealplanner_shared::not_found;
use sea_query::{Expr, ExprTrait, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use sqlx::SqlitePool;
use time::{Date, OffsetDateTime};
use ulid::Ulid;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RatingInput {
    pub meal_id: String,
    pub person_id: String,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: u8,

    #[validate(length(max = 1000, message = "Comment must be at most 1000 characters"))]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RatingUpdate {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: u8,

    #[validate(length(max = 1000, message = "Comment must be at most 1000 characters"))]
    pub comment: Option<String>,
}

#[derive(Clone)]
pub struct Command(pub SqlitePool);

impl Command {
    /// Records a person's rating of a meal dated today, replacing the rating
    /// they already gave it. Returns the rating id.
    pub async fn create(&self, input: RatingInput) -> mealplanner_shared::Result<String> {
        self.create_on(input, OffsetDateTime::now_utc().date()).await
    }

    #[tracing::instrument(skip(self, input), fields(meal_id = %input.meal_id, person_id = %input.person_id))]
    pub async fn create_on(
        &self,
        input: RatingInput,
        rated_date: Date,
    ) -> mealplanner_shared::Result<String> {
        input.validate()?;

        if mealplanner_meal::Query(self.0.clone())
            .find(&input.meal_id)
            .await?
            .is_none()
        {
            not_found!("Meal not found with id: {}", input.meal_id);
        }

        if mealplanner_person::Query(self.0.clone())
            .find(&input.person_id)
            .await?
            .is_none()
        {
            not_found!("Person not found with id: {}", input.person_id);
        }

        let statement = Query::select()
            .column(MealRating::Id)
            .from(MealRating::Table)
            .and_where(Expr::col(MealRating::MealId).eq(&input.meal_id))
            .and_where(Expr::col(MealRating::PersonId).eq(&input.person_id))
            .order_by_expr(Expr::cust("rowid"), Order::Asc)
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let existing = sqlx::query_scalar_with::<_, String, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?;

        if let Some(id) = existing {
            let statement = Query::update()
                .table(MealRating::Table)
                .values([
                    (MealRating::Rating, i32::from(input.rating).into()),
                    (MealRating::Comment, input.comment.into()),
                    (MealRating::RatedDate, rated_date.to_julian_day().into()),
                ])
                .and_where(Expr::col(MealRating::Id).eq(&id))
                .to_owned();

            let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
            sqlx::query_with(&sql, values).execute(&self.0).await?;

            tracing::info!(rating_id = %id, "Rating replaced");

            return Ok(id);
        }

        let id = Ulid::new().to_string();
        let mut statement = Query::insert()
            .into_table(MealRating::Table)
            .columns([
                MealRating::Id,
                MealRating::MealId,
                MealRating::PersonId,
                MealRating::Rating,
                MealRating::Comment,
                MealRating::RatedDate,
            ])
            .to_owned();

        statement.values_panic([
            id.to_owned().into(),
            input.meal_id.into(),
            input.person_id.into(),
            i32::from(input.rating).into(),
            input.comment.into(),
            rated_date.to_julian_day().into(),
        ]);

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.0).await?;

        Ok(id)
    }

    /// Changes score and comment. The rated date stays as it was.
    #[tracing::instrument(skip(self, input))]
    pub async fn update(&self, id: &str, input: RatingUpdate) -> mealplanner_shared::Result<()> {
        input.validate()?;

        let statement = Query::update()
            .table(MealRating::Table)
            .values([
                (MealRating::Rating, i32::from(input.rating).into()),
                (MealRating::Comment, input.comment.into()),
            ])
            .and_where(Expr::col(MealRating::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.0).await?;

        if result.rows_affected() == 0 {
            not_found!("Rating not found with id: {id}");
        }

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> mealplanner_shared::Result<()> {
        let statement = Query::delete()
            .from_table(MealRating::Table)
            .and_where(Expr::col(MealRating::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.0).await?;

        if result.rows_affected() == 0 {
            not_found!("Rating not found with id: {id}");
        }

        Ok(())
    }
}
