use std::collections::HashMap;

use mealplanner_db::table::MealRating as MealRatingTable;
use mealplanner_shared::{person::Person, rating::MealRating};
use sea_query::{Expr, ExprTrait, Func, Order, SelectStatement, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::prelude::FromRow;
use time::Date;

#[derive(FromRow)]
pub struct RatingRow {
    pub id: String,
    pub meal_id: String,
    pub person_id: String,
    pub rating: u8,
    pub comment: Option<String>,
    pub rated_date: i32,
}

impl RatingRow {
    fn into_rating(self, people: &HashMap<String, Person>) -> anyhow::Result<Option<MealRating>> {
        let Some(person) = people.get(&self.person_id).cloned() else {
            tracing::warn!(rating = %self.id, person_id = %self.person_id, "rating without person ignored");
            return Ok(None);
        };

        Ok(Some(MealRating {
            rated_date: Date::from_julian_day(self.rated_date)?,
            id: self.id,
            meal_id: self.meal_id,
            person,
            rating: self.rating,
            comment: self.comment,
        }))
    }
}

/// Keeps one rating per person, the one with the latest date. Earlier rows
/// win ties, and people stay in the order they first appear.
pub fn latest_per_person(ratings: Vec<MealRating>) -> Vec<MealRating> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut latest: Vec<MealRating> = vec![];

    for rating in ratings {
        match positions.get(&rating.person.id) {
            Some(&pos) => {
                if rating.rated_date > latest[pos].rated_date {
                    latest[pos] = rating;
                }
            }
            None => {
                positions.insert(rating.person.id.to_owned(), latest.len());
                latest.push(rating);
            }
        }
    }

    latest
}

#[derive(Clone)]
pub struct Query(pub sqlx::SqlitePool);

impl Query {
    pub async fn find(&self, id: impl Into<String>) -> anyhow::Result<Option<MealRating>> {
        let id = id.into();
        let statement = select()
            .and_where(Expr::col(MealRatingTable::Id).eq(&id))
            .limit(1)
            .to_owned();

        Ok(self.fetch_all(statement).await?.pop())
    }

    /// Current rating of each person who rated the meal.
    pub async fn find_by_meal(&self, meal_id: impl Into<String>) -> anyhow::Result<Vec<MealRating>> {
        let meal_id = meal_id.into();
        let statement = select()
            .and_where(Expr::col(MealRatingTable::MealId).eq(&meal_id))
            .order_by_expr(Expr::cust("rowid"), Order::Asc)
            .to_owned();

        Ok(latest_per_person(self.fetch_all(statement).await?))
    }

    /// Mean of every stored rating of the meal, `None` when it has none.
    pub async fn average_rating(&self, meal_id: impl Into<String>) -> anyhow::Result<Option<f64>> {
        let meal_id = meal_id.into();
        let statement = sea_query::Query::select()
            .expr(Func::avg(Expr::col(MealRatingTable::Rating)))
            .from(MealRatingTable::Table)
            .and_where(Expr::col(MealRatingTable::MealId).eq(&meal_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_scalar_with::<_, Option<f64>, _>(&sql, values)
            .fetch_one(&self.0)
            .await?)
    }

    async fn fetch_all(&self, statement: SelectStatement) -> anyhow::Result<Vec<MealRating>> {
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, RatingRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?;

        let mut ids = rows
            .iter()
            .map(|r| r.person_id.to_owned())
            .collect::<Vec<_>>();
        ids.sort();
        ids.dedup();

        let people = mealplanner_person::Query(self.0.clone())
            .find_many(ids)
            .await?
            .into_iter()
            .map(|person| (person.id.to_owned(), person))
            .collect::<HashMap<_, _>>();

        let mut ratings = vec![];
        for row in rows {
            if let Some(rating) = row.into_rating(&people)? {
                ratings.push(rating);
            }
        }

        Ok(ratings)
    }
}

fn select() -> SelectStatement {
    sea_query::Query::select()
        .columns([
            MealRatingTable::Id,
            MealRatingTable::MealId,
            MealRatingTable::PersonId,
            MealRatingTable::Rating,
            MealRatingTable::Comment,
            MealRatingTable::RatedDate,
        ])
        .from(MealRatingTable::Table)
        .to_owned()
}
