use mealplanner_db::table::Person as PersonTable;
use mealplanner_shared::person::Person;
use sea_query::{Expr, ExprTrait, Order, SelectStatement, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::prelude::FromRow;

#[derive(FromRow)]
pub struct PersonRow {
    pub id: String,
    pub name: String,
    pub eating_preferences: Option<String>,
    pub cooking_preferences: Option<String>,
}

impl From<PersonRow> for Person {
    fn from(row: PersonRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            eating_preferences: row.eating_preferences,
            cooking_preferences: row.cooking_preferences,
        }
    }
}

#[derive(Clone)]
pub struct Query(pub sqlx::SqlitePool);

impl Query {
    pub async fn find(&self, id: impl Into<String>) -> anyhow::Result<Option<Person>> {
        let id = id.into();
        let statement = select()
            .and_where(Expr::col(PersonTable::Id).eq(&id))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, PersonRow, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?
            .map(Into::into))
    }

    pub async fn list(&self) -> anyhow::Result<Vec<Person>> {
        let statement = select()
            .order_by_expr(Expr::col(PersonTable::Name), Order::Asc)
            .to_owned();

        self.fetch_all(statement).await
    }

    pub async fn find_many(&self, ids: Vec<String>) -> anyhow::Result<Vec<Person>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let statement = select()
            .and_where(Expr::col(PersonTable::Id).is_in(ids))
            .to_owned();

        self.fetch_all(statement).await
    }

    async fn fetch_all(&self, statement: SelectStatement) -> anyhow::Result<Vec<Person>> {
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, PersonRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }
}

fn select() -> SelectStatement {
    sea_query::Query::select()
        .columns([
            PersonTable::Id,
            PersonTable::Name,
            PersonTable::EatingPreferences,
            PersonTable::CookingPreferences,
        ])
        .from(PersonTable::Table)
        .to_owned()
}
