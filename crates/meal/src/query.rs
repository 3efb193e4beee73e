use mealplanner_db::table::Meal as MealTable;
use mealplanner_shared::meal::{Effort, Ingredient, Meal};
use sea_query::{Expr, ExprTrait, Func, Order, SelectStatement, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::prelude::FromRow;

#[derive(FromRow)]
pub struct MealRow {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub ingredients: sqlx::types::Json<Vec<Ingredient>>,
    pub prep_time_minutes: Option<u32>,
    pub cook_time_minutes: Option<u32>,
    pub effort: Option<sqlx::types::Text<Effort>>,
    pub image_url: Option<String>,
}

impl From<MealRow> for Meal {
    fn from(row: MealRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            ingredients: row.ingredients.0,
            prep_time_minutes: row.prep_time_minutes,
            cook_time_minutes: row.cook_time_minutes,
            effort: row.effort.map(|e| e.0),
            image_url: row.image_url,
        }
    }
}

#[derive(Clone)]
pub struct Query(pub sqlx::SqlitePool);

impl Query {
    pub async fn find(&self, id: impl Into<String>) -> anyhow::Result<Option<Meal>> {
        let id = id.into();
        let statement = select()
            .and_where(Expr::col(MealTable::Id).eq(&id))
            .limit(1)
            .to_owned();

        self.fetch_optional(statement).await
    }

    pub async fn find_by_title(&self, title: impl Into<String>) -> anyhow::Result<Option<Meal>> {
        let title = title.into().trim().to_lowercase();
        let statement = select()
            .and_where(Expr::expr(Func::lower(Expr::col(MealTable::Title))).eq(title))
            .limit(1)
            .to_owned();

        self.fetch_optional(statement).await
    }

    pub async fn list(&self) -> anyhow::Result<Vec<Meal>> {
        let statement = select()
            .order_by_expr(Expr::col(MealTable::Title), Order::Asc)
            .to_owned();

        self.fetch_all(statement).await
    }

    /// Meals whose title contains `text`, ignoring case.
    pub async fn search(&self, text: impl Into<String>) -> anyhow::Result<Vec<Meal>> {
        let pattern = format!("%{}%", text.into().trim().to_lowercase());
        let statement = select()
            .and_where(Expr::expr(Func::lower(Expr::col(MealTable::Title))).like(pattern))
            .order_by_expr(Expr::col(MealTable::Title), Order::Asc)
            .to_owned();

        self.fetch_all(statement).await
    }

    pub async fn find_many(&self, ids: Vec<String>) -> anyhow::Result<Vec<Meal>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let statement = select()
            .and_where(Expr::col(MealTable::Id).is_in(ids))
            .to_owned();

        self.fetch_all(statement).await
    }

    async fn fetch_optional(&self, statement: SelectStatement) -> anyhow::Result<Option<Meal>> {
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, MealRow, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?
            .map(Into::into))
    }

    async fn fetch_all(&self, statement: SelectStatement) -> anyhow::Result<Vec<Meal>> {
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, MealRow, _>(&sql, values)
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
            MealTable::Id,
            MealTable::Title,
            MealTable::Description,
            MealTable::Ingredients,
            MealTable::PrepTimeMinutes,
            MealTable::CookTimeMinutes,
            MealTable::Effort,
            MealTable::ImageUrl,
        ])
        .from(MealTable::Table)
        .to_owned()
}
