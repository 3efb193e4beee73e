use mealplanner_db::table::{Meal, MealPlanEntry, MealRating};
use mealplanner_shared::meal::{Effort, Ingredient};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use ulid::Ulid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MealInput {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Title must be between 1 and 255 characters"
    ))]
    pub title: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_ingredients"))]
    pub ingredients: Vec<Ingredient>,

    pub prep_time_minutes: Option<u32>,
    pub cook_time_minutes: Option<u32>,
    pub effort: Option<Effort>,

    #[validate(length(max = 2000, message = "Image url must be at most 2000 characters"))]
    pub image_url: Option<String>,
}

fn validate_ingredients(ingredients: &[Ingredient]) -> Result<(), ValidationError> {
    if ingredients
        .iter()
        .any(|i| !i.quantity.is_finite() || i.quantity < 0.0)
    {
        return Err(ValidationError::new("ingredient_quantity")
            .with_message("Ingredient quantity must be a positive number".into()));
    }

    Ok(())
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

#[derive(Clone)]
pub struct Command(pub SqlitePool);

impl Command {
    #[tracing::instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create(&self, input: MealInput) -> mealplanner_shared::Result<String> {
        input.validate()?;

        let id = Ulid::new().to_string();
        let ingredients = serde_json::to_string(&input.ingredients)?;

        let mut statement = Query::insert()
            .into_table(Meal::Table)
            .columns([
                Meal::Id,
                Meal::Title,
                Meal::Description,
                Meal::Ingredients,
                Meal::PrepTimeMinutes,
                Meal::CookTimeMinutes,
                Meal::Effort,
                Meal::ImageUrl,
            ])
            .to_owned();

        statement.values_panic([
            id.to_owned().into(),
            input.title.into(),
            input.description.into(),
            ingredients.into(),
            input.prep_time_minutes.into(),
            input.cook_time_minutes.into(),
            input.effort.map(|e| e.to_string()).into(),
            input.image_url.into(),
        ]);

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.0).await?;

        Ok(id)
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn update(&self, id: &str, input: MealInput) -> mealplanner_shared::Result<()> {
        input.validate()?;

        let ingredients = serde_json::to_string(&input.ingredients)?;
        let statement = Query::update()
            .table(Meal::Table)
            .values([
                (Meal::Title, input.title.into()),
                (Meal::Description, input.description.into()),
                (Meal::Ingredients, ingredients.into()),
                (Meal::PrepTimeMinutes, input.prep_time_minutes.into()),
                (Meal::CookTimeMinutes, input.cook_time_minutes.into()),
                (Meal::Effort, input.effort.map(|e| e.to_string()).into()),
                (Meal::ImageUrl, input.image_url.into()),
            ])
            .and_where(Expr::col(Meal::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.0).await?;

        if result.rows_affected() == 0 {
            mealplanner_shared::not_found!("Meal not found with id: {id}");
        }

        Ok(())
    }

    /// Deletes a meal and its ratings. Plan entries pointing at it keep their
    /// slot with no meal.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> mealplanner_shared::Result<()> {
        let mut tx = self.0.begin().await?;

        let statement = Query::update()
            .table(MealPlanEntry::Table)
            .values([(MealPlanEntry::MealId, Option::<String>::None.into())])
            .and_where(Expr::col(MealPlanEntry::MealId).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        let statement = Query::delete()
            .from_table(MealRating::Table)
            .and_where(Expr::col(MealRating::MealId).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        let statement = Query::delete()
            .from_table(Meal::Table)
            .and_where(Expr::col(Meal::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        tx.commit().await?;

        Ok(())
    }

    /// Creates every meal whose title does not already exist (ignoring case).
    #[tracing::instrument(skip_all, fields(count = inputs.len()))]
    pub async fn import(&self, inputs: Vec<MealInput>) -> mealplanner_shared::Result<ImportSummary> {
        let query = crate::Query(self.0.clone());
        let mut summary = ImportSummary::default();

        for input in inputs {
            if query.find_by_title(&input.title).await?.is_some() {
                summary.skipped += 1;
                continue;
            }

            self.create(input).await?;
            summary.imported += 1;
        }

        tracing::info!(
            imported = summary.imported,
            skipped = summary.skipped,
            "Meals imported"
        );

        Ok(summary)
    }
}
