use sea_query::{ColumnDef, Table, TableCreateStatement, TableDropStatement};

use crate::table::Meal;

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(Meal::Table)
        .col(
            ColumnDef::new(Meal::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(Meal::Title)
                .string()
                .not_null()
                .string_len(255),
        )
        .col(ColumnDef::new(Meal::Description).string().string_len(2000))
        .col(
            ColumnDef::new(Meal::Ingredients)
                .text()
                .not_null()
                .default("[]"),
        )
        .col(ColumnDef::new(Meal::PrepTimeMinutes).integer())
        .col(ColumnDef::new(Meal::CookTimeMinutes).integer())
        .col(ColumnDef::new(Meal::Effort).string().string_len(10))
        .col(ColumnDef::new(Meal::ImageUrl).string().string_len(2000))
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(Meal::Table).to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateTable {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = create_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = drop_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}
