use sea_query::{ColumnDef, Table, TableCreateStatement, TableDropStatement};

use crate::table::Person;

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(Person::Table)
        .col(
            ColumnDef::new(Person::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(Person::Name)
                .string()
                .not_null()
                .string_len(255),
        )
        .col(
            ColumnDef::new(Person::EatingPreferences)
                .string()
                .string_len(1000),
        )
        .col(
            ColumnDef::new(Person::CookingPreferences)
                .string()
                .string_len(1000),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(Person::Table).to_owned()
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
