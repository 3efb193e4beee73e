use sea_query::{ColumnDef, Table, TableAlterStatement};

use crate::table::MealPlanEntry;

pub struct AddAssignedCook;

fn add_column() -> TableAlterStatement {
    Table::alter()
        .table(MealPlanEntry::Table)
        .add_column(
            ColumnDef::new(MealPlanEntry::AssignedCookId)
                .string()
                .string_len(26),
        )
        .to_owned()
}

fn drop_column() -> TableAlterStatement {
    Table::alter()
        .table(MealPlanEntry::Table)
        .drop_column(MealPlanEntry::AssignedCookId)
        .to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for AddAssignedCook {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = add_column().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = drop_column().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}
