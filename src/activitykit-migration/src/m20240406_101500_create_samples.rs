use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Samples::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Samples::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Samples::Metric).text().not_null())
                    .col(ColumnDef::new(Samples::Value).double().not_null())
                    .col(ColumnDef::new(Samples::Unit).text().not_null())
                    .col(ColumnDef::new(Samples::SourceName).text().not_null())
                    .col(ColumnDef::new(Samples::StartTime).date_time().not_null())
                    .col(ColumnDef::new(Samples::EndTime).date_time().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Samples::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub(crate) enum Samples {
    Table,
    Id,
    Metric,
    Value,
    Unit,
    SourceName,
    StartTime,
    EndTime,
}
