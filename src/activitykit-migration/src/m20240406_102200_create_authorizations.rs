use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Authorizations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Authorizations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Authorizations::Metric)
                            .text()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Authorizations::ReadGranted)
                            .boolean()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Authorizations::WriteGranted)
                            .boolean()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Authorizations::GrantedAt)
                            .date_time()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Authorizations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Authorizations {
    Table,
    Id,
    Metric,
    ReadGranted,
    WriteGranted,
    GrantedAt,
}
