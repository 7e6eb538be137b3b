use sea_orm_migration::prelude::*;

use crate::m20240406_101500_create_samples::Samples;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_samples_metric_start")
                    .table(Samples::Table)
                    .col(Samples::Metric)
                    .col(Samples::StartTime)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_samples_metric_start")
                    .table(Samples::Table)
                    .to_owned(),
            )
            .await
    }
}
