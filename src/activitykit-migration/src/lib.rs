pub use sea_orm_migration::prelude::*;

mod m20240406_101500_create_samples;
mod m20240406_102200_create_authorizations;
mod m20240512_090000_sample_time_index;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240406_101500_create_samples::Migration),
            Box::new(m20240406_102200_create_authorizations::Migration),
            Box::new(m20240512_090000_sample_time_index::Migration),
        ]
    }
}
