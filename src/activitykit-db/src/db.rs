use activitykit_entities::{authorizations, samples};
use activitykit_migration::{Migrator, MigratorTrait, OnConflict};
use activitykit_types::{MetricKind, QuantitySample};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectOptions, Database,
    DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

/// Handle to the shared health store. Cloning is cheap; all clones share the
/// same underlying connection pool.
#[derive(Clone)]
pub struct DatabaseHandler {
    pub(crate) db: DatabaseConnection,
}

impl DatabaseHandler {
    /// Connect and bring the schema up to date. Connection failure here is
    /// how "the store is not present on this device" manifests.
    pub async fn connect<C>(url: C) -> anyhow::Result<Self>
    where
        C: Into<ConnectOptions>,
    {
        let db = Database::connect(url).await?;
        Migrator::up(&db, None).await?;

        Ok(Self { db })
    }

    pub async fn ping(&self) -> anyhow::Result<()> {
        self.db.ping().await?;
        Ok(())
    }

    /// Record (or refresh) an access grant for one metric kind.
    pub async fn grant_access(
        &self,
        metric: MetricKind,
        read: bool,
        write: bool,
    ) -> anyhow::Result<()> {
        let grant = authorizations::ActiveModel {
            id: Set(Uuid::new_v4()),
            metric: Set(metric.identifier().to_owned()),
            read_granted: Set(read),
            write_granted: Set(write),
            granted_at: Set(Utc::now().naive_utc()),
        };

        authorizations::Entity::insert(grant)
            .on_conflict(
                OnConflict::column(authorizations::Column::Metric)
                    .update_columns([
                        authorizations::Column::ReadGranted,
                        authorizations::Column::WriteGranted,
                        authorizations::Column::GrantedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;

        Ok(())
    }

    /// Kinds the caller may read, in `MetricKind` order. Rows whose metric
    /// identifier is not part of the current catalog are skipped.
    pub async fn read_authorized(&self) -> anyhow::Result<Vec<MetricKind>> {
        let rows = authorizations::Entity::find()
            .filter(authorizations::Column::ReadGranted.eq(true))
            .all(&self.db)
            .await?;

        let mut kinds: Vec<MetricKind> = rows
            .into_iter()
            .filter_map(|row| row.metric.parse().ok())
            .collect();
        kinds.sort();

        Ok(kinds)
    }

    pub async fn insert_sample(&self, sample: &QuantitySample) -> anyhow::Result<samples::Model> {
        let model = samples::ActiveModel {
            id: NotSet,
            metric: Set(sample.metric.identifier().to_owned()),
            value: Set(sample.value),
            unit: Set(sample.unit.identifier().to_owned()),
            source_name: Set(sample.source_name.clone()),
            start_time: Set(sample.start),
            end_time: Set(sample.end),
        };

        let model = model.insert(&self.db).await?;
        Ok(model)
    }
}
