use std::collections::BTreeMap;

use activitykit_algos::bucket_start;
use activitykit_entities::samples;
use activitykit_types::{BucketStatistic, MetricKind, QuantitySample};
use chrono::NaiveDateTime;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use crate::DatabaseHandler;

impl DatabaseHandler {
    /// Unbounded sample query with a strict-start predicate: every sample of
    /// `metric` whose start time falls in `[start, end)`. No ordering is
    /// imposed.
    pub async fn samples_in_range(
        &self,
        metric: MetricKind,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> anyhow::Result<Vec<QuantitySample>> {
        let rows = self.fetch_range(metric, start, end).await?;

        Ok(rows
            .into_iter()
            .map(|model| Self::parse_sample(metric, model))
            .collect())
    }

    /// Cumulative sums per bucket on the grid rooted at `anchor`. Buckets
    /// with no samples are omitted, so the result can be empty.
    pub async fn bucketed_statistics(
        &self,
        metric: MetricKind,
        start: NaiveDateTime,
        end: NaiveDateTime,
        width_minutes: i64,
        anchor: NaiveDateTime,
    ) -> anyhow::Result<Vec<BucketStatistic>> {
        let rows = self.fetch_range(metric, start, end).await?;

        let mut buckets: BTreeMap<NaiveDateTime, f64> = BTreeMap::new();
        for row in rows {
            *buckets
                .entry(bucket_start(row.start_time, anchor, width_minutes))
                .or_default() += row.value;
        }

        Ok(buckets
            .into_iter()
            .map(|(bucket_start, sum)| BucketStatistic {
                metric,
                bucket_start,
                sum,
            })
            .collect())
    }

    async fn fetch_range(
        &self,
        metric: MetricKind,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> anyhow::Result<Vec<samples::Model>> {
        let rows = samples::Entity::find()
            .filter(samples::Column::Metric.eq(metric.identifier()))
            .filter(samples::Column::StartTime.gte(start))
            .filter(samples::Column::StartTime.lt(end))
            .all(&self.db)
            .await?;

        Ok(rows)
    }

    fn parse_sample(metric: MetricKind, model: samples::Model) -> QuantitySample {
        QuantitySample {
            metric,
            value: model.value,
            unit: metric.unit(),
            source_name: model.source_name,
            start: model.start_time,
            end: model.end_time,
        }
    }
}
