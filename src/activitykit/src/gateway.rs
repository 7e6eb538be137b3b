use std::collections::BTreeMap;

use activitykit_algos::{
    MetricInterval, MetricSample, aggregate_intervals, aggregate_samples, anchor_date,
};
use activitykit_db::DatabaseHandler;
use activitykit_types::{ActivityError, MetricKind, QuantitySample};
use chrono::{NaiveDateTime, TimeDelta, Utc};
use futures::future::join_all;

const DEFAULT_LOOKBACK_DAYS: i64 = 30;

/// Front door to the health store: authorization, the two fetch paths and
/// the write path.
pub struct ActivityKit {
    store: DatabaseHandler,
    /// The minute width of statistics buckets. Defaults to 15.
    pub bucket_minutes: i64,
}

impl ActivityKit {
    pub fn new(store: DatabaseHandler) -> Self {
        Self {
            store,
            bucket_minutes: 15,
        }
    }

    /// Record read access for the whole metric catalog and write access for
    /// active energy. Fails with `StoreUnavailable` when the store does not
    /// answer.
    pub async fn authorize(&self) -> anyhow::Result<()> {
        if self.store.ping().await.is_err() {
            return Err(ActivityError::StoreUnavailable.into());
        }

        for kind in MetricKind::ALL {
            let write = kind == MetricKind::ActiveEnergy;
            self.store.grant_access(kind, true, write).await?;
        }

        Ok(())
    }

    /// Bucketed statistics for every permitted kind over the lookback
    /// window, merged into one interval per bucket timestamp.
    pub async fn interval_data(
        &self,
        since: Option<NaiveDateTime>,
    ) -> anyhow::Result<Vec<MetricInterval>> {
        // The bucket grid needs a positive width before any time math runs.
        if self.bucket_minutes <= 0 {
            return Err(ActivityError::InvalidBucketWidth.into());
        }

        let kinds = self.permitted_kinds().await?;
        let (start, end) = Self::window(since);
        let anchor = anchor_date(end);
        let width = self.bucket_minutes;

        let queries = kinds.into_iter().map(|kind| {
            let store = self.store.clone();
            async move {
                (
                    kind,
                    store
                        .bucketed_statistics(kind, start, end, width, anchor)
                        .await,
                )
            }
        });

        let results = Self::collect_results(join_all(queries).await)?;
        Ok(aggregate_intervals(&results))
    }

    /// Raw samples for every permitted kind over the lookback window, merged
    /// into one entity per start time.
    pub async fn sample_data(
        &self,
        since: Option<NaiveDateTime>,
    ) -> anyhow::Result<Vec<MetricSample>> {
        let kinds = self.permitted_kinds().await?;
        let (start, end) = Self::window(since);

        let queries = kinds.into_iter().map(|kind| {
            let store = self.store.clone();
            async move { (kind, store.samples_in_range(kind, start, end).await) }
        });

        let results = Self::collect_results(join_all(queries).await)?;
        Ok(aggregate_samples(&results))
    }

    /// Persist one externally constructed sample. Store errors surface
    /// unmodified.
    pub async fn save_sample(&self, sample: &QuantitySample) -> anyhow::Result<()> {
        self.store.insert_sample(sample).await?;
        Ok(())
    }

    async fn permitted_kinds(&self) -> anyhow::Result<Vec<MetricKind>> {
        let kinds = self.store.read_authorized().await?;
        if kinds.is_empty() {
            return Err(ActivityError::NoTypesRequested.into());
        }

        Ok(kinds)
    }

    fn window(since: Option<NaiveDateTime>) -> (NaiveDateTime, NaiveDateTime) {
        let end = Utc::now().naive_utc();
        let start = since.unwrap_or(end - TimeDelta::days(DEFAULT_LOOKBACK_DAYS));
        (start, end)
    }

    /// Join-barrier tail: keep kinds that returned data, log and drop kinds
    /// that failed. Only when every kind came back empty or failed does the
    /// whole fetch fail, with `NoDataReturned`.
    fn collect_results<T>(
        outcomes: Vec<(MetricKind, anyhow::Result<Vec<T>>)>,
    ) -> anyhow::Result<BTreeMap<MetricKind, Vec<T>>> {
        let mut results = BTreeMap::new();

        for (kind, outcome) in outcomes {
            match outcome {
                Ok(items) if !items.is_empty() => {
                    results.insert(kind, items);
                }
                Ok(_) => {}
                Err(error) => error!("query for {kind} failed: {error}"),
            }
        }

        if results.is_empty() {
            return Err(ActivityError::NoDataReturned.into());
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn kit() -> ActivityKit {
        let store = DatabaseHandler::connect("sqlite::memory:").await.unwrap();
        ActivityKit::new(store)
    }

    fn domain_error(error: &anyhow::Error) -> &ActivityError {
        error.downcast_ref().expect("expected a domain error")
    }

    async fn seed(kit: &ActivityKit, metric: MetricKind, minutes_ago: i64, value: f64, source: &str) {
        let at = Utc::now().naive_utc() - TimeDelta::minutes(minutes_ago);
        let sample = QuantitySample::point(metric, value, source.to_string(), at);
        kit.save_sample(&sample).await.unwrap();
    }

    #[tokio::test]
    async fn fetch_without_authorization_is_no_types_requested() {
        let kit = kit().await;

        let error = kit.interval_data(None).await.unwrap_err();
        assert_eq!(domain_error(&error), &ActivityError::NoTypesRequested);

        let error = kit.sample_data(None).await.unwrap_err();
        assert_eq!(domain_error(&error), &ActivityError::NoTypesRequested);
    }

    #[tokio::test]
    async fn non_positive_bucket_width_is_rejected_before_querying() {
        let mut kit = kit().await;
        kit.bucket_minutes = 0;

        // Fails on the width alone, even before authorization is checked.
        let error = kit.interval_data(None).await.unwrap_err();
        assert_eq!(domain_error(&error), &ActivityError::InvalidBucketWidth);

        kit.bucket_minutes = -15;
        let error = kit.interval_data(None).await.unwrap_err();
        assert_eq!(domain_error(&error), &ActivityError::InvalidBucketWidth);
    }

    #[test]
    fn failed_kind_is_dropped_without_aborting_siblings() {
        let outcomes = vec![
            (MetricKind::StepCount, Ok(vec![1, 2])),
            (
                MetricKind::ActiveEnergy,
                Err(anyhow::anyhow!("disk I/O error")),
            ),
        ];

        let results = ActivityKit::collect_results(outcomes).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[&MetricKind::StepCount], vec![1, 2]);
    }

    #[test]
    fn all_kinds_failing_is_no_data_returned() {
        let outcomes: Vec<(MetricKind, anyhow::Result<Vec<i32>>)> = vec![
            (MetricKind::StepCount, Err(anyhow::anyhow!("disk I/O error"))),
            (
                MetricKind::ExerciseTime,
                Err(anyhow::anyhow!("disk I/O error")),
            ),
        ];

        let error = ActivityKit::collect_results(outcomes).unwrap_err();
        assert_eq!(domain_error(&error), &ActivityError::NoDataReturned);
    }

    #[tokio::test]
    async fn empty_store_is_no_data_returned() {
        let kit = kit().await;
        kit.authorize().await.unwrap();

        let error = kit.interval_data(None).await.unwrap_err();
        assert_eq!(domain_error(&error), &ActivityError::NoDataReturned);
    }

    #[tokio::test]
    async fn intervals_merge_kinds_sharing_a_bucket() {
        let mut kit = kit().await;
        kit.bucket_minutes = 60;
        kit.authorize().await.unwrap();

        // Fixed wall-clock times yesterday; hour buckets anchor at noon, so
        // they start on the hour no matter when the test runs.
        let yesterday = Utc::now().date_naive() - TimeDelta::days(1);
        let at = |h, m| yesterday.and_hms_opt(h, m, 0).unwrap();

        for (metric, time, value, source) in [
            (MetricKind::StepCount, at(8, 5), 300.0, "phone"),
            (MetricKind::StepCount, at(8, 20), 50.0, "phone"),
            (MetricKind::ActiveEnergy, at(8, 40), 21.0, "watch"),
            (MetricKind::StepCount, at(9, 10), 80.0, "phone"),
        ] {
            let sample = QuantitySample::point(metric, value, source.to_string(), time);
            kit.save_sample(&sample).await.unwrap();
        }

        let since = Utc::now().naive_utc() - TimeDelta::days(2);
        let intervals = kit.interval_data(Some(since)).await.unwrap();
        assert_eq!(intervals.len(), 2);

        assert_eq!(intervals[0].timestamp, at(8, 0));
        assert_eq!(intervals[0].steps, 350.0);
        assert_eq!(intervals[0].active_calories, 21.0);

        assert_eq!(intervals[1].timestamp, at(9, 0));
        assert_eq!(intervals[1].steps, 80.0);
    }

    #[tokio::test]
    async fn samples_capture_the_source_name() {
        let kit = kit().await;
        kit.authorize().await.unwrap();

        seed(&kit, MetricKind::ActiveEnergy, 30, 55.0, "watch").await;
        seed(&kit, MetricKind::StepCount, 90, 120.0, "phone").await;

        let samples = kit.sample_data(None).await.unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].source_name, "phone");
        assert_eq!(samples[0].steps, 120.0);
        assert_eq!(samples[1].source_name, "watch");
        assert_eq!(samples[1].active_calories, 55.0);
    }

    #[tokio::test]
    async fn explicit_since_limits_the_window() {
        let kit = kit().await;
        kit.authorize().await.unwrap();

        seed(&kit, MetricKind::StepCount, 60 * 48, 999.0, "phone").await;
        seed(&kit, MetricKind::StepCount, 30, 75.0, "phone").await;

        let since = Utc::now().naive_utc() - TimeDelta::days(1);
        let samples = kit.sample_data(Some(since)).await.unwrap();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].steps, 75.0);
    }

    #[tokio::test]
    async fn default_window_spans_thirty_days() {
        let (start, end) = ActivityKit::window(None);
        assert_eq!(end - start, TimeDelta::days(30));

        let old_sample_age = TimeDelta::days(31);
        let kit = kit().await;
        kit.authorize().await.unwrap();
        let at = Utc::now().naive_utc() - old_sample_age;
        let sample = QuantitySample::point(MetricKind::StepCount, 1.0, "phone".to_string(), at);
        kit.save_sample(&sample).await.unwrap();

        // A 31-day-old sample sits outside the default lookback.
        let error = kit.sample_data(None).await.unwrap_err();
        assert_eq!(domain_error(&error), &ActivityError::NoDataReturned);
    }
}
