use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use activitykit_types::{BucketStatistic, MetricKind};

/// One display row: everything the store reported for a single bucket
/// timestamp, merged across metric kinds.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricInterval {
    pub timestamp: NaiveDateTime,
    pub steps: f64,
    pub active_calories: f64,
}

impl MetricInterval {
    pub fn new(timestamp: NaiveDateTime) -> Self {
        Self {
            timestamp,
            steps: 0.0,
            active_calories: 0.0,
        }
    }

    fn add_statistic(&mut self, metric: MetricKind, sum: f64) {
        match metric {
            MetricKind::StepCount => self.steps = sum,
            MetricKind::ActiveEnergy => self.active_calories = sum,
            // No interval field shows exercise time.
            MetricKind::ExerciseTime => {}
        }
    }
}

/// Merge per-kind bucket statistics into one interval per distinct bucket
/// timestamp, ascending. Each kind writes only its own field, so the order
/// kinds are visited in cannot clobber another kind's value. An empty input
/// map yields an empty output; callers decide whether that is an error.
pub fn aggregate_intervals(
    results: &BTreeMap<MetricKind, Vec<BucketStatistic>>,
) -> Vec<MetricInterval> {
    let mut merged: BTreeMap<NaiveDateTime, MetricInterval> = BTreeMap::new();

    for stats in results.values() {
        for stat in stats {
            merged
                .entry(stat.bucket_start)
                .or_insert_with(|| MetricInterval::new(stat.bucket_start))
                .add_statistic(stat.metric, stat.sum);
        }
    }

    merged.into_values().collect()
}
