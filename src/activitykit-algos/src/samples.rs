use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use activitykit_types::{MetricKind, QuantitySample};

/// One display row built from raw samples: all values recorded at a single
/// start time, merged across metric kinds, plus the name of the source that
/// contributed last.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricSample {
    pub timestamp: NaiveDateTime,
    pub source_name: String,
    pub steps: f64,
    pub active_calories: f64,
    pub exercise_time: f64,
}

impl MetricSample {
    pub fn new(timestamp: NaiveDateTime) -> Self {
        Self {
            timestamp,
            source_name: String::new(),
            steps: 0.0,
            active_calories: 0.0,
            exercise_time: 0.0,
        }
    }

    fn add_sample(&mut self, sample: &QuantitySample) {
        match sample.metric {
            MetricKind::StepCount => self.steps = sample.value,
            MetricKind::ActiveEnergy => self.active_calories = sample.value,
            MetricKind::ExerciseTime => self.exercise_time = sample.value,
        }

        self.source_name = sample.source_name.clone();
    }
}

/// Merge raw samples into one entity per distinct start time, ascending.
/// When several kinds share a timestamp, `source_name` is last-writer-wins
/// in `MetricKind` order (the input map's key order), so the outcome is
/// deterministic.
pub fn aggregate_samples(
    results: &BTreeMap<MetricKind, Vec<QuantitySample>>,
) -> Vec<MetricSample> {
    let mut merged: BTreeMap<NaiveDateTime, MetricSample> = BTreeMap::new();

    for samples in results.values() {
        for sample in samples {
            merged
                .entry(sample.start)
                .or_insert_with(|| MetricSample::new(sample.start))
                .add_sample(sample);
        }
    }

    merged.into_values().collect()
}
