use std::{fmt::Display, str::FromStr};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::ActivityError;

/// The quantity types the store tracks. Ordered so that callers iterating a
/// keyed result map always visit kinds in the same order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MetricKind {
    #[serde(rename = "step_count")]
    StepCount,
    #[serde(rename = "active_energy_burned")]
    ActiveEnergy,
    #[serde(rename = "exercise_time")]
    ExerciseTime,
}

impl MetricKind {
    pub const ALL: [MetricKind; 3] = [Self::StepCount, Self::ActiveEnergy, Self::ExerciseTime];

    pub fn identifier(self) -> &'static str {
        match self {
            Self::StepCount => "step_count",
            Self::ActiveEnergy => "active_energy_burned",
            Self::ExerciseTime => "exercise_time",
        }
    }

    /// The canonical unit samples of this kind are stored and read in.
    pub fn unit(self) -> Unit {
        match self {
            Self::StepCount => Unit::Count,
            Self::ActiveEnergy => Unit::Kilocalorie,
            Self::ExerciseTime => Unit::Minute,
        }
    }
}

impl Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for MetricKind {
    type Err = ActivityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "step_count" => Ok(Self::StepCount),
            "active_energy_burned" => Ok(Self::ActiveEnergy),
            "exercise_time" => Ok(Self::ExerciseTime),
            _ => Err(ActivityError::UnknownMetric(s.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "count")]
    Count,
    #[serde(rename = "kcal")]
    Kilocalorie,
    #[serde(rename = "min")]
    Minute,
}

impl Unit {
    pub fn identifier(self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Kilocalorie => "kcal",
            Self::Minute => "min",
        }
    }
}

impl Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.identifier())
    }
}

/// One timestamped event as the store records it, together with the name of
/// the device or app that produced it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuantitySample {
    pub metric: MetricKind,
    pub value: f64,
    pub unit: Unit,
    pub source_name: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl QuantitySample {
    /// A zero-duration sample, the shape the write path produces.
    pub fn point(metric: MetricKind, value: f64, source_name: String, at: NaiveDateTime) -> Self {
        Self {
            metric,
            value,
            unit: metric.unit(),
            source_name,
            start: at,
            end: at,
        }
    }
}

/// A pre-aggregated cumulative sum over one time bucket.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BucketStatistic {
    pub metric: MetricKind,
    pub bucket_start: NaiveDateTime,
    pub sum: f64,
}
