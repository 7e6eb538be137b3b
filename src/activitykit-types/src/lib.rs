mod error;
pub use error::ActivityError;

mod metrics;
pub use metrics::{BucketStatistic, MetricKind, QuantitySample, Unit};
