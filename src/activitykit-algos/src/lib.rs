pub(crate) mod buckets;
pub use buckets::{anchor_date, bucket_start};

pub(crate) mod intervals;
pub use intervals::{MetricInterval, aggregate_intervals};

pub(crate) mod samples;
pub use samples::{MetricSample, aggregate_samples};
