use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{self:?}")]
pub enum ActivityError {
    StoreUnavailable,
    NoTypesRequested,
    NoDataReturned,
    InvalidTimestamp,
    InvalidQuantity,
    InvalidBucketWidth,
    UnknownMetric(String),
}
