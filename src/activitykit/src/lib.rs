#[macro_use]
extern crate log;

mod gateway;
pub use gateway::ActivityKit;

mod write;
pub use write::active_calorie_sample;

pub mod display;

pub use activitykit_algos::{MetricInterval, MetricSample};
pub use activitykit_db::DatabaseHandler;
pub use activitykit_types::{ActivityError, MetricKind, QuantitySample};
