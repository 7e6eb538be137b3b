use activitykit_types::{ActivityError, MetricKind, QuantitySample};
use chrono::DateTime;

/// Build an active-energy sample from user-entered text. Malformed input
/// fails here, before anything touches the store. The timestamp must be
/// RFC 3339 / ISO-8601; the calorie text must be a finite decimal.
pub fn active_calorie_sample(
    timestamp: &str,
    calories: &str,
    source: &str,
) -> Result<QuantitySample, ActivityError> {
    let at = DateTime::parse_from_rfc3339(timestamp)
        .map_err(|_| ActivityError::InvalidTimestamp)?
        .naive_utc();

    let value: f64 = calories
        .trim()
        .parse()
        .map_err(|_| ActivityError::InvalidQuantity)?;
    if !value.is_finite() || value < 0.0 {
        return Err(ActivityError::InvalidQuantity);
    }

    Ok(QuantitySample::point(
        MetricKind::ActiveEnergy,
        value,
        source.to_string(),
        at,
    ))
}
