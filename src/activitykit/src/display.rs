use activitykit_algos::{MetricInterval, MetricSample};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn interval_row(interval: &MetricInterval) -> String {
    format!(
        "{}  Steps: {:.0} Calories: {:.0}",
        interval.timestamp.format(TIMESTAMP_FORMAT),
        interval.steps,
        interval.active_calories
    )
}

pub fn sample_row(sample: &MetricSample) -> String {
    format!(
        "{}  From: {} Steps: {:.0} Calories: {:.0}",
        sample.timestamp.format(TIMESTAMP_FORMAT),
        sample.source_name,
        sample.steps,
        sample.active_calories
    )
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn noon() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn interval_rows_round_to_whole_numbers() {
        let mut interval = MetricInterval::new(noon());
        interval.steps = 1234.6;
        interval.active_calories = 88.2;

        assert_eq!(
            interval_row(&interval),
            "2024-01-01 12:00:00  Steps: 1235 Calories: 88"
        );
    }

    #[test]
    fn sample_rows_lead_with_the_source() {
        let mut sample = MetricSample::new(noon());
        sample.source_name = "watch".to_string();
        sample.steps = 12.0;
        sample.active_calories = 3.0;

        assert_eq!(
            sample_row(&sample),
            "2024-01-01 12:00:00  From: watch Steps: 12 Calories: 3"
        );
    }
}
