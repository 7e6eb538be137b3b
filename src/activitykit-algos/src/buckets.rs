use chrono::{NaiveDateTime, TimeDelta};

/// Bucket boundaries are anchored at noon of the query's end date so the
/// grid stays put no matter what time of day the query runs.
pub fn anchor_date(end: NaiveDateTime) -> NaiveDateTime {
    end.date().and_hms_opt(12, 0, 0).expect("noon is a valid time")
}

/// Floor `time` onto the bucket grid rooted at `anchor`. Times before the
/// anchor land on earlier grid lines, not on the anchor itself.
pub fn bucket_start(time: NaiveDateTime, anchor: NaiveDateTime, width_minutes: i64) -> NaiveDateTime {
    let width = width_minutes * 60;
    let steps = (time - anchor).num_seconds().div_euclid(width);
    anchor + TimeDelta::seconds(steps * width)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn dt(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn anchor_is_noon_of_end_date() {
        assert_eq!(anchor_date(dt(1, 3, 17)), dt(1, 12, 0));
        assert_eq!(anchor_date(dt(1, 23, 59)), dt(1, 12, 0));
    }

    #[test]
    fn hour_buckets_align_to_noon_grid() {
        let anchor = anchor_date(dt(1, 3, 17));

        // An hour grid rooted at 12:00 puts 03:17 in the 03:00 bucket.
        assert_eq!(bucket_start(dt(1, 3, 17), anchor, 60), dt(1, 3, 0));
        assert_eq!(bucket_start(dt(1, 12, 0), anchor, 60), dt(1, 12, 0));
        assert_eq!(bucket_start(dt(1, 12, 59), anchor, 60), dt(1, 12, 0));
    }

    #[test]
    fn odd_widths_stay_rooted_at_the_anchor() {
        let anchor = dt(1, 12, 0);

        // 45-minute grid: ..., 10:30, 11:15, 12:00, 12:45, ...
        assert_eq!(bucket_start(dt(1, 12, 44), anchor, 45), dt(1, 12, 0));
        assert_eq!(bucket_start(dt(1, 12, 45), anchor, 45), dt(1, 12, 45));
        assert_eq!(bucket_start(dt(1, 11, 20), anchor, 45), dt(1, 11, 15));
    }

    #[test]
    fn times_before_the_anchor_floor_downward() {
        let anchor = dt(2, 12, 0);

        assert_eq!(bucket_start(dt(1, 23, 30), anchor, 60), dt(1, 23, 0));
        assert_eq!(bucket_start(dt(2, 11, 59), anchor, 60), dt(2, 11, 0));
    }
}
