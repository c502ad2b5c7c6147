//! Elapsed-time arithmetic shared by the evaluator and the aggregator

use chrono::{DateTime, Utc};

const MILLIS_PER_MINUTE: i64 = 60_000;

/// Whole minutes from `start` to `end`, floored.
///
/// The result is negative when `end` precedes `start`; callers keep such values
/// as they are.
pub fn elapsed_minutes(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    end.signed_duration_since(start)
        .num_milliseconds()
        .div_euclid(MILLIS_PER_MINUTE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, h, m, s).unwrap()
    }

    #[test]
    fn test_whole_minutes() {
        assert_eq!(elapsed_minutes(at(0, 0, 0), at(0, 45, 0)), 45);
        assert_eq!(elapsed_minutes(at(0, 0, 0), at(1, 0, 0)), 60);
        assert_eq!(elapsed_minutes(at(0, 0, 0), at(0, 0, 0)), 0);
    }

    #[test]
    fn test_partial_minutes_floor() {
        assert_eq!(elapsed_minutes(at(0, 0, 0), at(0, 0, 59)), 0);
        assert_eq!(elapsed_minutes(at(0, 0, 0), at(0, 1, 59)), 1);
        assert_eq!(
            elapsed_minutes(at(0, 0, 0), at(0, 0, 0) + Duration::milliseconds(59_999)),
            0
        );
    }

    #[test]
    fn test_negative_span() {
        assert_eq!(elapsed_minutes(at(1, 0, 0), at(0, 0, 0)), -60);
        // floor, not truncation
        assert_eq!(elapsed_minutes(at(0, 1, 0), at(0, 0, 30)), -1);
    }

    #[test]
    fn test_across_days() {
        let start = Utc.with_ymd_and_hms(2024, 2, 28, 23, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 1, 1, 0, 0).unwrap();
        // 2024 is a leap year
        assert_eq!(elapsed_minutes(start, end), 26 * 60);
    }
}
