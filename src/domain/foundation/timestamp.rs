//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Creates a timestamp from Unix seconds.
    ///
    /// Returns `None` for values outside the representable range.
    pub fn from_unix_secs(secs: i64) -> Option<Self> {
        DateTime::<Utc>::from_timestamp(secs, 0).map(Self)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Checks if this timestamp is after another.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }

    /// Returns the duration from another timestamp to this one.
    ///
    /// Returns negative duration if other is after self.
    pub fn duration_since(&self, other: &Timestamp) -> Duration {
        self.0.signed_duration_since(other.0)
    }

    /// Creates a new timestamp by adding the specified number of days.
    ///
    /// Negative values subtract days.
    pub fn add_days(&self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    /// Creates a new timestamp by adding the specified number of minutes.
    pub fn add_minutes(&self, minutes: i64) -> Self {
        Self(self.0 + Duration::minutes(minutes))
    }

    /// Creates a new timestamp by adding calendar months.
    ///
    /// Day-of-month overflow is clamped to the end of the target month
    /// (Jan 31 + 1 month = Feb 28/29).
    pub fn add_months(&self, months: u32) -> Self {
        match self.0.checked_add_months(Months::new(months)) {
            Some(dt) => Self(dt),
            None => *self,
        }
    }

    /// Returns the number of whole-or-partial days until `other`,
    /// rounded up. Negative when `other` is in the past.
    pub fn days_until(&self, other: &Timestamp) -> i64 {
        let secs = other.0.signed_duration_since(self.0).num_seconds();
        secs.div_euclid(86_400) + i64::from(secs.rem_euclid(86_400) > 0)
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use std::thread::sleep;
    use std::time::Duration as StdDuration;

    fn ts(rfc3339: &str) -> Timestamp {
        Timestamp::from_datetime(
            DateTime::parse_from_rfc3339(rfc3339)
                .unwrap()
                .with_timezone(&Utc),
        )
    }

    #[test]
    fn timestamp_now_creates_current_time() {
        let before = Utc::now();
        let t = Timestamp::now();
        let after = Utc::now();

        assert!(t.as_datetime() >= &before);
        assert!(t.as_datetime() <= &after);
    }

    #[test]
    fn timestamp_is_before_works_correctly() {
        let t1 = Timestamp::now();
        sleep(StdDuration::from_millis(10));
        let t2 = Timestamp::now();

        assert!(t1.is_before(&t2));
        assert!(!t2.is_before(&t1));
    }

    #[test]
    fn add_months_advances_plain_dates() {
        let t = ts("2024-03-15T12:00:00Z");
        let next = t.add_months(1);
        assert_eq!(next.as_datetime().month(), 4);
        assert_eq!(next.as_datetime().day(), 15);
    }

    #[test]
    fn add_months_clamps_month_end_overflow() {
        // Jan 31 + 1 month lands on Feb 29 in a leap year, not Mar 2
        let t = ts("2024-01-31T00:00:00Z");
        let next = t.add_months(1);
        assert_eq!(next.as_datetime().month(), 2);
        assert_eq!(next.as_datetime().day(), 29);
    }

    #[test]
    fn add_months_twelve_advances_a_year() {
        let t = ts("2024-06-01T00:00:00Z");
        let next = t.add_months(12);
        assert_eq!(next.as_datetime().year(), 2025);
        assert_eq!(next.as_datetime().month(), 6);
    }

    #[test]
    fn days_until_rounds_partial_days_up() {
        let t1 = ts("2024-01-01T00:00:00Z");
        let t2 = ts("2024-01-03T06:00:00Z");
        assert_eq!(t1.days_until(&t2), 3);
    }

    #[test]
    fn days_until_exact_days_are_not_rounded() {
        let t1 = ts("2024-01-01T00:00:00Z");
        let t2 = ts("2024-01-03T00:00:00Z");
        assert_eq!(t1.days_until(&t2), 2);
    }

    #[test]
    fn days_until_is_negative_for_past_timestamps() {
        let t1 = ts("2024-01-10T00:00:00Z");
        let t2 = ts("2024-01-01T00:00:00Z");
        assert_eq!(t1.days_until(&t2), -9);
    }

    #[test]
    fn days_until_rounds_a_partial_past_day_toward_zero() {
        let t1 = ts("2024-01-10T06:00:00Z");
        let t2 = ts("2024-01-10T00:00:00Z");
        assert_eq!(t1.days_until(&t2), 0);
    }

    #[test]
    fn timestamp_serializes_to_json() {
        let t = ts("2024-01-15T10:30:00Z");
        let json = serde_json::to_string(&t).unwrap();
        assert!(json.contains("2024-01-15"));
    }

    #[test]
    fn timestamp_deserializes_from_json() {
        let t: Timestamp = serde_json::from_str("\"2024-01-15T10:30:00Z\"").unwrap();
        assert_eq!(t.as_datetime().year(), 2024);
    }

    #[test]
    fn from_unix_secs_works() {
        let t = Timestamp::from_unix_secs(1705276800).unwrap();
        assert_eq!(t.as_datetime().year(), 2024);
        assert_eq!(t.as_datetime().month(), 1);
        assert_eq!(t.as_datetime().day(), 15);
    }
}
