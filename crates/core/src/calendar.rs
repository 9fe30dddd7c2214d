//! Business calendar.
//!
//! Queue numbers restart every business day, and the business day is
//! defined by a fixed UTC offset rather than the host timezone. The default
//! is UTC+7 (Western Indonesia Time).

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use thiserror::Error;

const SECONDS_PER_HOUR: i32 = 60 * 60;

/// Default offset of the business timezone, in hours east of UTC.
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 7;

/// Errors constructing a [`BusinessCalendar`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("UTC offset must be between -12 and +14 hours (got {0})")]
    OffsetOutOfRange(i32),
}

/// Maps instants to business dates in a fixed-offset timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessCalendar {
    offset: FixedOffset,
}

impl BusinessCalendar {
    /// Create a calendar for a whole-hour UTC offset.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::OffsetOutOfRange`] outside -12..=14.
    pub fn from_offset_hours(hours: i32) -> Result<Self, CalendarError> {
        if !(-12..=14).contains(&hours) {
            return Err(CalendarError::OffsetOutOfRange(hours));
        }
        FixedOffset::east_opt(hours * SECONDS_PER_HOUR)
            .map(|offset| Self { offset })
            .ok_or(CalendarError::OffsetOutOfRange(hours))
    }

    /// The business timezone offset.
    #[must_use]
    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Business date of the given instant.
    #[must_use]
    pub fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        self.local(instant).date_naive()
    }

    /// Business date right now.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.date_of(Utc::now())
    }

    /// The instant expressed as wall-clock time in the business timezone.
    #[must_use]
    pub fn local(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        instant.with_timezone(&self.offset)
    }
}

impl Default for BusinessCalendar {
    fn default() -> Self {
        Self::from_offset_hours(DEFAULT_UTC_OFFSET_HOURS).unwrap_or(Self { offset: Utc.fix() })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_default_is_utc_plus_seven() {
        let calendar = BusinessCalendar::default();
        assert_eq!(calendar.offset().local_minus_utc(), 7 * 3600);
    }

    #[test]
    fn test_day_boundary_at_17_utc() {
        let calendar = BusinessCalendar::default();

        assert_eq!(
            calendar.date_of(utc("2024-03-01T16:59:59Z")),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
        assert_eq!(
            calendar.date_of(utc("2024-03-01T17:00:00Z")),
            NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()
        );
    }

    #[test]
    fn test_early_utc_morning_is_same_local_day() {
        let calendar = BusinessCalendar::default();
        assert_eq!(
            calendar.date_of(utc("2024-03-02T00:30:00Z")),
            NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()
        );
    }

    #[test]
    fn test_negative_offset() {
        let calendar = BusinessCalendar::from_offset_hours(-5).unwrap();
        assert_eq!(
            calendar.date_of(utc("2024-03-02T03:00:00Z")),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
    }

    #[test]
    fn test_offset_out_of_range() {
        assert_eq!(
            BusinessCalendar::from_offset_hours(15).unwrap_err(),
            CalendarError::OffsetOutOfRange(15)
        );
        assert!(BusinessCalendar::from_offset_hours(-13).is_err());
    }

    #[test]
    fn test_local_keeps_instant() {
        let calendar = BusinessCalendar::default();
        let now = utc("2024-03-01T10:00:00Z");
        let local = calendar.local(now);
        assert_eq!(local.to_rfc3339(), "2024-03-01T17:00:00+07:00");
        assert_eq!(local.with_timezone(&Utc), now);
    }
}
