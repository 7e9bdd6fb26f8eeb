//! Daily working-hours window used by the slot search.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};

/// A daily `HH:MM`–`HH:MM` window. Defaults to 09:00–17:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub start_hour: u32,
    pub start_minute: u32,
    pub end_hour: u32,
    pub end_minute: u32,
}

impl Default for WorkingHours {
    fn default() -> Self {
        Self {
            start_hour: 9,
            start_minute: 0,
            end_hour: 17,
            end_minute: 0,
        }
    }
}

impl WorkingHours {
    /// Parse `"HH:MM"` bounds leniently.
    ///
    /// Each bound that is missing, empty, or unparsable falls back to its
    /// default (09:00 for the start, 17:00 for the end). Never fails.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Self {
        let default = Self::default();
        let (start_hour, start_minute) = start
            .and_then(parse_clock)
            .unwrap_or((default.start_hour, default.start_minute));
        let (end_hour, end_minute) = end
            .and_then(parse_clock)
            .unwrap_or((default.end_hour, default.end_minute));
        Self {
            start_hour,
            start_minute,
            end_hour,
            end_minute,
        }
    }

    /// The window on `date` in `offset`, as `(start, end)` instants.
    ///
    /// `None` when a bound is not a valid wall-clock time.
    pub fn window_on(
        &self,
        date: NaiveDate,
        offset: &FixedOffset,
    ) -> Option<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
        let start = NaiveTime::from_hms_opt(self.start_hour, self.start_minute, 0)?;
        let end = NaiveTime::from_hms_opt(self.end_hour, self.end_minute, 0)?;
        let start = offset.from_local_datetime(&date.and_time(start)).single()?;
        let end = offset.from_local_datetime(&date.and_time(end)).single()?;
        Some((start, end))
    }
}

impl fmt::Display for WorkingHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}-{:02}:{:02}",
            self.start_hour, self.start_minute, self.end_hour, self.end_minute
        )
    }
}

/// Parse `"H:MM"` / `"HH:MM"` into a valid (hour, minute) pair.
fn parse_clock(s: &str) -> Option<(u32, u32)> {
    let (hour, minute) = s.trim().split_once(':')?;
    let hour: u32 = hour.trim().parse().ok()?;
    let minute: u32 = minute.trim().parse().ok()?;
    (hour < 24 && minute < 60).then_some((hour, minute))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_explicit_bounds() {
        let hours = WorkingHours::parse(Some("08:30"), Some("18:15"));
        assert_eq!(
            hours,
            WorkingHours {
                start_hour: 8,
                start_minute: 30,
                end_hour: 18,
                end_minute: 15,
            }
        );
    }

    #[test]
    fn missing_bounds_use_defaults() {
        assert_eq!(WorkingHours::parse(None, None), WorkingHours::default());
        assert_eq!(WorkingHours::parse(Some(""), Some("")), WorkingHours::default());
    }

    #[test]
    fn unparsable_bounds_fall_back_independently() {
        let hours = WorkingHours::parse(Some("nine"), Some("16:00"));
        assert_eq!((hours.start_hour, hours.start_minute), (9, 0));
        assert_eq!((hours.end_hour, hours.end_minute), (16, 0));

        let hours = WorkingHours::parse(Some("10:00"), Some("25:00"));
        assert_eq!((hours.start_hour, hours.start_minute), (10, 0));
        assert_eq!((hours.end_hour, hours.end_minute), (17, 0));

        // No colon.
        let hours = WorkingHours::parse(Some("0900"), None);
        assert_eq!(hours, WorkingHours::default());
    }

    #[test]
    fn window_uses_given_offset() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();
        let (start, end) = WorkingHours::default().window_on(date, &offset).unwrap();
        assert_eq!(start.to_rfc3339(), "2026-03-16T09:00:00+02:00");
        assert_eq!(end.to_rfc3339(), "2026-03-16T17:00:00+02:00");
    }

    #[test]
    fn display_is_clock_range() {
        assert_eq!(WorkingHours::default().to_string(), "09:00-17:00");
    }
}
