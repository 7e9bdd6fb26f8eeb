//! Search a date range for open meeting slots.
//!
//! Walks the range one day at a time. On each weekday the working-hours window
//! (clamped to the requested range) is scanned with a cursor:
//!
//! - a candidate `[cursor, cursor + duration)` that overlaps a busy interval
//!   moves the cursor straight to that interval's end;
//! - an accepted candidate is recorded and the cursor advances by
//!   [`SLOT_STEP_MINUTES`], regardless of the requested duration.
//!
//! Because the step is fixed, consecutive slots of a long meeting overlap each
//! other (09:00–10:00, 09:30–10:30, …). They are reported as-is.

use chrono::{DateTime, Datelike, Duration, FixedOffset, Weekday};
use tracing::debug;

use crate::conflict::first_conflict;
use crate::error::{AvailabilityError, Result};
use crate::interval::TimeInterval;
use crate::working_hours::WorkingHours;

/// Cursor advance after an accepted slot.
pub const SLOT_STEP_MINUTES: i64 = 30;

/// Result cap used when the caller does not pick one.
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Parameters for one slot search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRequest {
    pub range_start: DateTime<FixedOffset>,
    pub range_end: DateTime<FixedOffset>,
    pub duration: Duration,
    pub working_hours: WorkingHours,
    pub max_results: usize,
}

impl SlotRequest {
    /// A request with default working hours and result cap.
    pub fn new(
        range_start: DateTime<FixedOffset>,
        range_end: DateTime<FixedOffset>,
        duration_minutes: i64,
    ) -> Self {
        Self {
            range_start,
            range_end,
            duration: minutes_saturating(duration_minutes),
            working_hours: WorkingHours::default(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    pub fn with_working_hours(mut self, working_hours: WorkingHours) -> Self {
        self.working_hours = working_hours;
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Reject non-positive durations and inverted ranges.
    pub fn validate(&self) -> Result<()> {
        if self.duration <= Duration::zero() {
            return Err(AvailabilityError::NonPositiveDuration {
                minutes: self.duration.num_minutes(),
            });
        }
        if self.range_end < self.range_start {
            return Err(AvailabilityError::InvalidRange {
                start: self.range_start.to_rfc3339(),
                end: self.range_end.to_rfc3339(),
            });
        }
        Ok(())
    }
}

/// Find up to `request.max_results` free slots of exactly `request.duration`.
///
/// `busy` is normally the output of [`merge_intervals`](crate::merge_intervals);
/// unmerged input gives the same slots, just with more conflict checks.
/// Day boundaries and working hours are evaluated in the offset of
/// `request.range_start`.
///
/// # Errors
///
/// [`AvailabilityError::NonPositiveDuration`] or
/// [`AvailabilityError::InvalidRange`] when the request is malformed. Finding
/// nothing is not an error.
pub fn find_available_slots(
    request: &SlotRequest,
    busy: &[TimeInterval],
) -> Result<Vec<TimeInterval>> {
    request.validate()?;

    let mut slots: Vec<TimeInterval> = Vec::new();
    if request.max_results == 0 {
        return Ok(slots);
    }

    let offset = *request.range_start.offset();
    let step = Duration::minutes(SLOT_STEP_MINUTES);
    let one_day = Duration::days(1);

    let mut day = request.range_start;
    while day < request.range_end {
        if !is_weekend(day.weekday()) {
            if let Some((open, close)) = request.working_hours.window_on(day.date_naive(), &offset)
            {
                let open = open.max(request.range_start);
                let close = close.min(request.range_end);

                let mut cursor = open;
                while let Some(slot_end) = cursor
                    .checked_add_signed(request.duration)
                    .filter(|end| *end <= close)
                {
                    let candidate = TimeInterval::new(cursor, slot_end)?;

                    if let Some(blocker) = first_conflict(&candidate, busy) {
                        // blocker.end() > cursor, so the scan always moves forward.
                        cursor = blocker.end().with_timezone(&offset);
                        continue;
                    }

                    slots.push(candidate);
                    if slots.len() >= request.max_results {
                        debug!(found = slots.len(), "slot search hit result cap");
                        return Ok(slots);
                    }
                    cursor += step;
                }
            }
        }

        day = match day.checked_add_signed(one_day) {
            Some(next) => next,
            None => break,
        };
    }

    debug!(found = slots.len(), "slot search exhausted range");
    Ok(slots)
}

fn minutes_saturating(minutes: i64) -> Duration {
    Duration::try_minutes(minutes).unwrap_or(if minutes < 0 {
        Duration::MIN
    } else {
        Duration::MAX
    })
}

fn is_weekend(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Sat | Weekday::Sun)
}
