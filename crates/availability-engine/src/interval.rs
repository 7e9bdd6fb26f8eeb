//! Half-open time intervals shared by every stage of the engine.

use chrono::{DateTime, Duration, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::{AvailabilityError, Result};

/// A time range `[start, end)` with `start <= end`.
///
/// Fields are private so the ordering invariant cannot be broken after
/// construction. Deserialization goes through the same check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct TimeInterval {
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
}

#[derive(Deserialize)]
struct RawInterval {
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
}

impl TryFrom<RawInterval> for TimeInterval {
    type Error = AvailabilityError;

    fn try_from(raw: RawInterval) -> Result<Self> {
        TimeInterval::new(raw.start, raw.end)
    }
}

impl TimeInterval {
    /// Build an interval, rejecting `end < start`. Zero-length intervals are allowed.
    pub fn new(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Result<Self> {
        if end < start {
            return Err(AvailabilityError::InvalidRange {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }
        Ok(Self { start, end })
    }

    /// Build an interval of `length` starting at `start`.
    pub fn starting_at(start: DateTime<FixedOffset>, length: Duration) -> Result<Self> {
        let end = start
            .checked_add_signed(length)
            .ok_or_else(|| AvailabilityError::InvalidRange {
                start: start.to_rfc3339(),
                end: format!("{start} + {length}"),
            })?;
        Self::new(start, end)
    }

    pub fn start(&self) -> DateTime<FixedOffset> {
        self.start
    }

    pub fn end(&self) -> DateTime<FixedOffset> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }

    /// Nonzero overlap test. Intervals that only touch at an endpoint do not overlap.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// True when `other` starts no later than this interval ends, i.e. the two
    /// can be coalesced into one contiguous interval.
    pub(crate) fn touches_or_overlaps(&self, other: &TimeInterval) -> bool {
        other.start <= self.end && self.start <= other.end
    }

    /// True when `instant` lies inside `[start, end)`.
    pub fn contains(&self, instant: DateTime<FixedOffset>) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Grow this interval's end to cover `other`'s end.
    pub(crate) fn extend_to(&mut self, end: DateTime<FixedOffset>) {
        if end > self.end {
            self.end = end;
        }
    }
}
