//! Busy-time aggregation across several calendars.
//!
//! Pulls events for each calendar id from an injected [`EventSource`], keeps
//! only timed events (optionally restricted to a room), and produces both the
//! merged busy timeline and per-event detail records. A calendar that cannot
//! be read is skipped and reported, never fatal.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{AvailabilityError, Result};
use crate::interval::TimeInterval;
use crate::merge::merge_intervals;
use crate::source::{EventSource, SourceEvent};

/// Calendar id that refers to the caller's own calendar.
pub const PRIMARY_CALENDAR: &str = "primary";

/// One qualifying event with its display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyRecord {
    pub interval: TimeInterval,
    pub summary: String,
    pub organizer: String,
    pub calendar_id: String,
}

/// A calendar that could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFailure {
    pub calendar_id: String,
    pub reason: String,
}

/// Result of aggregating busy time over a set of calendars.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyTimes {
    /// Merged busy timeline (sorted, pairwise disjoint).
    pub merged: Vec<TimeInterval>,
    /// One record per qualifying event, sorted by start.
    pub details: Vec<BusyRecord>,
    /// Calendars skipped because the source returned an error.
    pub failures: Vec<SourceFailure>,
}

/// Case-insensitive substring match on an event's location.
///
/// `None` and the empty string match everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomFilter {
    needle: Option<String>,
}

impl RoomFilter {
    pub fn new(room: Option<&str>) -> Self {
        let needle = room.filter(|r| !r.is_empty()).map(str::to_lowercase);
        Self { needle }
    }

    pub fn any() -> Self {
        Self { needle: None }
    }

    pub fn matches(&self, location: &str) -> bool {
        match &self.needle {
            Some(needle) => location.to_lowercase().contains(needle.as_str()),
            None => true,
        }
    }
}

/// Aggregate busy time for `calendar_ids` within `[range_start, range_end)`.
///
/// # Errors
///
/// Returns [`AvailabilityError::InvalidRange`] if `range_end < range_start`.
/// Source failures are recorded in [`BusyTimes::failures`] instead.
pub fn compute_busy_times<S, C>(
    source: &S,
    calendar_ids: C,
    range_start: DateTime<FixedOffset>,
    range_end: DateTime<FixedOffset>,
    room: &RoomFilter,
) -> Result<BusyTimes>
where
    S: EventSource + ?Sized,
    C: IntoIterator,
    C::Item: AsRef<str>,
{
    if range_end < range_start {
        return Err(AvailabilityError::InvalidRange {
            start: range_start.to_rfc3339(),
            end: range_end.to_rfc3339(),
        });
    }

    let mut details: Vec<BusyRecord> = Vec::new();
    let mut failures: Vec<SourceFailure> = Vec::new();

    for calendar_id in calendar_ids {
        let calendar_id = calendar_id.as_ref();
        let events = match source.fetch_busy_events(calendar_id, range_start, range_end) {
            Ok(events) => events,
            Err(err) => {
                warn!(calendar_id, error = %err, "skipping unreadable calendar");
                failures.push(SourceFailure {
                    calendar_id: calendar_id.to_string(),
                    reason: err.to_string(),
                });
                continue;
            }
        };

        let before = details.len();
        details.extend(
            events
                .iter()
                .filter(|event| room.matches(&event.location))
                .filter_map(|event| busy_record(event, calendar_id)),
        );
        debug!(
            calendar_id,
            fetched = events.len(),
            kept = details.len() - before,
            "collected busy events"
        );
    }

    // Stable: events with equal starts keep fetch order.
    details.sort_by_key(|record| record.interval.start());

    let merged = merge_intervals(details.iter().map(|record| record.interval));

    Ok(BusyTimes {
        merged,
        details,
        failures,
    })
}

fn busy_record(event: &SourceEvent, calendar_id: &str) -> Option<BusyRecord> {
    // All-day events have no precise instants and never block a slot.
    let (start, end) = event.instants()?;
    let interval = match TimeInterval::new(start, end) {
        Ok(interval) => interval,
        Err(err) => {
            debug!(calendar_id, summary = %event.summary, error = %err, "dropping event");
            return None;
        }
    };

    Some(BusyRecord {
        interval,
        summary: event.summary.clone(),
        organizer: event.organizer_label().to_string(),
        calendar_id: calendar_id.to_string(),
    })
}

/// Split a comma-separated list of calendar ids, trimming blanks.
pub fn split_calendar_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

/// The listed users' calendars, or just the primary calendar when none are listed.
pub fn users_or_primary(primary: &str, users: &str) -> Vec<String> {
    let users = split_calendar_list(users);
    if users.is_empty() {
        vec![primary.to_string()]
    } else {
        users
    }
}
