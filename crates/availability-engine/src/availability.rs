//! End-to-end availability queries over several calendars.
//!
//! Combines the three stages into the two questions callers actually ask:
//!
//! - [`find_meeting_slots`] answers "when can we meet?" over the caller's calendar plus
//!   guest calendars, optionally restricted to one room, aggregated, merged,
//!   then searched for slots;
//! - [`busy_report`] answers "when are these people busy?" with per-event busy details
//!   for a list of calendars, with the merged timeline alongside.
//!
//! Unreadable calendars are reported in `failures` and otherwise ignored.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use tracing::debug;

use crate::busy::{compute_busy_times, BusyRecord, RoomFilter, SourceFailure, PRIMARY_CALENDAR};
use crate::error::Result;
use crate::interval::TimeInterval;
use crate::slots::{find_available_slots, SlotRequest};
use crate::source::EventSource;

/// A meeting-slot question across the caller's and guests' calendars.
#[derive(Debug, Clone)]
pub struct SlotQuery {
    /// The caller's own calendar id, always checked first.
    pub primary_calendar: String,
    /// Additional calendar ids (usually guest email addresses).
    pub guests: Vec<String>,
    /// Only events whose location contains this string block time.
    pub room: Option<String>,
    pub request: SlotRequest,
}

impl SlotQuery {
    pub fn new(request: SlotRequest) -> Self {
        Self {
            primary_calendar: PRIMARY_CALENDAR.to_string(),
            guests: Vec::new(),
            room: None,
            request,
        }
    }

    pub fn with_guests<I, T>(mut self, guests: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.guests = guests.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(room.into());
        self
    }

    /// Calendars to check, primary first.
    pub fn calendars(&self) -> Vec<&str> {
        std::iter::once(self.primary_calendar.as_str())
            .chain(self.guests.iter().map(String::as_str))
            .collect()
    }
}

/// Outcome of [`find_meeting_slots`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotSearch {
    /// Accepted slots in chronological order (may overlap each other).
    pub slots: Vec<TimeInterval>,
    /// The events that blocked time, sorted by start.
    pub busy: Vec<BusyRecord>,
    pub failures: Vec<SourceFailure>,
    pub duration_minutes: i64,
}

/// Outcome of [`busy_report`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusyReport {
    pub range_start: DateTime<FixedOffset>,
    pub range_end: DateTime<FixedOffset>,
    pub calendars_checked: Vec<String>,
    /// One record per timed event, sorted by start.
    pub busy: Vec<BusyRecord>,
    /// Merged busy timeline across all calendars.
    pub merged: Vec<TimeInterval>,
    pub failures: Vec<SourceFailure>,
}

/// Aggregate, merge and search in one call.
///
/// The request is validated before any calendar is fetched.
///
/// # Errors
///
/// Only malformed requests fail; see [`SlotRequest::validate`].
pub fn find_meeting_slots<S>(source: &S, query: &SlotQuery) -> Result<SlotSearch>
where
    S: EventSource + ?Sized,
{
    query.request.validate()?;

    let room = RoomFilter::new(query.room.as_deref());
    let busy = compute_busy_times(
        source,
        query.calendars(),
        query.request.range_start,
        query.request.range_end,
        &room,
    )?;
    debug!(
        events = busy.details.len(),
        merged = busy.merged.len(),
        failures = busy.failures.len(),
        "aggregated busy time"
    );

    let slots = find_available_slots(&query.request, &busy.merged)?;

    Ok(SlotSearch {
        slots,
        busy: busy.details,
        failures: busy.failures,
        duration_minutes: query.request.duration.num_minutes(),
    })
}

/// Busy details for `calendars` within `[range_start, range_end)`, unfiltered.
///
/// # Errors
///
/// [`AvailabilityError::InvalidRange`](crate::AvailabilityError::InvalidRange)
/// when `range_end < range_start`.
pub fn busy_report<S>(
    source: &S,
    calendars: &[String],
    range_start: DateTime<FixedOffset>,
    range_end: DateTime<FixedOffset>,
) -> Result<BusyReport>
where
    S: EventSource + ?Sized,
{
    let busy = compute_busy_times(source, calendars, range_start, range_end, &RoomFilter::any())?;

    Ok(BusyReport {
        range_start,
        range_end,
        calendars_checked: calendars.to_vec(),
        busy: busy.details,
        merged: busy.merged,
        failures: busy.failures,
    })
}
