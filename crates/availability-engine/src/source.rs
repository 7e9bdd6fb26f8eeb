//! The seam between the engine and whatever fetches calendar events.
//!
//! The engine never talks to a calendar service. Callers implement
//! [`EventSource`] over their client (HTTP API, local dump, test fixture) and
//! pass it in explicitly.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::SourceError;

/// One end of an event as reported by a calendar API.
///
/// Timed events carry `dateTime`; all-day events carry only `date`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTime {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<DateTime<FixedOffset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl EventTime {
    pub fn at(instant: DateTime<FixedOffset>) -> Self {
        Self {
            date_time: Some(instant),
            date: None,
        }
    }

    pub fn all_day(date: NaiveDate) -> Self {
        Self {
            date_time: None,
            date: Some(date),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organizer {
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl Organizer {
    /// Display name when present and non-empty, otherwise the email.
    pub fn label(&self) -> &str {
        match self.display_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.email,
        }
    }
}

/// A single, already-expanded event instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceEvent {
    #[serde(default)]
    pub start: EventTime,
    #[serde(default)]
    pub end: EventTime,
    #[serde(default)]
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer: Option<Organizer>,
    #[serde(default)]
    pub location: String,
}

impl SourceEvent {
    /// Precise start and end instants, or `None` for date-only events.
    pub fn instants(&self) -> Option<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
        Some((self.start.date_time?, self.end.date_time?))
    }

    /// Whether the event can intersect `[range_start, range_end)`.
    ///
    /// Timed events need a nonzero overlap. Date-only events are compared by
    /// calendar date in the range's offset.
    pub fn within(&self, range_start: DateTime<FixedOffset>, range_end: DateTime<FixedOffset>) -> bool {
        if let Some((start, end)) = self.instants() {
            return start < range_end && end > range_start;
        }
        match (self.start.date, self.end.date) {
            (Some(start), Some(end)) => {
                start <= range_end.date_naive() && end > range_start.date_naive()
            }
            _ => false,
        }
    }

    pub fn organizer_label(&self) -> &str {
        self.organizer.as_ref().map(Organizer::label).unwrap_or("")
    }
}

/// Fetches the events of one calendar within a time window.
///
/// Implementations should return events intersecting `[range_start, range_end)`.
/// An `Err` only marks this calendar as unreadable; the aggregator carries on
/// with the others.
pub trait EventSource {
    fn fetch_busy_events(
        &self,
        calendar_id: &str,
        range_start: DateTime<FixedOffset>,
        range_end: DateTime<FixedOffset>,
    ) -> Result<Vec<SourceEvent>, SourceError>;
}

impl<S: EventSource + ?Sized> EventSource for &S {
    fn fetch_busy_events(
        &self,
        calendar_id: &str,
        range_start: DateTime<FixedOffset>,
        range_end: DateTime<FixedOffset>,
    ) -> Result<Vec<SourceEvent>, SourceError> {
        (**self).fetch_busy_events(calendar_id, range_start, range_end)
    }
}

/// In-memory source keyed by calendar id. Unknown ids are unavailable.
///
/// Useful for tests and for callers that fetched everything up front.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    calendars: Vec<(String, std::result::Result<Vec<SourceEvent>, SourceError>)>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_calendar(mut self, calendar_id: impl Into<String>, events: Vec<SourceEvent>) -> Self {
        self.calendars.push((calendar_id.into(), Ok(events)));
        self
    }

    pub fn with_failure(mut self, calendar_id: impl Into<String>, error: SourceError) -> Self {
        self.calendars.push((calendar_id.into(), Err(error)));
        self
    }
}

impl EventSource for StaticSource {
    fn fetch_busy_events(
        &self,
        calendar_id: &str,
        range_start: DateTime<FixedOffset>,
        range_end: DateTime<FixedOffset>,
    ) -> Result<Vec<SourceEvent>, SourceError> {
        let (_, entry) = self
            .calendars
            .iter()
            .find(|(id, _)| id == calendar_id)
            .ok_or_else(|| SourceError::Unavailable(format!("unknown calendar '{calendar_id}'")))?;

        let events = entry.clone()?;
        Ok(events
            .into_iter()
            .filter(|event| event.within(range_start, range_end))
            .collect())
    }
}
