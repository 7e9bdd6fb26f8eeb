//! Serde-friendly DTOs for the JSON printed by `avail`.
//!
//! Times are rendered as `YYYY-MM-DD HH:MM` in each value's own offset, with
//! the weekday spelled out, so the output reads well to people and LLMs alike.

use availability_engine::merge::covered_minutes;
use availability_engine::{BusyRecord, BusyReport, SlotSearch, SourceFailure, TimeInterval};
use chrono::{DateTime, FixedOffset};
use serde::Serialize;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

fn clock(t: DateTime<FixedOffset>) -> String {
    t.format(TIME_FORMAT).to_string()
}

fn weekday(t: DateTime<FixedOffset>) -> String {
    t.format("%A").to_string()
}

#[derive(Debug, Serialize)]
pub struct SlotDto {
    pub start: String,
    pub end: String,
    pub day: String,
}

impl From<&TimeInterval> for SlotDto {
    fn from(slot: &TimeInterval) -> Self {
        Self {
            start: clock(slot.start()),
            end: clock(slot.end()),
            day: weekday(slot.start()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BlockingEventDto {
    pub start: String,
    pub end: String,
    pub summary: String,
    pub organizer: String,
    pub calendar: String,
}

impl BlockingEventDto {
    fn new(record: &BusyRecord, primary_calendar: &str) -> Self {
        let calendar = if record.calendar_id == primary_calendar {
            "Your calendar".to_string()
        } else {
            record.calendar_id.clone()
        };
        Self {
            start: clock(record.interval.start()),
            end: clock(record.interval.end()),
            summary: record.summary.clone(),
            organizer: record.organizer.clone(),
            calendar,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FailureDto {
    pub calendar: String,
    pub error: String,
}

impl From<&SourceFailure> for FailureDto {
    fn from(failure: &SourceFailure) -> Self {
        Self {
            calendar: failure.calendar_id.clone(),
            error: failure.reason.clone(),
        }
    }
}

/// Output of `avail slots`.
#[derive(Debug, Serialize)]
pub struct SlotsOutput {
    pub available_slots: Vec<SlotDto>,
    pub duration_minutes: i64,
    pub busy_times: Vec<BlockingEventDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guests_checked: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_filter: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unreadable_calendars: Vec<FailureDto>,
}

impl SlotsOutput {
    pub fn new(
        search: &SlotSearch,
        primary_calendar: &str,
        guests: Option<String>,
        room: Option<String>,
    ) -> Self {
        Self {
            available_slots: search.slots.iter().map(SlotDto::from).collect(),
            duration_minutes: search.duration_minutes,
            busy_times: search
                .busy
                .iter()
                .map(|record| BlockingEventDto::new(record, primary_calendar))
                .collect(),
            guests_checked: guests,
            room_filter: room,
            unreadable_calendars: search.failures.iter().map(FailureDto::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PeriodDto {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Serialize)]
pub struct BusyTimeDto {
    pub start: String,
    pub end: String,
    pub calendar: String,
    pub summary: String,
    pub organizer: String,
    pub day: String,
    pub duration_minutes: i64,
}

impl From<&BusyRecord> for BusyTimeDto {
    fn from(record: &BusyRecord) -> Self {
        Self {
            start: clock(record.interval.start()),
            end: clock(record.interval.end()),
            calendar: record.calendar_id.clone(),
            summary: record.summary.clone(),
            organizer: record.organizer.clone(),
            day: weekday(record.interval.start()),
            duration_minutes: record.interval.duration_minutes(),
        }
    }
}

/// Output of `avail busy`.
#[derive(Debug, Serialize)]
pub struct BusyOutput {
    pub period: PeriodDto,
    pub calendars_checked: Vec<String>,
    pub busy_times: Vec<BusyTimeDto>,
    pub total_busy_times: usize,
    /// Minutes covered by at least one event, overlaps counted once.
    pub total_busy_minutes: i64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unreadable_calendars: Vec<FailureDto>,
}

impl From<&BusyReport> for BusyOutput {
    fn from(report: &BusyReport) -> Self {
        Self {
            period: PeriodDto {
                start: clock(report.range_start),
                end: clock(report.range_end),
            },
            calendars_checked: report.calendars_checked.clone(),
            busy_times: report.busy.iter().map(BusyTimeDto::from).collect(),
            total_busy_times: report.busy.len(),
            total_busy_minutes: covered_minutes(&report.merged),
            unreadable_calendars: report.failures.iter().map(FailureDto::from).collect(),
        }
    }
}
