//! # availability-engine
//!
//! Busy-time merging and meeting slot search for calendar agents.
//!
//! The engine consumes events that were already fetched from one or more
//! calendars and answers availability questions deterministically. It performs
//! no I/O: events come in through the [`EventSource`] trait, results go out as
//! plain data.
//!
//! ## Pipeline
//!
//! events → [`busy`] (filter + detail records) → [`merge`] (disjoint busy
//! timeline) → [`slots`] (working-hours slot search)
//!
//! ## Modules
//!
//! - [`interval`]: `TimeInterval` with half-open overlap semantics
//! - [`source`]: `EventSource` seam and the raw event model
//! - [`busy`]: Busy-time aggregation across calendars, room filtering
//! - [`merge`]: Coalesce overlapping/adjacent intervals
//! - [`conflict`]: Slot vs. busy-interval overlap checks
//! - [`working_hours`]: Daily working window, lenient `HH:MM` parsing
//! - [`slots`]: Day-by-day slot search
//! - [`availability`]: End-to-end slot search and busy reports
//! - [`error`]: Error types

pub mod availability;
pub mod busy;
pub mod conflict;
pub mod error;
pub mod interval;
pub mod merge;
pub mod slots;
pub mod source;
pub mod working_hours;

pub use availability::{busy_report, find_meeting_slots, BusyReport, SlotQuery, SlotSearch};
pub use busy::{compute_busy_times, BusyRecord, BusyTimes, RoomFilter, SourceFailure};
pub use error::{AvailabilityError, SourceError};
pub use interval::TimeInterval;
pub use merge::merge_intervals;
pub use slots::{find_available_slots, SlotRequest};
pub use source::{EventSource, EventTime, Organizer, SourceEvent, StaticSource};
pub use working_hours::WorkingHours;
