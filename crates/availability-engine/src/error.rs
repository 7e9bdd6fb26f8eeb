//! Error types for availability-engine operations.

use thiserror::Error;

/// Input errors that abort a computation.
///
/// Partial calendar failures and empty results are not errors; they surface as
/// [`SourceFailure`](crate::busy::SourceFailure) records and empty lists.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AvailabilityError {
    #[error("Invalid time range: end {end} is before start {start}")]
    InvalidRange { start: String, end: String },

    #[error("Invalid duration: {minutes} minutes (must be positive)")]
    NonPositiveDuration { minutes: i64 },
}

/// Failure reported by an [`EventSource`](crate::source::EventSource) for a
/// single calendar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The calendar could not be read at all (missing, forbidden, offline).
    #[error("calendar unavailable: {0}")]
    Unavailable(String),

    /// The calendar was read but its payload could not be understood.
    #[error("malformed calendar data: {0}")]
    Malformed(String),
}

pub type Result<T> = std::result::Result<T, AvailabilityError>;
