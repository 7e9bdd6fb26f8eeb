//! Event source backed by per-calendar JSON dumps on disk.
//!
//! `<dir>/<calendar_id>.json` holds a calendar-API style event list:
//!
//! ```json
//! {"items": [{"summary": "Standup",
//!             "start": {"dateTime": "2026-03-16T09:00:00+00:00"},
//!             "end":   {"dateTime": "2026-03-16T09:15:00+00:00"}}]}
//! ```
//!
//! A missing or unreadable file marks only that calendar as unavailable.

use std::fs;
use std::path::{Path, PathBuf};

use availability_engine::{EventSource, SourceError, SourceEvent};
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct EventList {
    #[serde(default)]
    items: Vec<SourceEvent>,
}

#[derive(Debug, Clone)]
pub struct FileSource {
    dir: PathBuf,
}

impl FileSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the dump for `calendar_id`, or `None` if the id could escape `dir`.
    fn path_for(&self, calendar_id: &str) -> Option<PathBuf> {
        let invalid = calendar_id.is_empty()
            || calendar_id.starts_with('.')
            || calendar_id.contains(['/', '\\']);
        if invalid {
            return None;
        }
        Some(self.dir.join(format!("{calendar_id}.json")))
    }
}

impl EventSource for FileSource {
    fn fetch_busy_events(
        &self,
        calendar_id: &str,
        range_start: DateTime<FixedOffset>,
        range_end: DateTime<FixedOffset>,
    ) -> Result<Vec<SourceEvent>, SourceError> {
        let path = self
            .path_for(calendar_id)
            .ok_or_else(|| SourceError::Unavailable(format!("invalid calendar id '{calendar_id}'")))?;

        let list = read_event_list(&path)?;

        Ok(list
            .items
            .into_iter()
            .filter(|event| event.within(range_start, range_end))
            .collect())
    }
}

fn read_event_list(path: &Path) -> Result<EventList, SourceError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| SourceError::Unavailable(format!("{}: {}", path.display(), e)))?;
    serde_json::from_str(&raw)
        .map_err(|e| SourceError::Malformed(format!("{}: {}", path.display(), e)))
}
