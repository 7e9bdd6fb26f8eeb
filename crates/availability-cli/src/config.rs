//! Layered configuration: flags > environment > `avail.toml` > defaults.
//!
//! Clap handles the flag and environment layers; this module reads the TOML
//! file and folds everything into [`Settings`]. Missing required values are a
//! typed [`ConfigError`], never a panic.

use std::fs;
use std::path::{Path, PathBuf};

use availability_engine::busy::PRIMARY_CALENDAR;
use availability_engine::slots::DEFAULT_MAX_RESULTS;
use availability_engine::WorkingHours;
use serde::Deserialize;
use thiserror::Error;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "avail.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("no events directory configured (use --events-dir, AVAIL_EVENTS_DIR, or events_dir in avail.toml)")]
    MissingEventsDir,

    #[error("events directory does not exist: {0}")]
    EventsDirNotFound(PathBuf),

    #[error("max_results in config file must be positive")]
    ZeroMaxResults,
}

/// Contents of `avail.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub events_dir: Option<PathBuf>,
    pub primary_calendar: Option<String>,
    pub working_hours_start: Option<String>,
    pub working_hours_end: Option<String>,
    pub max_results: Option<usize>,
}

impl FileConfig {
    /// Load the file at `explicit`, or `avail.toml` if it exists, or nothing.
    ///
    /// An explicitly named file must exist; the default one is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.is_file() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let raw = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        Self::parse(&raw).map_err(|source| ConfigError::Parse { path, source })
    }

    pub fn parse(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }
}

/// Command-line values that override the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub events_dir: Option<PathBuf>,
    pub working_hours_start: Option<String>,
    pub working_hours_end: Option<String>,
    /// Non-positive values are ignored, matching the tool's historic behaviour.
    pub max_results: Option<i64>,
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub events_dir: PathBuf,
    pub primary_calendar: String,
    pub working_hours: WorkingHours,
    pub max_results: usize,
}

impl Settings {
    pub fn resolve(file: FileConfig, overrides: Overrides) -> Result<Self, ConfigError> {
        let events_dir = overrides
            .events_dir
            .or(file.events_dir)
            .ok_or(ConfigError::MissingEventsDir)?;
        if !events_dir.is_dir() {
            return Err(ConfigError::EventsDirNotFound(events_dir));
        }

        let file_max = match file.max_results {
            Some(0) => return Err(ConfigError::ZeroMaxResults),
            other => other,
        };
        let max_results = overrides
            .max_results
            .filter(|&n| n > 0)
            .and_then(|n| usize::try_from(n).ok())
            .or(file_max)
            .unwrap_or(DEFAULT_MAX_RESULTS);

        let start = overrides.working_hours_start.or(file.working_hours_start);
        let end = overrides.working_hours_end.or(file.working_hours_end);
        let working_hours = WorkingHours::parse(start.as_deref(), end.as_deref());

        Ok(Self {
            events_dir,
            primary_calendar: file
                .primary_calendar
                .unwrap_or_else(|| PRIMARY_CALENDAR.to_string()),
            working_hours,
            max_results,
        })
    }
}
