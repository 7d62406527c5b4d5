//! Traits describing schedule sources and the errors they report.

use std::fs;
use std::io::Error as IoError;
use std::path::{Path, PathBuf};

use serde_json::Error as JsonError;

use crate::model::{Miles, Schedule, ScheduleMeta};

#[derive(thiserror::Error, Debug)]
/// Configuration errors raised while loading or consulting a schedule.
pub enum ScheduleError {
    /// No schedule was installed before the engine was consulted.
    #[error("Maintenance schedule missing; load a schedule before requesting recommendations")]
    Missing,
    /// The base interval table is empty, so no rollover step exists.
    #[error("Maintenance schedule has no intervals configured")]
    NoIntervals,
    /// An interval key is not a positive mileage.
    #[error("Invalid interval {interval}: intervals must be positive")]
    InvalidInterval {
        /// Offending interval key.
        interval: Miles,
    },
    /// A service carries an unusable price or labor estimate.
    #[error("Invalid service {service:?}: {reason}")]
    InvalidService {
        /// Service name.
        service: String,
        /// What is wrong with it.
        reason: String,
    },
    /// Reading the schedule source failed.
    #[error("I/O error: {0}")]
    Io(#[from] IoError),
    /// The schedule source is not valid schedule JSON.
    #[error("Parse error: {0}")]
    Parse(#[from] JsonError),
}

/// Trait for sources of a maintenance schedule.
pub trait SchedulePort: Send + Sync {
    /// Metadata describing the vehicles this schedule covers.
    fn meta(&self) -> &ScheduleMeta;

    /// Produce the schedule table.
    ///
    /// # Errors
    ///
    /// Returns a [`ScheduleError`] when the source cannot be read or is invalid.
    fn load(&self) -> Result<Schedule, ScheduleError>;
}

/// Schedule read from a JSON file on disk.
pub struct JsonSchedulePort {
    path: PathBuf,
    meta: ScheduleMeta,
}

impl JsonSchedulePort {
    /// Create a port reading `path`, described by `meta`.
    #[must_use]
    pub fn new<P: Into<PathBuf>>(path: P, meta: ScheduleMeta) -> Self {
        Self {
            path: path.into(),
            meta,
        }
    }

    /// File the schedule is read from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SchedulePort for JsonSchedulePort {
    fn meta(&self) -> &ScheduleMeta {
        &self.meta
    }

    fn load(&self) -> Result<Schedule, ScheduleError> {
        let json = fs::read_to_string(&self.path)?;
        Schedule::from_json_str(&json)
    }
}
