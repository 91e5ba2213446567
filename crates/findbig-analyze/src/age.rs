//! Entry age calculation.
//!
//! Ages are measured from a timestamp to a reference time (normally now) and
//! expressed in the largest unit that keeps the value readable: seconds up
//! to a minute, then minutes, hours, days and 365-day years.

use std::fmt;
use std::time::{Duration, SystemTime};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use strum::Display;

const MINUTE: f64 = 60.0;
const HOUR: f64 = 60.0 * MINUTE;
const DAY: f64 = 24.0 * HOUR;
const YEAR: f64 = 365.0 * DAY;

/// Unit an age is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeUnit {
    #[strum(serialize = "sec")]
    Seconds,
    #[strum(serialize = "min")]
    Minutes,
    #[strum(serialize = "hr")]
    Hours,
    #[strum(serialize = "d")]
    Days,
    #[strum(serialize = "yr")]
    Years,
}

/// Elapsed time in a single unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Age {
    /// Elapsed time in `unit`.
    pub value: f64,
    /// Unit of `value`.
    pub unit: AgeUnit,
}

impl Age {
    /// Pick the unit for an elapsed number of seconds.
    pub fn from_seconds(secs: f64) -> Self {
        let secs = secs.max(0.0);
        let (value, unit) = if secs <= MINUTE {
            (secs, AgeUnit::Seconds)
        } else if secs / MINUTE < 60.0 {
            (secs / MINUTE, AgeUnit::Minutes)
        } else if secs / HOUR < 24.0 {
            (secs / HOUR, AgeUnit::Hours)
        } else if secs / DAY < 365.0 {
            (secs / DAY, AgeUnit::Days)
        } else {
            (secs / YEAR, AgeUnit::Years)
        };
        Self { value, unit }
    }

    /// Age of a duration.
    pub fn from_duration(duration: Duration) -> Self {
        Self::from_seconds(duration.as_secs_f64())
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} ({})", self.value, self.unit)
    }
}

/// Age of `timestamp` relative to `reference`. Timestamps in the future
/// have age zero.
pub fn age_since(timestamp: SystemTime, reference: DateTime<Local>) -> Age {
    let then: DateTime<Local> = timestamp.into();
    let elapsed = reference.signed_duration_since(then);
    let secs = elapsed
        .to_std()
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0);
    Age::from_seconds(secs)
}

/// Format a duration as a human-readable age string.
pub fn format_age(duration: Duration) -> String {
    Age::from_duration(duration).to_string()
}
