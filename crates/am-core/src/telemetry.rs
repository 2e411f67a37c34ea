//! Monitor state and performance counter types

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Health of a monitor, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HealthState {
    Uninitialized,
    Success,
    Warning,
    Error,
}

impl HealthState {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthState::Uninitialized => "Uninitialized",
            HealthState::Success => "Success",
            HealthState::Warning => "Warning",
            HealthState::Error => "Error",
        }
    }
}

impl fmt::Display for HealthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HealthState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uninitialized" | "" => Ok(HealthState::Uninitialized),
            "success" | "healthy" => Ok(HealthState::Success),
            "warning" => Ok(HealthState::Warning),
            "error" | "critical" => Ok(HealthState::Error),
            other => Err(format!("unknown health state '{}'", other)),
        }
    }
}

/// Current state of one monitor targeting an object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorState {
    /// Monitor display name
    pub monitor: String,

    /// Current health
    pub health: HealthState,

    /// When the health last changed
    pub last_modified: DateTime<Utc>,
}

/// Identifies a performance counter on an object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterPath {
    /// Performance object, e.g. `Processor`
    pub object: String,

    /// Counter, e.g. `% Processor Time`
    pub counter: String,

    /// Instance, e.g. `_Total`; `None` matches any instance
    pub instance: Option<String>,
}

impl fmt::Display for CounterPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.instance {
            Some(instance) => write!(f, "\\{}({})\\{}", self.object, instance, self.counter),
            None => write!(f, "\\{}\\{}", self.object, self.counter),
        }
    }
}

/// Half-open time range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Window covering the `hours` before `end`.
    pub fn last_hours(end: DateTime<Utc>, hours: u32) -> Self {
        Self {
            start: end - Duration::hours(i64::from(hours)),
            end,
        }
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && at < self.end
    }
}

/// A single collected performance value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerfSample {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}
