/// Core data types for the weather anomaly monitoring service.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no detection logic and no I/O — only types, their
/// (de)serialization, and the timestamp rendering helper.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Monitored variables
// ---------------------------------------------------------------------------

/// The five weather variables checked for anomalies.
///
/// Declaration order is the fixed traversal order used during scoring and in
/// the `parameters.variables` echo, so responses stay reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variable {
    /// Outdoor temperature (°C).
    TempOut,
    /// Outdoor humidity (%).
    OutHum,
    /// Wind speed (m/s).
    WindSpeed,
    /// Barometric pressure (hPa).
    Bar,
    /// Rainfall (mm).
    Rain,
}

impl Variable {
    /// All monitored variables, in traversal order.
    pub const ALL: [Variable; 5] = [
        Variable::TempOut,
        Variable::OutHum,
        Variable::WindSpeed,
        Variable::Bar,
        Variable::Rain,
    ];

    /// Wire name of the variable, matching the observation field it reads.
    pub fn name(self) -> &'static str {
        match self {
            Variable::TempOut => "temp_out",
            Variable::OutHum => "out_hum",
            Variable::WindSpeed => "wind_speed",
            Variable::Bar => "bar",
            Variable::Rain => "rain",
        }
    }
}

impl std::fmt::Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ---------------------------------------------------------------------------
// Observation types
// ---------------------------------------------------------------------------

/// A single weather station reading.
///
/// Any of the five variable values may be absent; a missing or `null` field
/// deserializes to `None` and is simply skipped during scoring. Immutable
/// once received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub station_id: String,
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
    /// Outdoor temperature (°C).
    #[serde(default)]
    pub temp_out: Option<f64>,
    /// Outdoor humidity (%).
    #[serde(default)]
    pub out_hum: Option<f64>,
    /// Wind speed (m/s).
    #[serde(default)]
    pub wind_speed: Option<f64>,
    /// Barometric pressure (hPa).
    #[serde(default)]
    pub bar: Option<f64>,
    /// Rainfall (mm).
    #[serde(default)]
    pub rain: Option<f64>,
}

impl Observation {
    /// Value of the given variable, if present in this reading.
    pub fn value_of(&self, variable: Variable) -> Option<f64> {
        match variable {
            Variable::TempOut => self.temp_out,
            Variable::OutHum => self.out_hum,
            Variable::WindSpeed => self.wind_speed,
            Variable::Bar => self.bar,
            Variable::Rain => self.rain,
        }
    }
}

/// All observations for one station, sorted ascending by timestamp.
///
/// Produced by `analysis::grouping::group_by_station` from a flat request
/// list. Built fresh per request and discarded on completion.
#[derive(Debug, Clone, PartialEq)]
pub struct StationSeries {
    pub station_id: String,
    pub observations: Vec<Observation>,
}

// ---------------------------------------------------------------------------
// Anomaly records
// ---------------------------------------------------------------------------

/// One flagged reading, emitted by the window scorer and never mutated
/// afterward.
///
/// Timestamps are rendered with [`format_timestamp`]; values and z-scores
/// are rounded to two decimal places for reporting. The anomaly timestamp
/// always lies within `[time_start, time_end]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnomalyRecord {
    /// Timestamp of the first observation in the flagging window.
    pub time_start: String,
    /// Timestamp of the last observation in the flagging window.
    pub time_end: String,
    pub station_id: String,
    pub variable: &'static str,
    /// Timestamp of the flagged reading.
    pub anomaly_timestamp: String,
    pub anomaly_value: f64,
    pub z_score: f64,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Invalid detection parameters, rejected before any scoring begins.
///
/// Sparse data is never an error — short series and thin windows silently
/// produce fewer or zero results.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Window length below the minimum of 3.
    WindowTooShort(usize),
    /// Stride of zero.
    StrideTooSmall(usize),
    /// Threshold that is zero, negative, or not finite.
    ThresholdNotPositive(f64),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::WindowTooShort(got) => {
                write!(f, "window_len must be at least 3, got {}", got)
            }
            ConfigError::StrideTooSmall(got) => {
                write!(f, "stride must be at least 1, got {}", got)
            }
            ConfigError::ThresholdNotPositive(got) => {
                write!(f, "threshold must be a positive number, got {}", got)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Timestamp rendering
// ---------------------------------------------------------------------------

/// Render an epoch timestamp as `YYYY-MM-DD HH:MM:SS` in UTC.
///
/// UTC keeps output independent of the server's timezone, and this format
/// sorts lexicographically in timestamp order, so rendered window bounds can
/// be compared directly. Timestamps outside chrono's representable range
/// fall back to the raw integer.
pub fn format_timestamp(timestamp: i64) -> String {
    match chrono::DateTime::from_timestamp(timestamp, 0) {
        Some(datetime) => datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => timestamp.to_string(),
    }
}
