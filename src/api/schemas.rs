/// Request and response schemas for the HTTP API.
///
/// Plain serde structs at the service boundary. Shape validation happens
/// once here via serde; parameter bounds are checked by
/// `DetectionConfig::validate` before any scoring.

use serde::{Deserialize, Serialize};

use crate::model::{AnomalyRecord, Observation};

/// Body of `POST /detect`.
#[derive(Debug, Deserialize)]
pub struct DetectionRequest {
    /// Observations to scan, in any order, stations freely mixed.
    pub observations: Vec<Observation>,
    /// Window length W; omitted means the configured service default.
    pub window_len: Option<usize>,
    /// Stride S; omitted means the configured service default.
    pub stride: Option<usize>,
    /// Z-score threshold; omitted means the configured service default.
    pub threshold: Option<f64>,
}

/// Effective parameters echoed back with every detection response.
#[derive(Debug, Serialize)]
pub struct DetectionParameters {
    pub window_len: usize,
    pub stride: usize,
    pub threshold: f64,
    /// The monitored variables, in scoring order.
    pub variables: Vec<&'static str>,
}

/// Response of `POST /detect`.
#[derive(Debug, Serialize)]
pub struct DetectionResponse {
    /// `"anomalies_found"` or `"no_anomalies"`.
    pub status: &'static str,
    pub message: String,
    /// When this detection pass ran (UTC).
    pub detection_time: String,
    pub total_observations: usize,
    pub total_anomalies: usize,
    pub parameters: DetectionParameters,
    /// Flagged readings; empty when none were found.
    pub anomalies: Vec<AnomalyRecord>,
}

/// Response of `GET /test-data`.
#[derive(Debug, Serialize)]
pub struct TestDataResponse {
    pub message: String,
    pub total_observations: usize,
    pub stations: Vec<String>,
    pub time_range: TimeRange,
    pub observations: Vec<Observation>,
}

/// First and last timestamp of a served observation set.
#[derive(Debug, Serialize)]
pub struct TimeRange {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// JSON error body for rejected requests.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
