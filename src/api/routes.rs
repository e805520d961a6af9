/// API route handlers.
///
/// Handlers translate between JSON and the detection core and hold no logic
/// of their own. Parameter validation failures reject the whole request
/// with HTTP 400; sparse data never fails a request.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;

use crate::analysis;
use crate::config::DetectionConfig;
use crate::logging::{self, DataSource};
use crate::model::Variable;
use crate::sample_data::{SAMPLE_POINTS_PER_STATION, SAMPLE_STATIONS};

use super::schemas::{
    DetectionParameters, DetectionRequest, DetectionResponse, ErrorResponse, TestDataResponse,
    TimeRange,
};
use super::AppState;

/// `GET /` — service information and endpoint listing.
pub async fn service_info() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "Weather Anomaly Monitoring Service",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "operational",
        "description": "Sliding-window z-score anomaly detection for weather station time series",
        "endpoints": {
            "POST /detect": "Detect anomalies in observation data",
            "GET /test-data": "Get a sample observation set"
        }
    }))
}

/// `GET /test-data` — the startup-built sample observation set.
pub async fn test_data(State(state): State<AppState>) -> Json<TestDataResponse> {
    let sample = &state.sample_data;
    let (start, end) = match sample.time_range() {
        Some((first, last)) => (
            Some(crate::model::format_timestamp(first)),
            Some(crate::model::format_timestamp(last)),
        ),
        None => (None, None),
    };

    Json(TestDataResponse {
        message: format!(
            "Sample observation set: {} stations, {} time points each",
            SAMPLE_STATIONS, SAMPLE_POINTS_PER_STATION
        ),
        total_observations: sample.observations.len(),
        stations: sample.station_ids(),
        time_range: TimeRange { start, end },
        observations: sample.observations.clone(),
    })
}

/// `POST /detect` — run one detection pass over the supplied observations.
pub async fn detect(
    State(state): State<AppState>,
    Json(request): Json<DetectionRequest>,
) -> Result<Json<DetectionResponse>, (StatusCode, Json<ErrorResponse>)> {
    let config = DetectionConfig {
        window_len: request.window_len.unwrap_or(state.defaults.window_len),
        stride: request.stride.unwrap_or(state.defaults.stride),
        threshold: request.threshold.unwrap_or(state.defaults.threshold),
    };

    let anomalies = analysis::detect_anomalies(&request.observations, &config).map_err(|err| {
        logging::warn(
            DataSource::Api,
            None,
            &format!("detection request rejected: {}", err),
        );
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: err.to_string(),
            }),
        )
    })?;

    let total_observations = request.observations.len();
    logging::log_detection_summary(total_observations, anomalies.len());

    let (status, message) = if anomalies.is_empty() {
        (
            "no_anomalies",
            format!(
                "Detection completed. No anomalies detected in {} observations; all values within normal range.",
                total_observations
            ),
        )
    } else {
        (
            "anomalies_found",
            format!(
                "Detection completed. Found {} anomalie(s) in {} observations.",
                anomalies.len(),
                total_observations
            ),
        )
    };

    Ok(Json(DetectionResponse {
        status,
        message,
        detection_time: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        total_observations,
        total_anomalies: anomalies.len(),
        parameters: DetectionParameters {
            window_len: config.window_len,
            stride: config.stride,
            threshold: config.threshold,
            variables: Variable::ALL.iter().map(|v| v.name()).collect(),
        },
        anomalies,
    }))
}
