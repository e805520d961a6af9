/// End-to-end detection pipeline tests.
///
/// Exercise grouping and window scoring together through the public library
/// interface, the way the HTTP layer drives them: a flat, interleaved,
/// multi-station observation list in, an ordered anomaly list out.
///
/// Run with: cargo test --test detection_pipeline

use anomon_service::analysis::detect_anomalies;
use anomon_service::config::DetectionConfig;
use anomon_service::model::{ConfigError, Observation};
use anomon_service::sample_data::SampleData;

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

/// Fixed series start: 2024-05-01 12:00:00 UTC, ten-minute cadence.
const BASE_TS: i64 = 1_714_564_800;
const STEP: i64 = 600;

fn temp_obs(station: &str, index: usize, temp_out: f64) -> Observation {
    Observation {
        station_id: station.to_string(),
        timestamp: BASE_TS + STEP * index as i64,
        temp_out: Some(temp_out),
        out_hum: None,
        wind_speed: None,
        bar: None,
        rain: None,
    }
}

fn config(window_len: usize, stride: usize, threshold: f64) -> DetectionConfig {
    DetectionConfig {
        window_len,
        stride,
        threshold,
    }
}

// ---------------------------------------------------------------------------
// Multi-station passes
// ---------------------------------------------------------------------------

#[test]
fn test_interleaved_stations_are_scored_independently() {
    // Readings arrive shuffled across two stations. Only "ridge" carries a
    // spike at the end of its series; "valley" stays flat.
    let ridge = [15.0, 15.4, 14.8, 15.1, 60.0];
    let valley = [10.0, 10.0, 10.1, 9.9, 10.0];

    let mut input = Vec::new();
    for index in 0..5 {
        input.push(temp_obs("ridge", index, ridge[index]));
        input.push(temp_obs("valley", index, valley[index]));
    }

    let anomalies = detect_anomalies(&input, &config(5, 1, 1.9)).expect("valid parameters");

    assert_eq!(anomalies.len(), 1, "only the ridge spike should be flagged");
    assert_eq!(anomalies[0].station_id, "ridge");
    assert_eq!(anomalies[0].anomaly_value, 60.0);
}

#[test]
fn test_unsorted_input_matches_sorted_input() {
    // Timestamp order inside the request must not matter: grouping sorts
    // before scoring.
    let temps = [12.0, 12.2, 11.8, 12.1, 48.0];
    let sorted: Vec<Observation> = (0..5).map(|i| temp_obs("station_001", i, temps[i])).collect();
    let mut shuffled = sorted.clone();
    shuffled.swap(0, 4);
    shuffled.swap(1, 3);

    let from_sorted = detect_anomalies(&sorted, &config(5, 1, 1.9)).expect("valid parameters");
    let from_shuffled = detect_anomalies(&shuffled, &config(5, 1, 1.9)).expect("valid parameters");
    assert_eq!(from_sorted, from_shuffled);
    assert_eq!(from_sorted.len(), 1);
}

#[test]
fn test_every_flag_lies_within_its_window() {
    // Noisy two-station fixture with several spikes; whatever gets flagged,
    // the record's timestamp must sit inside its reported window. The
    // rendered format sorts lexicographically, so plain string comparison
    // is enough.
    let north = [
        18.0, 18.3, 17.9, 18.1, 44.0, 18.2, 17.8, 18.0, 18.4, 41.0, 18.1, 17.9,
    ];
    let south = [
        25.0, 24.8, 25.3, 25.1, 24.9, 70.0, 25.2, 25.0, 24.7, 25.1, 25.3, 24.9,
    ];

    let mut input = Vec::new();
    for index in 0..12 {
        input.push(temp_obs("north", index, north[index]));
        input.push(temp_obs("south", index, south[index]));
    }

    let anomalies = detect_anomalies(&input, &config(5, 2, 1.5)).expect("valid parameters");
    assert!(!anomalies.is_empty(), "fixture should produce flags");
    for anomaly in &anomalies {
        assert!(
            anomaly.time_start <= anomaly.anomaly_timestamp
                && anomaly.anomaly_timestamp <= anomaly.time_end,
            "anomaly at {} falls outside window [{}, {}]",
            anomaly.anomaly_timestamp,
            anomaly.time_start,
            anomaly.time_end
        );
    }
}

// ---------------------------------------------------------------------------
// Sample data set
// ---------------------------------------------------------------------------

#[test]
fn test_sample_data_pass_is_deterministic() {
    let first = detect_anomalies(
        &SampleData::build().observations,
        &DetectionConfig::default(),
    )
    .expect("default parameters are valid");
    let second = detect_anomalies(
        &SampleData::build().observations,
        &DetectionConfig::default(),
    )
    .expect("default parameters are valid");

    assert_eq!(first, second);
    assert!(
        !first.is_empty(),
        "the sample set carries injected spikes and should produce flags"
    );
}

#[test]
fn test_sample_data_pass_respects_window_bounds() {
    let anomalies = detect_anomalies(
        &SampleData::build().observations,
        &DetectionConfig::default(),
    )
    .expect("default parameters are valid");

    for anomaly in &anomalies {
        assert!(
            anomaly.time_start <= anomaly.anomaly_timestamp
                && anomaly.anomaly_timestamp <= anomaly.time_end
        );
    }
}

// ---------------------------------------------------------------------------
// Rejection and sparsity
// ---------------------------------------------------------------------------

#[test]
fn test_invalid_parameters_fail_before_scoring() {
    let input = vec![temp_obs("station_001", 0, 15.0)];
    assert_eq!(
        detect_anomalies(&input, &config(2, 1, 2.5)),
        Err(ConfigError::WindowTooShort(2))
    );
}

#[test]
fn test_empty_input_is_not_an_error() {
    let anomalies = detect_anomalies(&[], &DetectionConfig::default()).expect("empty input is fine");
    assert!(anomalies.is_empty());
}
