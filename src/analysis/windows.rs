/// Sliding-window z-score scoring.
///
/// For each station series and each monitored variable, windows of
/// `window_len` consecutive observations are taken at offsets
/// `0, stride, 2*stride, …`. Each window is an independent statistical test
/// of its most recent reading: the window's non-null values form the
/// reference sample, and the last non-null reading is flagged when its
/// z-score magnitude exceeds the threshold. Flags are never deduplicated —
/// a reading that closes several overlapping windows (possible when the
/// observations after it carry no value for the variable) is reported once
/// per window.
///
/// Standard deviation uses the population formula (divisor n), matching the
/// reference data profile the default 2.5 threshold was calibrated against.
/// Note the resulting bound |z| ≤ √(n−1): a window of n points cannot
/// produce a larger score no matter how extreme its newest value.

use crate::analysis::grouping::group_by_station;
use crate::config::DetectionConfig;
use crate::model::{format_timestamp, AnomalyRecord, ConfigError, Observation, StationSeries, Variable};

/// Run one full detection pass: group by station, then score every
/// (station, variable) pair.
///
/// Output order is deterministic: stations in order of first appearance in
/// the input, variables in declaration order, windows in start order.
/// Invalid parameters reject the whole pass before any scoring; sparse data
/// never does.
pub fn detect_anomalies(
    observations: &[Observation],
    config: &DetectionConfig,
) -> Result<Vec<AnomalyRecord>, ConfigError> {
    config.validate()?;

    let mut anomalies = Vec::new();
    for series in group_by_station(observations) {
        for variable in Variable::ALL {
            score_series(&series, variable, config, &mut anomalies);
        }
    }
    Ok(anomalies)
}

/// Slide the scoring window over one station's series for one variable.
///
/// A series shorter than the window yields no windows at all.
fn score_series(
    series: &StationSeries,
    variable: Variable,
    config: &DetectionConfig,
    out: &mut Vec<AnomalyRecord>,
) {
    let observations = &series.observations;
    if config.window_len > observations.len() {
        return;
    }

    let last_start = observations.len() - config.window_len;
    let mut start = 0;
    while start <= last_start {
        let window = &observations[start..start + config.window_len];
        score_window(&series.station_id, variable, window, config.threshold, out);
        start += config.stride;
    }
}

/// Test one window's most recent non-null reading against the window's own
/// statistics, appending an anomaly record on a flag.
fn score_window(
    station_id: &str,
    variable: Variable,
    window: &[Observation],
    threshold: f64,
    out: &mut Vec<AnomalyRecord>,
) {
    let values: Vec<f64> = window
        .iter()
        .filter_map(|observation| observation.value_of(variable))
        .collect();
    if values.len() < 2 {
        // Too thin for a standard deviation; skipped, not an error.
        return;
    }

    let (mean, std_dev) = mean_std(&values);

    // Most recent reading in the window that carries this variable. Always
    // present here since `values` is non-empty.
    let Some((flagged, value)) = window
        .iter()
        .rev()
        .find_map(|observation| observation.value_of(variable).map(|v| (observation, v)))
    else {
        return;
    };

    let (is_anomaly, z_score) = if std_dev == 0.0 {
        // Degenerate window: the tested value is part of the sample, so it
        // can only differ from the mean if σ > 0. The guard still states the
        // contract: flag only a value that deviates, never divide by zero.
        (value != mean, 0.0)
    } else {
        let z = (value - mean) / std_dev;
        (z.abs() > threshold, z)
    };

    if is_anomaly {
        out.push(AnomalyRecord {
            time_start: format_timestamp(window[0].timestamp),
            time_end: format_timestamp(window[window.len() - 1].timestamp),
            station_id: station_id.to_string(),
            variable: variable.name(),
            anomaly_timestamp: format_timestamp(flagged.timestamp),
            anomaly_value: round2(value),
            z_score: round2(z_score),
        });
    }
}

/// Mean and population standard deviation (divisor n) of a non-empty sample.
fn mean_std(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

/// Round to two decimal places for reporting.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
