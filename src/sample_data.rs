/// Synthetic observation sets for trying the API.
///
/// When no real station feed is at hand, this module supplies a plausible
/// multi-station data set to run detection against. The set is built once at
/// startup and held immutably in the application state; the detection core
/// treats it like any other observation list. Generation is seeded, so the
/// served data is identical across runs and across instances.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::Observation;

/// Number of stations in the served sample set.
pub const SAMPLE_STATIONS: usize = 10;

/// Observations per station.
pub const SAMPLE_POINTS_PER_STATION: usize = 60;

/// Observation cadence in seconds (10 minutes).
pub const SAMPLE_CADENCE_SECS: i64 = 600;

/// Fixed start of every generated series (2024-10-22 UTC).
const SAMPLE_START_TS: i64 = 1_729_580_400;

/// RNG seed for the served set.
const SAMPLE_SEED: u64 = 20_241_022;

/// The startup-built sample observation set.
#[derive(Debug, Clone)]
pub struct SampleData {
    pub observations: Vec<Observation>,
}

impl SampleData {
    /// Build the served set: [`SAMPLE_STATIONS`] stations with
    /// [`SAMPLE_POINTS_PER_STATION`] readings each at a 10-minute cadence.
    /// Every third station carries one injected temperature spike so that
    /// detection runs against this set have something to find.
    pub fn build() -> Self {
        Self {
            observations: generate(SAMPLE_STATIONS, SAMPLE_POINTS_PER_STATION, SAMPLE_SEED),
        }
    }

    /// Station ids present in the set, in first-appearance order.
    pub fn station_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = Vec::new();
        for observation in &self.observations {
            if ids.last() != Some(&observation.station_id) && !ids.contains(&observation.station_id)
            {
                ids.push(observation.station_id.clone());
            }
        }
        ids
    }

    /// Earliest and latest timestamp in the set, if non-empty.
    pub fn time_range(&self) -> Option<(i64, i64)> {
        let first = self.observations.iter().map(|o| o.timestamp).min()?;
        let last = self.observations.iter().map(|o| o.timestamp).max()?;
        Some((first, last))
    }
}

/// Generate a deterministic multi-station observation set.
///
/// Each station gets its own baseline per variable, small per-reading
/// jitter, a slow temperature drift, occasional rainfall, and a rare
/// missing humidity reading. Station ids are `station_001`, `station_002`, …
pub fn generate(stations: usize, points_per_station: usize, seed: u64) -> Vec<Observation> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut observations = Vec::with_capacity(stations * points_per_station);

    for station_index in 0..stations {
        let station_id = format!("station_{:03}", station_index + 1);

        let base_temp = 15.0 + rng.gen_range(-3.0..3.0);
        let base_hum = 75.0 + rng.gen_range(-10.0..10.0);
        let base_wind: f64 = 5.0 + rng.gen_range(-2.0..2.0);
        let base_bar = 1013.0 + rng.gen_range(-4.0..4.0);

        // Spike position is kept past the default window length so the
        // spike closes at least one window under ad hoc parameters.
        let spike_at = rng.gen_range(20..points_per_station.max(21));
        let has_spike = station_index % 3 == 0;

        for point in 0..points_per_station {
            let timestamp = SAMPLE_START_TS + SAMPLE_CADENCE_SECS * point as i64;

            let mut temp = base_temp + 0.01 * point as f64 + rng.gen_range(-0.8..0.8);
            if has_spike && point == spike_at {
                temp += 40.0;
            }
            let hum = base_hum + rng.gen_range(-4.0..4.0);
            let wind = (base_wind + rng.gen_range(-1.5..1.5)).max(0.0);
            let bar = base_bar + rng.gen_range(-0.6..0.6);
            let rain = if rng.gen_bool(0.1) {
                rng.gen_range(0.1..2.0)
            } else {
                0.0
            };

            // Humidity sensors drop out now and then; leave a hole.
            let hum = if rng.gen_bool(0.02) { None } else { Some(round1(hum)) };

            observations.push(Observation {
                station_id: station_id.clone(),
                timestamp,
                temp_out: Some(round1(temp)),
                out_hum: hum,
                wind_speed: Some(round1(wind)),
                bar: Some(round1(bar)),
                rain: Some(round1(rain)),
            });
        }
    }

    observations
}

/// Round to one decimal place, the precision real station feeds report.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::detect_anomalies;
    use crate::config::DetectionConfig;

    #[test]
    fn test_same_seed_yields_identical_sets() {
        let first = generate(4, 30, 7);
        let second = generate(4, 30, 7);
        assert_eq!(first, second);
    }

    #[test]
    fn test_built_set_has_expected_shape() {
        let sample = SampleData::build();
        assert_eq!(
            sample.observations.len(),
            SAMPLE_STATIONS * SAMPLE_POINTS_PER_STATION
        );

        let ids = sample.station_ids();
        assert_eq!(ids.len(), SAMPLE_STATIONS);
        assert_eq!(ids[0], "station_001");
        assert_eq!(ids[SAMPLE_STATIONS - 1], "station_010");
    }

    #[test]
    fn test_timestamps_follow_the_cadence_per_station() {
        let sample = SampleData::build();
        for series in crate::analysis::grouping::group_by_station(&sample.observations) {
            for pair in series.observations.windows(2) {
                assert_eq!(
                    pair[1].timestamp - pair[0].timestamp,
                    SAMPLE_CADENCE_SECS,
                    "station {} readings must be evenly spaced",
                    series.station_id
                );
            }
        }
    }

    #[test]
    fn test_default_detection_finds_the_injected_spikes() {
        let sample = SampleData::build();
        let anomalies = detect_anomalies(&sample.observations, &DetectionConfig::default())
            .expect("default parameters are valid");
        assert!(
            anomalies.iter().any(|a| a.variable == "temp_out"),
            "at least one injected temperature spike should be flagged"
        );
    }

    #[test]
    fn test_time_range_spans_the_series() {
        let sample = SampleData::build();
        let (start, end) = sample.time_range().expect("set is non-empty");
        assert_eq!(start, SAMPLE_START_TS);
        assert_eq!(
            end,
            SAMPLE_START_TS + SAMPLE_CADENCE_SECS * (SAMPLE_POINTS_PER_STATION as i64 - 1)
        );
    }
}
