/// Per-station grouping of raw observations.
///
/// Request input arrives as one flat list that may interleave stations in
/// any order. Scoring operates per station on a time-ascending series, so
/// every detection pass starts by partitioning and sorting here.

use std::collections::HashMap;

use crate::model::{Observation, StationSeries};

/// Partition a flat observation list into per-station series, each sorted
/// ascending by timestamp.
///
/// Series are returned in order of each station's first appearance in the
/// input, which keeps downstream output deterministic. The sort is stable:
/// observations sharing a timestamp keep their input order.
///
/// Stations with fewer observations than the scoring window are carried
/// through unchanged — they produce no windows later, which is not an error.
pub fn group_by_station(observations: &[Observation]) -> Vec<StationSeries> {
    let mut order: Vec<String> = Vec::new();
    let mut by_station: HashMap<String, Vec<Observation>> = HashMap::new();

    for observation in observations {
        if !by_station.contains_key(&observation.station_id) {
            order.push(observation.station_id.clone());
        }
        by_station
            .entry(observation.station_id.clone())
            .or_default()
            .push(observation.clone());
    }

    order
        .into_iter()
        .map(|station_id| {
            let mut observations = by_station.remove(&station_id).unwrap_or_default();
            observations.sort_by_key(|observation| observation.timestamp);
            StationSeries {
                station_id,
                observations,
            }
        })
        .collect()
}
