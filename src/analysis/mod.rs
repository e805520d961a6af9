/// Detection pipeline for the anomaly monitoring service.
///
/// Pure computation only — no I/O, no shared state, no retained results.
/// Every request runs the same two steps: group the flat observation list
/// into per-station series, then slide the scoring window over each series.
///
/// Submodules:
/// - `grouping` — organizes flat request input into per-station series.
/// - `windows` — sliding-window z-score scoring.

pub mod grouping;
pub mod windows;

pub use windows::detect_anomalies;
