/// anomon_service — sliding-window z-score anomaly detection for weather
/// station time series.
///
/// Module map:
/// - `model` — shared domain types, no logic
/// - `config` — detection parameters and service configuration
/// - `analysis` — grouping and window scoring (the core)
/// - `sample_data` — deterministic synthetic observation sets
/// - `api` — HTTP surface (axum)
/// - `logging` — leveled, subsystem-tagged service logging

pub mod analysis;
pub mod api;
pub mod config;
pub mod logging;
pub mod model;
pub mod sample_data;
