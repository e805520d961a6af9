/// HTTP surface of the anomaly monitoring service.
///
/// Thin plumbing only: routing, schemas, and translation between JSON and
/// the detection core. Every request's detection pass is independent — the
/// only shared state is the configured request defaults and the
/// startup-built sample data set, both immutable after startup.

pub mod routes;
pub mod schemas;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::config::DetectionConfig;
use crate::sample_data::SampleData;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Defaults for detection requests that omit parameters.
    pub defaults: DetectionConfig,
    /// The sample observation set served by `GET /test-data`.
    pub sample_data: Arc<SampleData>,
}

/// Build the service router.
///
/// CORS is wide open: the service carries no credentials and the API is
/// meant to be callable from any dashboard origin.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::service_info))
        .route("/test-data", get(routes::test_data))
        .route("/detect", post(routes::detect))
        .layer(cors)
        .with_state(state)
}
