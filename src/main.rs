/// Service entry point: configuration, logging, sample data, HTTP server.

use std::net::SocketAddr;
use std::process;
use std::sync::Arc;

use anomon_service::api::{self, AppState};
use anomon_service::config::ServiceConfig;
use anomon_service::logging::{self, DataSource, LogLevel};
use anomon_service::sample_data::SampleData;

#[tokio::main]
async fn main() {
    // .env is optional; a missing file is fine.
    dotenv::dotenv().ok();

    let config = match ServiceConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {}", err);
            process::exit(1);
        }
    };

    logging::init_logger(
        LogLevel::parse(&config.log.level),
        config.log.file.as_deref(),
        config.log.console_timestamps,
    );

    let state = AppState {
        defaults: config.detection,
        sample_data: Arc::new(SampleData::build()),
    };
    logging::info(
        DataSource::SampleData,
        None,
        &format!(
            "sample data ready: {} observations",
            state.sample_data.observations.len()
        ),
    );

    let addr: SocketAddr = match format!("{}:{}", config.server.host, config.server.port).parse() {
        Ok(addr) => addr,
        Err(_) => {
            eprintln!(
                "invalid listen address {}:{}",
                config.server.host, config.server.port
            );
            process::exit(1);
        }
    };

    let app = api::router(state);

    logging::info(
        DataSource::System,
        None,
        &format!(
            "anomon_service v{} listening on {}",
            env!("CARGO_PKG_VERSION"),
            addr
        ),
    );

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            logging::error(
                DataSource::System,
                None,
                &format!("failed to bind {}: {}", addr, err),
            );
            process::exit(1);
        }
    };

    if let Err(err) = axum::serve(listener, app).await {
        logging::error(DataSource::System, None, &format!("server error: {}", err));
        process::exit(1);
    }
}
