use std::net::SocketAddr;
use std::process::ExitCode;

use pendlarn_server::config::AppConfig;
use pendlarn_server::trafikverket::TrafikverketClient;
use pendlarn_server::web::{AppState, BoardConfig, create_router};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Fail fast on a missing API key
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let client = match TrafikverketClient::new(config.trafikverket()) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "failed to create Trafikverket client");
            return ExitCode::FAILURE;
        }
    };

    let state = AppState::new(client, BoardConfig::default());
    let app = create_router(state, &config.static_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(%addr, error = %e, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    info!(%addr, static_dir = %config.static_dir, "Pendlarn listening");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "server error");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
