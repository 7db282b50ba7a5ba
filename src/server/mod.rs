//! HTTP serving layer
//!
//! Thin glue around the predictor: one prediction endpoint, a readiness
//! probe, and a banner. All model artifacts are loaded before the listener
//! binds; a load failure leaves the service answering 503, never crashing.

mod api;
mod error;
mod handlers;
mod state;

pub use api::create_router;
pub use error::ServerError;
pub use state::AppState;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub artifacts_dir: PathBuf,
    pub catalog_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: std::env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            artifacts_dir: std::env::var("ARTIFACTS_DIR")
                .unwrap_or_else(|_| "./artifacts".to_string())
                .into(),
            catalog_path: std::env::var("CATALOG_PATH")
                .unwrap_or_else(|_| "./ElectricCarData_Clean.csv".to_string())
                .into(),
        }
    }
}

/// Start the server with the given configuration
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let start_time = chrono::Utc::now();
    info!(
        artifacts_dir = %config.artifacts_dir.display(),
        catalog_path = %config.catalog_path.display(),
        started_at = %start_time.to_rfc3339(),
        "Loading startup artifacts"
    );

    let state = Arc::new(AppState::initialize(config.clone()));
    if !state.is_ready() {
        warn!("Serving in unavailable mode: prediction requests will receive 503");
    }
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        address = %addr,
        pid = std::process::id(),
        "EV segment predictor listening"
    );

    let shutdown_signal = async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
        let stop_time = chrono::Utc::now();
        let uptime = stop_time.signed_duration_since(start_time);
        info!(
            stopped_at = %stop_time.to_rfc3339(),
            uptime_secs = uptime.num_seconds(),
            "Shutdown signal received, stopping server gracefully"
        );
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server shut down cleanly");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.artifacts_dir, PathBuf::from("./artifacts"));
    }
}
