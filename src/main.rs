//! evserve - Main Entry Point

use clap::Parser;
use evserve::server::{run_server, ServerConfig};
use std::path::PathBuf;

/// EV segment prediction server
#[derive(Parser, Debug)]
#[command(name = "evserve", version, about)]
struct Cli {
    /// Address to bind
    #[arg(long, env = "API_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to bind
    #[arg(long, env = "API_PORT", default_value_t = 8080)]
    port: u16,

    /// Directory holding schema.json, scaler.json, and model.json
    #[arg(long, env = "ARTIFACTS_DIR", default_value = "./artifacts")]
    artifacts_dir: PathBuf,

    /// Car catalog CSV used for recommendations
    #[arg(long, env = "CATALOG_PATH", default_value = "./ElectricCarData_Clean.csv")]
    catalog_path: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "evserve=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = ServerConfig {
        host: cli.host,
        port: cli.port,
        artifacts_dir: cli.artifacts_dir,
        catalog_path: cli.catalog_path,
    };

    run_server(config).await
}
