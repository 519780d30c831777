//! Preview host for the raw response layer.
//!
//! Serves `POST /render`, which takes a JSON envelope describing a function
//! result (status, headers, body) and writes it the way the host would.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use raw_response::config::{load_config, HostConfig};
use raw_response::observability::init_logging;
use raw_response::HttpServer;

#[derive(Parser)]
#[command(name = "raw-response")]
#[command(about = "Render script function results as HTTP responses", long_about = None)]
struct Cli {
    /// TOML config file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => HostConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    init_logging(&config.observability);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        default_charset = %config.response.default_charset,
        request_timeout_secs = config.limits.request_timeout_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = HttpServer::new(config);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
