use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use solis_proxy::config::loader::load_config;
use solis_proxy::{HttpServer, ProxyConfig};

#[derive(Parser)]
#[command(name = "solis-proxy")]
#[command(about = "Signing relay for the Solis Cloud monitoring API", long_about = None)]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "solis_proxy=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };

    // Credential presence is enforced per request; surface the gap early.
    if config.upstream.app_id.is_empty() || config.upstream.app_secret.is_empty() {
        tracing::warn!("Upstream credential is not configured; requests will be rejected");
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        base_url = %config.upstream.base_url,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    let server = HttpServer::new(config)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
