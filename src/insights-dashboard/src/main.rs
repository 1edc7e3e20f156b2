//! Insights Dashboard: customer insights and social media analysis for marketers.
//!
//! Main entry point that loads configuration and starts the server.

use clap::Parser;
use insights_api::{ApiServer, AppState};
use insights_core::config::AppConfig;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "insights-dashboard")]
#[command(about = "Customer insights and social media analysis dashboard API")]
#[command(version)]
struct Cli {
    /// Optional TOML config file
    #[arg(long, env = "INSIGHTS_DASHBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Node identifier (overrides config)
    #[arg(long, env = "INSIGHTS_DASHBOARD__NODE_ID")]
    node_id: Option<String>,

    /// HTTP port (overrides config)
    #[arg(long, env = "INSIGHTS_DASHBOARD__API__HTTP_PORT")]
    http_port: Option<u16>,

    /// Base URL of the insights service (overrides config)
    #[arg(long, env = "INSIGHTS_DASHBOARD__INSIGHTS__BASE_URL")]
    insights_url: Option<String>,

    /// Content generation delay in milliseconds (overrides config)
    #[arg(long, env = "INSIGHTS_DASHBOARD__GENERATION__DELAY_MS")]
    generation_delay_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "insights_dashboard=info,insights_api=info,tower_http=info".into()
            }),
        )
        .json()
        .init();

    let cli = Cli::parse();

    info!("Insights Dashboard starting up");

    // Load configuration
    let mut config = AppConfig::load(cli.config.as_deref()).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    // Apply CLI overrides
    if let Some(node_id) = cli.node_id {
        config.node_id = node_id;
    }
    if let Some(port) = cli.http_port {
        config.api.http_port = port;
    }
    if let Some(url) = cli.insights_url {
        config.insights.base_url = url;
    }
    if let Some(delay) = cli.generation_delay_ms {
        config.generation.delay_ms = delay;
    }

    info!(
        node_id = %config.node_id,
        http_port = config.api.http_port,
        insights_url = %config.insights.base_url,
        generation_delay_ms = config.generation.delay_ms,
        "Configuration loaded"
    );

    let state = AppState::new(&config)?;
    let api_server = ApiServer::new(config, state)?;

    // Start metrics exporter
    if let Err(e) = api_server.start_metrics().await {
        error!(error = %e, "Failed to start metrics exporter");
    }

    info!("Insights Dashboard is ready to serve traffic");

    // Start HTTP server (blocks until shutdown)
    api_server.start_http().await?;

    Ok(())
}
