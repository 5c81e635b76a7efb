use anyhow::Context;
use citybikes_api::{app_state::ApiState, config::AppConfig, create_app};
use citybikes_engine::{Engine, HttpSource, Store};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Command line arguments for the city bikes map server
#[derive(Parser, Debug)]
#[command(name = "citybikes-map")]
#[command(about = "Bike-share networks and stations on a map")]
struct Args {
    /// Path to the JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL of the bike-share API, overrides the configuration file
    #[arg(long, env = "CITYBIKES_API_BASE_URL")]
    base_url: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value = "3000")]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .pretty()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = match &args.config {
        Some(path) => {
            let config = AppConfig::from_file(path)?;
            tracing::info!("Loaded config from {}", path.display());
            config
        }
        None => AppConfig::default(),
    };
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    tracing::info!("Using bike-share API at {}", config.base_url);

    let source = HttpSource::new(config.base_url.clone(), config.request_timeout())
        .context("Failed to build HTTP client")?;
    let engine = Engine::new(Store::new(), Arc::new(source));

    // Build our application with routes
    let app = create_app(ApiState::new(engine, config));

    let bind_addr = format!("0.0.0.0:{}", args.port);
    tracing::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
