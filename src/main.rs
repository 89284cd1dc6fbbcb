use std::net::SocketAddr;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use voice_book_recommender::{routes, AppState, Config};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("voice_book_recommender=debug,tower_http=debug")
        }))
        .init();

    let (config, loaded_path) = Config::discover()?;
    match loaded_path {
        Some(path) => info!("Loaded configuration from: {}", path),
        None => info!("Using default configuration"),
    }

    // Ensure directories exist
    let audio_dir = config.system_config.audio_dir();
    std::fs::create_dir_all(&audio_dir)
        .with_context(|| format!("Failed to create audio directory {}", audio_dir.display()))?;
    info!("Saving clips under {}", audio_dir.display());

    if !config.system_config.index_page().is_file() {
        warn!("{} not found; GET / will return 404", config.system_config.index_page().display());
    }

    // Initialize app state
    let app_state = AppState::new(config.clone())?;
    if !app_state.pipeline.catalog().is_available() {
        warn!(
            "Books file {} not found; recommendations will be empty until it exists",
            app_state.pipeline.catalog().path().display()
        );
    }

    let app = routes::build_app(app_state);

    // Start server
    let host: std::net::IpAddr = config
        .system_config
        .host
        .parse()
        .with_context(|| format!("Invalid host address: {}", config.system_config.host))?;
    let addr = SocketAddr::new(host, config.system_config.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
