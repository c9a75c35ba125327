mod analysis;
mod config_manager;
mod error;
mod handlers;
mod llm;
mod routes;
mod sentiment;
mod state;
mod translate;
mod ui;
mod utils;
mod websocket;
mod wordcloud;

use anyhow::Result;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config_manager::Config;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is normal; the key may come from the real environment
    let dotenv_loaded = dotenv::dotenv().is_ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("lingosense_backend=debug,tower_http=debug")),
        )
        .init();

    if dotenv_loaded {
        info!("Loaded environment from .env");
    }

    // Load configuration - try multiple paths
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| std::path::PathBuf::from("."));

    let config_paths: Vec<String> = vec![
        std::env::var("CONFIG_PATH").ok(),
        Some("conf.yaml".to_string()),
        Some("conf.json".to_string()),
        exe_dir.join("conf.yaml").to_str().map(|s| s.to_string()),
    ]
    .into_iter()
    .flatten()
    .collect();

    let config = match config_manager::utils::load_first(&config_paths) {
        Some((config, path)) => {
            info!("Loaded configuration from: {}", path);
            config
        }
        None => {
            warn!("No config file found (tried {:?}); using defaults", config_paths);
            Config::default()
        }
    };

    let app_state = AppState::new(config.clone())?;
    info!("Using model {}", app_state.llm.model_name());

    // Build application
    let app = Router::new()
        .merge(routes::create_routes(app_state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let addr = config.system_config.socket_addr()?;
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
