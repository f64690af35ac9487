mod config;
mod error;
mod game;
mod lexicon;
mod models;
mod rooms;
mod routes;
mod sessions;
mod utils;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use config::Config;
use lexicon::Lexicon;
use rooms::RoomRegistry;
use sessions::SessionRegistry;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Application state shared across all handlers
pub struct AppState {
    pub config: Config,
    pub rooms: Arc<RoomRegistry>,
    pub sessions: SessionRegistry,
}

impl AppState {
    pub fn new(config: Config, lexicon: Lexicon) -> Self {
        let rooms = Arc::new(RoomRegistry::new());
        let sessions = SessionRegistry::new(rooms.clone(), Arc::new(lexicon));
        Self {
            config,
            rooms,
            sessions,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "codenames_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Codenames backend server...");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    // A configured word list must load; otherwise fall back to the built-in one
    let lexicon = match &config.game.lexicon_path {
        Some(path) => Lexicon::load(path)
            .await
            .with_context(|| format!("Failed to load lexicon from {}", path))?,
        None => Lexicon::builtin(),
    };
    tracing::info!("Lexicon loaded with {} words", lexicon.len());

    let state = Arc::new(AppState::new(config.clone(), lexicon));

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        .merge(routes::create_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);
    tracing::info!("Invite links: {}", config.invite_url("<code>"));
    tracing::info!("Frontend expected at {}", config.server.frontend_url);

    axum::serve(listener, app).await?;

    Ok(())
}
