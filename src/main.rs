mod config;
mod error;
mod game;
mod models;
mod routes;
mod utils;
mod websocket;

use std::{sync::Arc, time::Instant};

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use config::Config;
use dashmap::DashMap;
use game::GridGenerator;
use models::PuzzleLayout;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

/// Application state shared across all handlers
pub struct AppState {
    pub config: Config,
    /// Validated once at startup; every connection builds its board from it
    pub layout: PuzzleLayout,
    pub sessions: DashMap<Uuid, GameSession>,
}

/// Progress of one connected player, for monitoring only.
/// The board itself lives in the connection task.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub session_id: Uuid,
    pub started_at: Instant,
    pub words_found: usize,
    pub completed: bool,
}

impl GameSession {
    pub fn new(session_id: Uuid) -> Self {
        Self {
            session_id,
            started_at: Instant::now(),
            words_found: 0,
            completed: false,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "word_search_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting word search backend server...");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Load and validate the puzzle layout
    let layout = config.load_layout()?;
    GridGenerator::generate(&layout, &mut rand::rng())
        .context("Puzzle layout does not produce a valid board")?;
    tracing::info!(
        "Puzzle ready: {} words on a {}x{} board",
        layout.words.len(),
        layout.size,
        layout.size
    );

    // Create application state
    let state = Arc::new(AppState {
        config: config.clone(),
        layout,
        sessions: DashMap::new(),
    });

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Serve frontend static files
    let frontend_service = ServeDir::new(&state.config.server.static_dir);

    // Build router
    let app = Router::new()
        // WebSocket endpoint
        .route("/ws", get(websocket::handle_websocket))
        // API routes
        .merge(routes::create_routes())
        .fallback_service(frontend_service)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("WebSocket endpoint: ws://{}/ws", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
pub(crate) fn test_state() -> AppState {
    AppState {
        config: Config {
            server: config::ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                static_dir: "./frontend".to_string(),
            },
            puzzle: config::PuzzleConfig { layout_path: None },
        },
        layout: config::default_layout(),
        sessions: DashMap::new(),
    }
}
