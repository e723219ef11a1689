pub mod health;
pub mod puzzle;

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::AppState;

pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes())
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/puzzle", get(puzzle::get_puzzle))
        .route("/puzzle/archive", get(puzzle::get_archive))
}
