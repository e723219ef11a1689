use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::{game::GridGenerator, AppState};

#[derive(Debug, Serialize)]
pub struct PuzzleInfo {
    pub size: usize,
    pub words: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ArchiveView {
    pub size: usize,
    pub rows: Vec<String>,
}

/// Board size and word list of the configured puzzle
pub async fn get_puzzle(State(state): State<Arc<AppState>>) -> Json<PuzzleInfo> {
    Json(PuzzleInfo {
        size: state.layout.size,
        words: state.layout.words.clone(),
    })
}

/// Fresh read-only board with every word's digit already in place
pub async fn get_archive(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ArchiveView>, (StatusCode, String)> {
    let mut rng = rand::rng();
    let rows = GridGenerator::archive(&state.layout, &mut rng).map_err(|e| {
        tracing::error!("Failed to render archive board: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    Ok(Json(ArchiveView {
        size: state.layout.size,
        rows,
    }))
}
