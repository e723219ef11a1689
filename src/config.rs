use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::env;

use crate::models::{Direction, Placement, PuzzleLayout};

/// Board used when no layout file is configured
static DEFAULT_LAYOUT: Lazy<PuzzleLayout> = Lazy::new(|| PuzzleLayout {
    size: 10,
    words: ["CIPHER", "ENCRYPT", "DATA", "LOGIC"]
        .iter()
        .map(|w| w.to_string())
        .collect(),
    placements: vec![
        Placement::new("CIPHER", 1, 1, Direction::RIGHT),
        Placement::new("ENCRYPT", 2, 2, Direction::DOWN),
        Placement::new("DATA", 9, 9, Direction::UP),
        Placement::new("LOGIC", 4, 9, Direction::LEFT),
    ],
});

pub fn default_layout() -> PuzzleLayout {
    DEFAULT_LAYOUT.clone()
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub puzzle: PuzzleConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PuzzleConfig {
    /// TOML/JSON/YAML file with `size`, `words` and `placements`
    pub layout_path: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let server = ServerConfig {
            host: env::var("HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("PORT must be a number")?,
            static_dir: env::var("STATIC_DIR")
                .unwrap_or_else(|_| "./frontend".to_string()),
        };

        let puzzle = PuzzleConfig {
            layout_path: env::var("PUZZLE_LAYOUT_PATH")
                .ok()
                .filter(|path| !path.trim().is_empty()),
        };

        Ok(Config { server, puzzle })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Layout from the configured file, or the built-in board
    pub fn load_layout(&self) -> Result<PuzzleLayout> {
        match &self.puzzle.layout_path {
            Some(path) => load_layout_file(path),
            None => Ok(default_layout()),
        }
    }
}

pub fn load_layout_file(path: &str) -> Result<PuzzleLayout> {
    let layout = ::config::Config::builder()
        .add_source(::config::File::with_name(path))
        .build()
        .with_context(|| format!("Failed to read puzzle layout from {}", path))?
        .try_deserialize::<PuzzleLayout>()
        .with_context(|| format!("Invalid puzzle layout in {}", path))?;

    tracing::info!(
        "Loaded puzzle layout from {} ({} words, {}x{})",
        path,
        layout.words.len(),
        layout.size,
        layout.size
    );

    Ok(layout)
}
