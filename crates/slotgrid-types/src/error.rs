//! Error types for slotgrid.

use std::io;

/// Errors produced while constructing or configuring a grid.
///
/// Input-driven operations (navigation, scrolling, refresh) never produce
/// these; they only surface at construction and configuration time.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    #[error("config error: {0}")]
    Config(String),

    #[error("template error: {0}")]
    Template(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, GridError>;
