//! Error types for Skiff.

use std::io;

/// Errors produced by the Skiff crates.
///
/// Session operations themselves degrade to no-ops instead of failing; this
/// type serves the configuration and persistence edges of the workspace.
#[derive(Debug, thiserror::Error)]
pub enum SkiffError {
    #[error("config error: {0}")]
    Config(String),

    #[error("session error: {0}")]
    Session(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, SkiffError>;
