//! Error types for the quizmark library.

use thiserror::Error;

/// Result type alias for this library.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the library.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("JSON error: {0}")]
    Json(String),
}

/// Errors that occur while running the render pipeline.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Math rendering error: {0}")]
    Math(String),

    #[error("No free private-use code points left for escape markers")]
    MarkersExhausted,
}

/// Errors that occur while loading a render configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid TOML: {0}")]
    Toml(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}
