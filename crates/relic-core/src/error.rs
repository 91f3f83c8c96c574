//! Centralized error types for Relic.

use thiserror::Error;

/// Main error type for Relic operations.
#[derive(Error, Debug)]
pub enum RelicError {
    #[error("GOOGLE_API_KEY is not configured")]
    MissingCredential,

    #[error("Gemini API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Request to Gemini API failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Gemini API returned no text for model '{model}'")]
    EmptyResponse { model: String },

    #[error("No available model supports generateContent")]
    NoCompatibleModel,

    #[error("Unsupported image: {0}")]
    UnsupportedImage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for Relic operations.
pub type RelicResult<T> = Result<T, RelicError>;

impl RelicError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an unsupported image error.
    pub fn unsupported_image(msg: impl Into<String>) -> Self {
        Self::UnsupportedImage(msg.into())
    }
}
