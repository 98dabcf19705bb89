// src/error.rs

//! Unified error handling for the dashboard client.

use thiserror::Error;

/// Result type alias for dashboard operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
///
/// The variants form the failure taxonomy every caller branches on:
/// `Unauthorized` is the single authentication failure (the redirect hook
/// has already fired by the time it is observed), `Api` is a logical
/// failure carried in an otherwise well-formed response, and
/// `Http`/`Json` are transport-level failures.
#[derive(Error, Debug)]
pub enum AppError {
    /// HTTP 401 from any endpoint. Already handled at the fetch layer;
    /// callers must stay silent to avoid double-reporting.
    #[error("unauthorized")]
    Unauthorized,

    /// Server responded, but the body signals a failure.
    #[error("{message}")]
    Api { message: String },

    /// HTTP request failed at the transport level
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Client-side input validation failed; the request was never sent.
    /// Carries a translation key resolved at presentation time.
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a logical API failure from a server-supplied message.
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error carrying a translation key.
    pub fn validation(key: impl Into<String>) -> Self {
        Self::Validation(key.into())
    }

    /// True for transport-level failures (network or malformed body).
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Json(_))
    }
}
