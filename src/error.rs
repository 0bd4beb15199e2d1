//! Error types for the webdrive library.

use thiserror::Error;

/// Main error type for webdrive operations.
#[derive(Error, Debug)]
pub enum DriveError {
    /// HTTP request failed with status code.
    #[error("HTTP error: {0}")]
    HttpError(u16),

    /// Network request error.
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid or unexpected response from server.
    #[error("Invalid response from server")]
    InvalidResponse,

    /// Storage service answered with a non-zero status code.
    ///
    /// `Display` is the bare server message, since that is what ends up in
    /// the user's notification tray.
    #[error("{message}")]
    ApiError { code: i64, message: String },

    /// Local file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed.
    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// An upload batch is already running.
    #[error("An upload is already in progress")]
    UploadInProgress,

    /// The drive actor has shut down.
    #[error("Drive actor stopped")]
    ActorStopped,

    /// Custom error message.
    #[error("{0}")]
    Custom(String),
}

/// Result type alias for webdrive operations.
pub type Result<T> = std::result::Result<T, DriveError>;
