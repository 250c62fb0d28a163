//! Error types for playlist loading

use thiserror::Error;

/// Playlist loader errors
///
/// Per-item resolution failures are not errors of this kind; they are
/// collected as [`LoadError`](crate::LoadError) values on the playlist.
#[derive(Debug, Error)]
pub enum PlaylistError {
    /// Configuration could not be read or is inconsistent
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl PlaylistError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Result type for playlist operations
pub type Result<T> = std::result::Result<T, PlaylistError>;
