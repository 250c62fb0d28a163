use thiserror::Error;

/// Errors raised by playlist file operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Playlist not found: {0}")]
    NotFound(String),

    #[error("Playlist already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid playlist name: {0:?}")]
    InvalidName(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
