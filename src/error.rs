use thiserror::Error;

/// Main error type for plugconf operations
#[derive(Debug, Error)]
pub enum PlugconfError {
    #[error("Config key [{key}] does not exist")]
    KeyNotFound { key: String },

    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    #[error("Option store error: {0}")]
    StoreError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl PlugconfError {
    pub fn key_not_found<S: Into<String>>(key: S) -> Self {
        Self::KeyNotFound { key: key.into() }
    }

    pub fn unsupported<S: Into<String>>(msg: S) -> Self {
        Self::Unsupported(msg.into())
    }

    pub fn store<S: Into<String>>(msg: S) -> Self {
        Self::StoreError(msg.into())
    }
}

/// Result type alias for plugconf operations
pub type Result<T> = std::result::Result<T, PlugconfError>;
