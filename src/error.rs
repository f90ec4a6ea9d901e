use std::path::PathBuf;

use thiserror::Error;

/// Why mapping data could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("request failed: {0}")]
    Http(String),

    /// The endpoint answered with an error payload.
    #[error("server returned {status}: {message}")]
    Remote { status: u16, message: String },

    #[error("fetch cancelled")]
    Cancelled,
}

impl LoadError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoadError::Io {
            path: path.into(),
            source,
        }
    }
}
