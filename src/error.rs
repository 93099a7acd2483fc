use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LabelError {
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid satellite file pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Failed to encode image: {0:#}")]
    Encode(anyhow::Error),

    #[error("Label request for site '{site_id}' failed: {reason:#}")]
    Request {
        site_id: String,
        reason: anyhow::Error,
    },

    #[error("Failed to write confirmation line: {0}")]
    Console(#[source] std::io::Error),

    #[error("JSON serialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}

impl LabelError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
