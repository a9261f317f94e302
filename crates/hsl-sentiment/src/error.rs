use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("TEI embed error: {0}")]
    Tei(String),

    #[error("embedding model mismatch: expected '{expected}', endpoint serves '{served}'")]
    ModelMismatch { expected: String, served: String },

    #[error("failed to read classifier artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("classifier artifact parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid classifier artifact: {0}")]
    Artifact(String),

    #[error("dimension mismatch: classifier expects {expected} features, got {actual}")]
    Dimension { expected: usize, actual: usize },
}
