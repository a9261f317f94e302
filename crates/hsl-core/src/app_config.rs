use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Runtime settings for the inference service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Path to the exported classifier artifact (JSON).
    pub classifier_path: PathBuf,
    /// Name of the sentence-embedding model the embedding endpoint must serve.
    pub embedding_model: String,
    /// Base URL of the Text Embeddings Inference endpoint.
    pub tei_url: String,
    pub embed_timeout_secs: u64,
    pub embed_batch_size: usize,
}
