//! Headline scoring orchestration.

use async_trait::async_trait;
use hsl_core::{AppConfig, Label};

use crate::classifier::SvmClassifier;
use crate::embeddings::TeiEmbedder;
use crate::error::SentimentError;

/// Anything that can turn a batch of headlines into index-aligned labels.
///
/// The HTTP layer depends on this seam rather than on [`SentimentPipeline`]
/// so handlers can be exercised without model artifacts.
#[async_trait]
pub trait HeadlineClassifier: Send + Sync {
    /// Classify `headlines`, returning one label per input in the same order.
    async fn classify(&self, headlines: &[String]) -> Result<Vec<Label>, SentimentError>;
}

/// Embedding model plus classifier, loaded once and read-only afterwards.
#[derive(Debug)]
pub struct SentimentPipeline {
    embedder: TeiEmbedder,
    classifier: SvmClassifier,
}

impl SentimentPipeline {
    /// Pair an embedder with a classifier trained on its vectors.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Dimension`] if the embedding dimension differs
    /// from the classifier's input dimension.
    pub fn new(embedder: TeiEmbedder, classifier: SvmClassifier) -> Result<Self, SentimentError> {
        if embedder.dimension() != classifier.n_features() {
            return Err(SentimentError::Dimension {
                expected: classifier.n_features(),
                actual: embedder.dimension(),
            });
        }
        Ok(Self {
            embedder,
            classifier,
        })
    }

    /// Load both artifacts named by `config`.
    ///
    /// 1. Read and validate the classifier file.
    /// 2. Connect to the embedding endpoint and verify the served model.
    /// 3. Check that both agree on the vector dimension.
    ///
    /// # Errors
    ///
    /// Any failure means the service cannot score headlines; callers should
    /// treat it as fatal.
    pub async fn load(config: &AppConfig) -> Result<Self, SentimentError> {
        tracing::info!(path = %config.classifier_path.display(), "loading classifier");
        let classifier = SvmClassifier::from_path(&config.classifier_path)?;
        tracing::info!(
            kind = classifier.kind(),
            classes = ?classifier.classes(),
            features = classifier.n_features(),
            sha256 = classifier.fingerprint(),
            "classifier loaded"
        );

        let embedder = TeiEmbedder::connect(
            &config.tei_url,
            &config.embedding_model,
            config.embed_timeout_secs,
            config.embed_batch_size,
        )
        .await?;

        Self::new(embedder, classifier)
    }

    #[must_use]
    pub fn classifier(&self) -> &SvmClassifier {
        &self.classifier
    }

    #[must_use]
    pub fn embedder(&self) -> &TeiEmbedder {
        &self.embedder
    }
}

#[async_trait]
impl HeadlineClassifier for SentimentPipeline {
    async fn classify(&self, headlines: &[String]) -> Result<Vec<Label>, SentimentError> {
        if headlines.is_empty() {
            return Ok(Vec::new());
        }

        let texts: Vec<&str> = headlines.iter().map(String::as_str).collect();
        let embeddings = self.embedder.embed(&texts).await?;
        let codes = self.classifier.predict_batch(&embeddings)?;

        Ok(codes.into_iter().map(Label::from_code).collect())
    }
}
