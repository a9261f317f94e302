//! TEI (Text Embeddings Inference) client for headline vectors.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::SentimentError;

/// Text embedded once at connect time to learn the vector dimension.
const PROBE_TEXT: &str = "Markets open flat";

/// TEI HTTP client bound to a single embedding model.
#[derive(Debug)]
pub struct TeiEmbedder {
    client: Client,
    embed_url: String,
    model_id: String,
    dimension: usize,
    batch_size: usize,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    inputs: &'a [&'a str],
    normalize: bool,
    truncate: bool,
}

#[derive(Deserialize)]
struct InfoResponse {
    model_id: String,
}

impl TeiEmbedder {
    /// Connect to a TEI endpoint and verify it serves `expected_model`.
    ///
    /// Reads `GET /info` to check the served model, then embeds a probe text
    /// to learn the output dimension. Any failure here means the embedding
    /// model is not available and the caller should not start serving.
    ///
    /// # Errors
    ///
    /// - [`SentimentError::Http`] if the client cannot be built or `/info` fails.
    /// - [`SentimentError::ModelMismatch`] if a different model is served.
    /// - [`SentimentError::Tei`] if the probe embedding fails or is empty.
    pub async fn connect(
        tei_url: &str,
        expected_model: &str,
        timeout_secs: u64,
        batch_size: usize,
    ) -> Result<Self, SentimentError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        let base = tei_url.trim_end_matches('/');

        let info: InfoResponse = client
            .get(format!("{base}/info"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if !model_matches(&info.model_id, expected_model) {
            return Err(SentimentError::ModelMismatch {
                expected: expected_model.to_string(),
                served: info.model_id,
            });
        }

        let mut embedder = Self {
            client,
            embed_url: format!("{base}/embed"),
            model_id: info.model_id,
            dimension: 0,
            batch_size: batch_size.max(1),
        };

        let probe = embedder.embed_chunk(&[PROBE_TEXT]).await?;
        let dimension = probe.first().map_or(0, Vec::len);
        if dimension == 0 {
            return Err(SentimentError::Tei("probe embedding was empty".into()));
        }
        embedder.dimension = dimension;

        tracing::info!(model = %embedder.model_id, dimension, "embedding model ready");
        Ok(embedder)
    }

    /// Model identifier reported by the endpoint.
    #[must_use]
    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Length of every vector returned by [`TeiEmbedder::embed`].
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Generate embeddings for a batch of texts.
    ///
    /// Texts are sent in chunks of the configured batch size. Returns one
    /// vector per input text, in the same order.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Tei`] if a request fails, the response cannot
    /// be parsed, or the returned vectors do not line up with the inputs.
    pub async fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, SentimentError> {
        let mut all_embeddings = Vec::with_capacity(texts.len());

        for chunk in texts.chunks(self.batch_size) {
            let embeddings = self.embed_chunk(chunk).await?;
            if let Some(bad) = embeddings.iter().find(|v| v.len() != self.dimension) {
                return Err(SentimentError::Tei(format!(
                    "TEI returned a {}-dim vector, expected {}",
                    bad.len(),
                    self.dimension
                )));
            }
            all_embeddings.extend(embeddings);
        }

        Ok(all_embeddings)
    }

    async fn embed_chunk(&self, chunk: &[&str]) -> Result<Vec<Vec<f32>>, SentimentError> {
        let request = EmbedRequest {
            inputs: chunk,
            normalize: true,
            truncate: true,
        };
        let response = self
            .client
            .post(&self.embed_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| SentimentError::Tei(format!("TEI request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(SentimentError::Tei(format!(
                "TEI returned status {}",
                response.status()
            )));
        }

        let embeddings: Vec<Vec<f32>> = response
            .json()
            .await
            .map_err(|e| SentimentError::Tei(format!("TEI response parse error: {e}")))?;

        if embeddings.len() != chunk.len() {
            return Err(SentimentError::Tei(format!(
                "TEI returned {} embeddings for {} inputs",
                embeddings.len(),
                chunk.len()
            )));
        }

        Ok(embeddings)
    }
}

/// Whether the served model id names the expected model.
///
/// Accepts an exact match or a hub-qualified id whose last path segment
/// matches, so `all-MiniLM-L6-v2` matches `sentence-transformers/all-MiniLM-L6-v2`.
fn model_matches(served: &str, expected: &str) -> bool {
    let expected = expected.trim();
    served == expected
        || served
            .rsplit_once('/')
            .is_some_and(|(_, name)| name == expected)
}

#[cfg(test)]
#[path = "embeddings_test.rs"]
mod tests;
