//! Headline sentiment inference.
//!
//! Embeds headline text through a Text Embeddings Inference (TEI) endpoint
//! serving a sentence-transformer model, then classifies each embedding with
//! a pretrained support-vector model exported to JSON. Both artifacts are
//! loaded once by [`SentimentPipeline::load`] and are read-only afterwards.

pub mod classifier;
pub mod embeddings;
pub mod error;
pub mod pipeline;

#[cfg(test)]
mod test_support;

pub use classifier::{Kernel, SvmClassifier};
pub use embeddings::TeiEmbedder;
pub use error::SentimentError;
pub use pipeline::{HeadlineClassifier, SentimentPipeline};
