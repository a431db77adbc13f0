// src/infrastructure/embeddings/dummy_provider.rs
use tracing::{debug, instrument};

use crate::domain::embedding::{EmbedDoc, Embedder, Vector};
use crate::domain::error::DomainResult;

/// Dummy implementation that returns a fixed vector per document,
/// preserving the one-vector-per-input contract without network I/O.
#[derive(Debug, Clone, Default)]
pub struct DummyEmbedding;

impl DummyEmbedding {
    const FIXED: [f32; 3] = [0.1, 0.2, 0.3];
}

impl Embedder for DummyEmbedding {
    #[instrument(skip_all)]
    fn embed_docs(&self, docs: &[EmbedDoc]) -> DomainResult<Vec<Vector>> {
        debug!("DummyEmbedding::embed_docs() for {} docs", docs.len());
        Ok(docs
            .iter()
            .map(|_| Vector(Self::FIXED.to_vec()))
            .collect())
    }
}
