//! Brute-force cosine index over page embeddings

use futures::{StreamExt, TryStreamExt};
use std::cmp::Ordering;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::providers::{EmbeddingProvider, LlmProvider};
use crate::types::Document;

use super::engine::RetrieverQueryEngine;

/// Search result with document and similarity
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The retrieved page
    pub document: Document,
    /// Cosine similarity to the query
    pub similarity: f32,
}

struct IndexEntry {
    document: Document,
    embedding: Vec<f32>,
}

/// Immutable vector index built once at startup
pub struct VectorIndex {
    entries: Vec<IndexEntry>,
}

impl VectorIndex {
    /// Embed every document and build the index
    ///
    /// Documents are embedded in batches of `batch_size`, with up to
    /// `parallel_batches` requests in flight; index order matches input order.
    pub async fn from_documents(
        documents: Vec<Document>,
        embedder: &dyn EmbeddingProvider,
        batch_size: usize,
        parallel_batches: usize,
    ) -> Result<Self> {
        if documents.is_empty() {
            tracing::warn!("Building index over an empty corpus");
            return Ok(Self { entries: Vec::new() });
        }

        let texts: Vec<String> = documents.iter().map(|d| d.text.clone()).collect();
        let batches: Vec<Vec<String>> = texts
            .chunks(batch_size.max(1))
            .map(|c| c.to_vec())
            .collect();

        tracing::info!(
            "Embedding {} pages in {} batches",
            documents.len(),
            batches.len()
        );

        let embeddings: Vec<Vec<Vec<f32>>> = futures::stream::iter(batches)
            .map(|batch| async move {
                let embeddings = embedder.embed_batch(&batch).await?;
                if embeddings.len() != batch.len() {
                    return Err(Error::embedding(format!(
                        "Expected {} embeddings, got {}",
                        batch.len(),
                        embeddings.len()
                    )));
                }
                Ok::<_, Error>(embeddings)
            })
            .buffered(parallel_batches.max(1))
            .try_collect()
            .await?;

        let entries = documents
            .into_iter()
            .zip(embeddings.into_iter().flatten())
            .map(|(document, embedding)| IndexEntry { document, embedding })
            .collect::<Vec<_>>();

        tracing::info!("Index built with {} entries", entries.len());

        Ok(Self { entries })
    }

    /// Number of indexed documents
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return the `top_k` documents most similar to the query embedding
    pub fn search(&self, query_embedding: &[f32], top_k: usize) -> Vec<SearchResult> {
        let mut results: Vec<SearchResult> = self
            .entries
            .iter()
            .map(|entry| SearchResult {
                document: entry.document.clone(),
                similarity: cosine_similarity(query_embedding, &entry.embedding),
            })
            .collect();

        results.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
        });
        results.truncate(top_k);
        results
    }

    /// Wrap the index in a query engine
    pub fn as_query_engine(
        self: Arc<Self>,
        embedder: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn LlmProvider>,
        top_k: usize,
    ) -> RetrieverQueryEngine {
        RetrieverQueryEngine::new(self, embedder, llm, top_k)
    }
}

/// Cosine similarity; zero for zero-length vectors or mismatched dimensions
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}
