//! Query engine: retrieve relevant pages, then ask the LLM

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;
use crate::generation::PromptBuilder;
use crate::providers::{EmbeddingProvider, LlmProvider};

use super::index::VectorIndex;

/// Answers a free-text question against the indexed corpus
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QueryEngine: Send + Sync {
    /// Answer a question; the answer is opaque text
    async fn query(&self, question: &str) -> Result<String>;
}

/// Default engine: embed the question, take the `top_k` nearest pages as
/// context, and complete the QA prompt
pub struct RetrieverQueryEngine {
    index: Arc<VectorIndex>,
    embedder: Arc<dyn EmbeddingProvider>,
    llm: Arc<dyn LlmProvider>,
    top_k: usize,
}

impl RetrieverQueryEngine {
    /// Create a new query engine over an index
    pub fn new(
        index: Arc<VectorIndex>,
        embedder: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn LlmProvider>,
        top_k: usize,
    ) -> Self {
        Self {
            index,
            embedder,
            llm,
            top_k,
        }
    }
}

#[async_trait]
impl QueryEngine for RetrieverQueryEngine {
    async fn query(&self, question: &str) -> Result<String> {
        let query_embedding = self.embedder.embed(question).await?;
        let results = self.index.search(&query_embedding, self.top_k);

        tracing::debug!(
            "Retrieved {} pages (best similarity {:.3})",
            results.len(),
            results.first().map(|r| r.similarity).unwrap_or(0.0)
        );

        let context = PromptBuilder::build_context(&results);
        let prompt = PromptBuilder::build_qa_prompt(question, &context);

        self.llm.complete(&prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::providers::embedding::MockEmbeddingProvider;
    use crate::providers::llm::MockLlmProvider;
    use crate::types::Document;

    async fn index_with(texts: &[(&str, Vec<f32>)]) -> Arc<VectorIndex> {
        let vectors: Vec<Vec<f32>> = texts.iter().map(|(_, v)| v.clone()).collect();
        let mut embedder = MockEmbeddingProvider::new();
        embedder
            .expect_embed_batch()
            .returning(move |_| Ok(vectors.clone()));

        let docs = texts.iter().map(|(t, _)| Document::new(*t)).collect();
        Arc::new(
            VectorIndex::from_documents(docs, &embedder, 10, 1)
                .await
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_query_uses_nearest_pages_as_context() {
        let index = index_with(&[
            ("GST is 18% of turnover.", vec![1.0, 0.0]),
            ("CSR is 2% of net profit.", vec![0.0, 1.0]),
        ])
        .await;

        let mut embedder = MockEmbeddingProvider::new();
        embedder
            .expect_embed()
            .withf(|q| q.trim() == "what is the gst rate?")
            .returning(|_| Ok(vec![0.9, 0.1]));

        let mut llm = MockLlmProvider::new();
        llm.expect_complete()
            .withf(|prompt| {
                prompt.contains("GST is 18% of turnover.")
                    && !prompt.contains("CSR is 2%")
                    && prompt.contains("Query: what is the gst rate?")
            })
            .times(1)
            .returning(|_| Ok("GST is 18%.".to_string()));

        let engine = index.as_query_engine(Arc::new(embedder), Arc::new(llm), 1);
        let answer = engine.query("what is the gst rate?").await.unwrap();
        assert_eq!(answer, "GST is 18%.");
    }

    #[tokio::test]
    async fn test_embedding_failure_skips_llm() {
        let index = index_with(&[("GST is 18% of turnover.", vec![1.0, 0.0])]).await;

        let mut embedder = MockEmbeddingProvider::new();
        embedder
            .expect_embed()
            .returning(|_| Err(Error::embedding("401 Unauthorized")));
        let mut llm = MockLlmProvider::new();
        llm.expect_complete().never();

        let engine = RetrieverQueryEngine::new(index, Arc::new(embedder), Arc::new(llm), 2);
        assert!(matches!(engine.query("gst?").await, Err(Error::Embedding(_))));
    }

    #[tokio::test]
    async fn test_llm_failure_propagates() {
        let index = index_with(&[("GST is 18% of turnover.", vec![1.0, 0.0])]).await;

        let mut embedder = MockEmbeddingProvider::new();
        embedder.expect_embed().returning(|_| Ok(vec![1.0, 0.0]));
        let mut llm = MockLlmProvider::new();
        llm.expect_complete()
            .returning(|_| Err(Error::llm("rate limited")));

        let engine = RetrieverQueryEngine::new(index, Arc::new(embedder), Arc::new(llm), 2);
        assert!(matches!(engine.query("gst?").await, Err(Error::Llm(_))));
    }
}
