//! Provider abstractions for embeddings and LLM completion
//!
//! The index and query engine only see these traits, so the OpenAI and
//! Ollama backends are interchangeable and both can be mocked in tests.

pub mod embedding;
pub mod llm;
pub mod ollama;
pub mod openai;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{LlmBackend, LlmConfig};
use crate::error::{Error, Result};

pub use embedding::EmbeddingProvider;
pub use llm::LlmProvider;
pub use ollama::OllamaClient;
pub use openai::OpenAiClient;

/// Build the embedding and LLM providers for the configured backend
///
/// Both handles share one HTTP client.
pub fn from_config(
    config: &LlmConfig,
) -> Result<(Arc<dyn EmbeddingProvider>, Arc<dyn LlmProvider>)> {
    match config.backend {
        LlmBackend::OpenAi => {
            let client = Arc::new(OpenAiClient::new(config)?);
            Ok((client.clone(), client))
        }
        LlmBackend::Ollama => {
            let client = Arc::new(OllamaClient::new(config)?);
            Ok((client.clone(), client))
        }
    }
}

/// Build a `reqwest` client honouring the optional request timeout
pub(crate) fn http_client(config: &LlmConfig) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().pool_max_idle_per_host(5);
    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}

/// Retry a request with exponential backoff
///
/// With `max_retries == 0` the operation runs exactly once.
pub(crate) async fn retry_request<F, Fut, T>(max_retries: u32, operation: F) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut last_error = None;

    for attempt in 0..=max_retries {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                last_error = Some(e);
                if attempt < max_retries {
                    let delay = Duration::from_secs(2u64.pow(attempt));
                    tracing::warn!(
                        "Request failed (attempt {}/{}), retrying in {:?}",
                        attempt + 1,
                        max_retries + 1,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    Err(last_error.unwrap_or_else(|| Error::llm("Unknown error")))
}

/// Trim a response body for error messages
pub(crate) fn snippet(body: &str) -> String {
    const MAX: usize = 200;
    let body = body.trim();
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
