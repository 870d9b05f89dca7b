//! LLM provider trait for answer completion

use async_trait::async_trait;

use crate::error::Result;

/// Trait for LLM text completion
///
/// Implementations:
/// - `OpenAiClient`: OpenAI chat completions (gpt-3.5-turbo)
/// - `OllamaClient`: Local Ollama server
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Complete a fully built prompt and return the raw answer text
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Get provider name for logging
    fn name(&self) -> &str;

    /// Get the model being used
    fn model(&self) -> &str;
}
