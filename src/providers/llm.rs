//! LLM provider trait for answer generation

use async_trait::async_trait;

use crate::error::Result;

/// Trait for LLM-based text generation.
///
/// The prompt is fully constructed by the caller; providers only run it.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate text for the given prompt
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Check if the provider is healthy and reachable
    async fn health_check(&self) -> Result<bool>;

    /// Get provider name for logging
    fn name(&self) -> &str;

    /// Get the model being used
    fn model(&self) -> &str;
}
