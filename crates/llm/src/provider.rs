//! Text Generator Trait
//!
//! Defines the common interface for text-generation services. The whole
//! contract is a single call: system prompt and user prompt in, generated
//! text out. Everything else about a provider (endpoint, model, sampling)
//! is configuration.

use async_trait::async_trait;

use super::types::LlmResult;

/// Trait that all text-generation providers must implement.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Returns the provider name for identification.
    fn name(&self) -> &'static str;

    /// Returns the current model being used.
    fn model(&self) -> &str;

    /// Generate text for the given prompts.
    ///
    /// # Arguments
    /// * `system_prompt` - Instructions framing the request
    /// * `user_prompt` - The request itself
    ///
    /// # Returns
    /// The complete generated text.
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> LlmResult<String>;
}
