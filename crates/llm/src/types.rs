//! LLM Types
//!
//! Error taxonomy and generation configuration shared by providers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised at the text-generation boundary.
#[derive(Error, Debug)]
pub enum LlmError {
    /// Authentication failed (missing or invalid API key)
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Server-side error from the provider
    #[error("Provider error (status {status}): {message}")]
    ServerError { status: u16, message: String },

    /// Network/connection error, including request timeouts
    #[error("Network error: {0}")]
    Network(String),

    /// The provider response could not be parsed
    #[error("Response parse error: {0}")]
    Parse(String),

    /// Invalid provider configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for generation calls
pub type LlmResult<T> = Result<T, LlmError>;

/// Configuration for a text-generation provider.
///
/// Model choice, temperature, and token limits are passed through opaquely;
/// none of them influence the orchestration contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// API key for the provider
    pub api_key: String,
    /// Model identifier (e.g. "gpt-4o-mini")
    pub model: String,
    /// Base endpoint URL; defaults to the OpenAI chat completions endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Request timeout in seconds. Bounded so a hung provider cannot stall
    /// the orchestrator's planning phase indefinitely.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_timeout_secs() -> u64 {
    120
}

impl GenerationConfig {
    /// Create a configuration with defaults for everything but identity.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Override the endpoint base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = GenerationConfig::new("sk-test", "gpt-4o-mini");
        assert_eq!(config.model, "gpt-4o-mini");
        assert!(config.base_url.is_none());
        assert_eq!(config.max_tokens, 4096);
        assert_eq!(config.timeout_secs, 120);
    }

    #[test]
    fn test_config_with_base_url() {
        let config =
            GenerationConfig::new("sk-test", "local").with_base_url("http://localhost:8080/v1");
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:8080/v1"));
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: GenerationConfig =
            serde_json::from_str(r#"{"api_key": "k", "model": "m"}"#).unwrap();
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.max_tokens, 4096);
    }

    #[test]
    fn test_error_display() {
        let err = LlmError::ServerError {
            status: 500,
            message: "upstream".to_string(),
        };
        assert_eq!(err.to_string(), "Provider error (status 500): upstream");
    }
}
