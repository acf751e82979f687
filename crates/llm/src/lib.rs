//! Buildforge LLM
//!
//! Text-generation collaborator boundary for the Buildforge workspace: the
//! `TextGenerator` trait (prompt in, text out) and an OpenAI-compatible HTTP
//! implementation. Planning behavior, retry policy, and prompt contents live
//! in the orchestrator; this crate only moves prompts and text.

pub mod openai;
pub mod provider;
pub mod types;

pub use openai::OpenAiProvider;
pub use provider::TextGenerator;
pub use types::{GenerationConfig, LlmError, LlmResult};
