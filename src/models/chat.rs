//! Chat Models
//!
//! Conversation messages and the structured reply produced by the chat
//! engine.

use serde::{Deserialize, Serialize};

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One conversation turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique message id
    pub id: String,
    /// Author
    pub role: ChatRole,
    /// Message text
    pub content: String,
    /// Unix timestamp (seconds)
    pub timestamp: i64,
    /// Files this message drew on (assistant messages only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub referenced_files: Vec<String>,
    /// Code snippets attached to this message (assistant messages only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub code_snippets: Vec<String>,
}

impl ChatMessage {
    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role: ChatRole::User,
            content: content.into(),
            timestamp: chrono::Utc::now().timestamp(),
            referenced_files: Vec::new(),
            code_snippets: Vec::new(),
        }
    }

    /// Create an assistant message with grounding metadata.
    pub fn assistant(
        content: impl Into<String>,
        referenced_files: Vec<String>,
        code_snippets: Vec<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role: ChatRole::Assistant,
            content: content.into(),
            timestamp: chrono::Utc::now().timestamp(),
            referenced_files,
            code_snippets,
        }
    }
}

/// The structured reply returned by `process_query`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The shaped reply text
    pub reply: String,
    /// Intent the query was classified as (snake_case tag)
    pub intent: String,
    /// De-duplicated file paths the reply drew on, in first-seen order
    pub referenced_files: Vec<String>,
    /// Snippets gathered while grounding (capped)
    pub code_snippets: Vec<String>,
    /// The fully assembled grounded prompt, ready to forward to a
    /// text-generation service
    pub grounded_prompt: String,
}
