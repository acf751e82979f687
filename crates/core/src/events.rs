//! Orchestration Event Types
//!
//! Typed events emitted while a task runs, consumed by whatever surface is
//! observing progress (CLI, UI layer, tests). Each event is a
//! `{type, data, timestamp}` envelope; consumers must tolerate an `error`
//! event without a following `complete`, and treat `complete` as the only
//! successful terminal signal.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::{SystemTime, UNIX_EPOCH};

/// Payload of one orchestration event, tagged by `type`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum TaskEventPayload {
    /// Free-form reasoning/progress narration from the orchestrator
    Thought { message: String },

    /// Step progress counter. `status` carries the current step description.
    Progress {
        current: usize,
        total: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        status: Option<String>,
    },

    /// A tool is about to be dispatched with resolved arguments
    ToolCall { tool: String, args: Value },

    /// A tool finished; `result` is the serialized `ToolResult`
    ToolResult { tool: String, result: Value },

    /// The task failed. May arrive without a following `complete`.
    Error { message: String },

    /// The task finished successfully.
    Complete {
        project_path: String,
        files_created: usize,
    },
}

/// One orchestration event: payload plus a Unix-milliseconds timestamp.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskEvent {
    #[serde(flatten)]
    pub payload: TaskEventPayload,
    /// Unix timestamp in milliseconds at emission time
    pub timestamp: u64,
}

impl TaskEvent {
    /// Create an event stamped with the current time.
    pub fn new(payload: TaskEventPayload) -> Self {
        Self {
            payload,
            timestamp: unix_millis(),
        }
    }

    /// Shorthand for a `thought` event.
    pub fn thought(message: impl Into<String>) -> Self {
        Self::new(TaskEventPayload::Thought {
            message: message.into(),
        })
    }

    /// Shorthand for a `progress` event.
    pub fn progress(current: usize, total: usize, status: Option<String>) -> Self {
        Self::new(TaskEventPayload::Progress {
            current,
            total,
            status,
        })
    }

    /// Shorthand for an `error` event.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(TaskEventPayload::Error {
            message: message.into(),
        })
    }
}

/// Current Unix time in milliseconds. Clock regressions clamp to zero.
pub fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
