//! Task Models
//!
//! Data structures for one orchestration request: the task record, its
//! planned steps, and the append-only audit trail of executed tools.
//! A task is owned and mutated only by the orchestrator running it and
//! becomes immutable once it reaches a terminal status.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Task lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// The plan is being produced
    Planning,
    /// Steps are being executed in order
    Executing,
    /// All steps finished without an unrecovered failure
    Complete,
    /// Planning or execution failed
    Failed,
}

impl TaskStatus {
    /// Check if this status is terminal (the task record is now immutable)
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Complete | TaskStatus::Failed)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Planning => write!(f, "planning"),
            TaskStatus::Executing => write!(f, "executing"),
            TaskStatus::Complete => write!(f, "complete"),
            TaskStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Step lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// Planned but not started
    Pending,
    /// Currently executing
    Running,
    /// Finished successfully (possibly after a retry)
    Complete,
    /// Failed twice; the task aborts here
    Failed,
}

/// One planned, tool-backed action within a task.
///
/// Steps are produced by the planning phase, mutated in place during
/// execution, and never reordered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    /// Human-readable description of the action
    pub description: String,
    /// Name of the tool to invoke
    pub tool: String,
    /// Arguments for the tool, as planned (before resolution)
    pub args: Value,
    /// Execution status
    pub status: StepStatus,
}

/// Audit entry for one tool dispatch. Appended, never mutated, ordered by
/// execution order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallRecord {
    /// Tool name
    pub tool: String,
    /// The resolved arguments that were actually dispatched
    pub args: Value,
    /// The serialized `ToolResult`
    pub result: Value,
    /// Unix timestamp (seconds) of the dispatch
    pub timestamp: i64,
}

/// Start/end bookkeeping for a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskMetadata {
    /// Unix timestamp (seconds) when the task was created
    pub start_time: i64,
    /// Unix timestamp (seconds) when the task reached a terminal status
    pub end_time: Option<i64>,
}

/// One end-to-end orchestration request from prompt to completion/failure.
///
/// Not persisted; lives for the duration of one orchestration call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Opaque, time-and-random derived identifier
    pub id: String,
    /// The natural-language build request
    pub prompt: String,
    /// Project root the task operates on
    pub project_path: String,
    /// Lifecycle status
    pub status: TaskStatus,
    /// Planned steps, in execution order
    pub steps: Vec<Step>,
    /// Audit trail of every tool dispatch (including retries)
    pub executed_tools: Vec<ToolCallRecord>,
    /// Error messages accumulated along the way
    pub errors: Vec<String>,
    /// Timing metadata
    pub metadata: TaskMetadata,
}

impl Task {
    /// Create a new task in the `planning` state.
    pub fn new(prompt: impl Into<String>, project_path: impl Into<String>) -> Self {
        Self {
            id: generate_task_id(),
            prompt: prompt.into(),
            project_path: project_path.into(),
            status: TaskStatus::Planning,
            steps: Vec::new(),
            executed_tools: Vec::new(),
            errors: Vec::new(),
            metadata: TaskMetadata {
                start_time: chrono::Utc::now().timestamp(),
                end_time: None,
            },
        }
    }

    /// Mark the task complete and stamp the end time.
    pub fn complete(&mut self) {
        self.status = TaskStatus::Complete;
        self.metadata.end_time = Some(chrono::Utc::now().timestamp());
    }

    /// Mark the task failed, recording the triggering error.
    pub fn fail(&mut self, error: impl Into<String>) {
        self.status = TaskStatus::Failed;
        self.errors.push(error.into());
        self.metadata.end_time = Some(chrono::Utc::now().timestamp());
    }

    /// Count of successful file-creation calls, reported on completion.
    pub fn files_created(&self) -> usize {
        self.executed_tools
            .iter()
            .filter(|record| {
                record.tool == "create_file"
                    && record
                        .result
                        .get("success")
                        .and_then(|v| v.as_bool())
                        .unwrap_or(false)
            })
            .count()
    }
}

/// Generate a unique task id from the current time plus a random suffix.
///
/// Two ids generated in the same millisecond differ in their suffix.
pub fn generate_task_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: u32 = rand::random();
    format!("task_{}_{:08x}", millis, suffix)
}
