//! Data Models
//!
//! Plain data structures shared across services: tasks and their steps,
//! the project index catalog, and chat messages.

pub mod chat;
pub mod index;
pub mod task;

pub use chat::{ChatMessage, ChatResponse, ChatRole};
pub use index::{FileNode, NodeKind, ProjectIndex};
pub use task::{
    generate_task_id, Step, StepStatus, Task, TaskMetadata, TaskStatus, ToolCallRecord,
};
