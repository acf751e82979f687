//! Buildforge - Agentic Build Orchestration Library
//!
//! This library turns natural-language build requests into executed tool
//! plans and grounds code questions in an indexed view of a workspace.
//! It includes:
//! - The task orchestrator state machine and step planner
//! - Codebase grounding services (file indexer, code search, context engine)
//! - The intent-driven chat engine
//! - Data models shared across services

pub mod models;
pub mod services;

pub use models::{
    ChatMessage, ChatResponse, ChatRole, FileNode, NodeKind, ProjectIndex, Step, StepStatus,
    Task, TaskMetadata, TaskStatus, ToolCallRecord,
};
pub use services::chat::{intent::Intent, IntelligentChatEngine};
pub use services::context::{ContextEngine, ContextMetadata, ProjectContext};
pub use services::indexer::FileIndexer;
pub use services::orchestrator::{OrchestratorError, TaskOrchestrator, MAX_STEP_ATTEMPTS};
pub use services::search::{CodeSearch, SearchResult};

// Workspace crates re-exported for downstream callers.
pub use buildforge_core as core;
pub use buildforge_llm as llm;
pub use buildforge_tools as tools;
