//! Buildforge Core
//!
//! Foundational error types, parameter schemas, the tool abstraction, and the
//! orchestration event types shared by every Buildforge workspace crate. This
//! crate has zero dependencies on application-level code (LLM providers,
//! indexing, CLI, etc.).
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `schema` - Tool parameter schemas and argument validation
//! - `tool` - Tool trait, execution context, result type, and registry
//! - `events` - Typed orchestration event stream (`TaskEvent`)
//!
//! ## Design Principles
//!
//! 1. **Zero external dependencies beyond serde/async-trait/thiserror** - keeps build times minimal
//! 2. **Trait-based abstractions** - enables mocking, testing, and future crate splitting
//! 3. **Unidirectional dependency** - this crate depends on nothing else in the workspace

pub mod error;
pub mod events;
pub mod schema;
pub mod tool;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult};

// ── Parameter Schemas ──────────────────────────────────────────────────
pub use schema::ParameterSchema;

// ── Tool Abstraction ───────────────────────────────────────────────────
pub use tool::{Tool, ToolContext, ToolDefinition, ToolRegistry, ToolResult};

// ── Orchestration Events ───────────────────────────────────────────────
pub use events::{TaskEvent, TaskEventPayload};
