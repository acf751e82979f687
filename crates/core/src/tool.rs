//! Tool Trait and Registry
//!
//! Defines the unified `Tool` trait interface and `ToolRegistry` for
//! tool registration, argument validation, and dispatch.
//!
//! Two contract points the rest of the workspace relies on:
//!
//! - `register` rejects duplicate names; the tool set is fixed at startup.
//! - `execute` never propagates an error to its caller. Unknown names,
//!   invalid arguments, and tool-internal failures all surface as a failed
//!   `ToolResult` value.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::schema::ParameterSchema;

/// Result of a tool execution.
///
/// Either `{success: true, data, metadata?}` or `{success: false, error, data?}`.
/// Failures carrying data (e.g. the stdout/stderr of a failed command) use
/// `err_with_data`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ToolResult {
    /// Whether the execution was successful
    pub success: bool,
    /// Structured output from the tool
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Error message (if failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Optional execution metadata (timings, sizes, token counts)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl ToolResult {
    /// Create a successful result
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            metadata: None,
        }
    }

    /// Create a successful result with metadata
    pub fn ok_with_metadata(data: Value, metadata: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            metadata: Some(metadata),
        }
    }

    /// Create an error result
    pub fn err(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            metadata: None,
        }
    }

    /// Create an error result that still carries partial output
    pub fn err_with_data(error: impl Into<String>, data: Value) -> Self {
        Self {
            success: false,
            data: Some(data),
            error: Some(error.into()),
            metadata: None,
        }
    }

    /// Convert to a string suitable for folding into a prompt.
    pub fn to_content(&self) -> String {
        if self.success {
            self.data
                .as_ref()
                .map(|d| d.to_string())
                .unwrap_or_default()
        } else {
            format!(
                "Error: {}",
                self.error.as_deref().unwrap_or("Unknown error")
            )
        }
    }
}

/// Context provided to each tool during execution.
///
/// Tools receive everything they need through context rather than through
/// globals: the owning task's id and the project root the task targets.
#[derive(Debug, Clone)]
pub struct ToolContext {
    /// Identifier of the task (or chat session) driving this execution
    pub session_id: String,
    /// Project root directory the task operates on
    pub project_root: PathBuf,
}

impl ToolContext {
    /// Create a new tool context
    pub fn new(session_id: impl Into<String>, project_root: impl AsRef<Path>) -> Self {
        Self {
            session_id: session_id.into(),
            project_root: project_root.as_ref().to_path_buf(),
        }
    }
}

/// Unified tool interface.
///
/// Each capability in the system implements this trait, providing:
/// - Identity (name, description, parameters schema)
/// - Execution logic
///
/// Tools are registered in a `ToolRegistry` and dispatched dynamically.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name of this tool (e.g., "create_file", "run_command")
    fn name(&self) -> &str;

    /// Human-readable description of what this tool does
    fn description(&self) -> &str;

    /// Schema describing the tool's input parameters
    fn parameters_schema(&self) -> ParameterSchema;

    /// Execute the tool with the given context and arguments.
    ///
    /// Arguments have already been validated against `parameters_schema`.
    async fn execute(&self, ctx: &ToolContext, args: Value) -> ToolResult;
}

/// Serializable tool definition, suitable for embedding in planner prompts.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: ParameterSchema,
}

/// Registry of available tools.
///
/// Provides O(1) lookup by name and deterministic, insertion-ordered
/// iteration. Registration happens once at process start; `register`
/// rejects duplicate names rather than silently replacing.
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
    /// Insertion order for deterministic iteration
    order: Vec<String>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register a tool.
    ///
    /// Returns `CoreError::DuplicateTool` if a tool with the same name is
    /// already registered.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> CoreResult<()> {
        let name = tool.name().to_string();
        if self.tools.contains_key(&name) {
            return Err(CoreError::DuplicateTool(name));
        }
        self.order.push(name.clone());
        self.tools.insert(name, tool);
        Ok(())
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Check if a tool is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Get all registered tool names in registration order.
    pub fn names(&self) -> Vec<String> {
        self.order.clone()
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Get all tool definitions in registration order, suitable for
    /// embedding in a planner prompt.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|tool| ToolDefinition {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                parameters: tool.parameters_schema(),
            })
            .collect()
    }

    /// Execute a tool by name with the given context and arguments.
    ///
    /// Dispatch pipeline:
    /// 1. Unknown name -> failed result `"Tool <name> not found"`.
    /// 2. Argument validation against the tool's schema; violations produce a
    ///    failed result without invoking the tool.
    /// 3. Tool execution; tool-internal failures are already `ToolResult`
    ///    values.
    ///
    /// Never returns an error and never panics on caller input.
    pub async fn execute(&self, name: &str, ctx: &ToolContext, args: Value) -> ToolResult {
        let tool = match self.tools.get(name) {
            Some(tool) => tool,
            None => return ToolResult::err(format!("Tool {} not found", name)),
        };

        if let Err(violation) = tool.parameters_schema().validate_args(&args) {
            return ToolResult::err(violation);
        }

        tool.execute(ctx, args).await
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
