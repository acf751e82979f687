//! Read File Tool
//!
//! Reads a file's text content.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;

use buildforge_core::{ParameterSchema, Tool, ToolContext, ToolResult};

use super::create_file::resolve_path;

/// Read file tool — returns a file's text content.
pub struct ReadFileTool;

#[async_trait]
impl Tool for ReadFileTool {
    fn name(&self) -> &str {
        "read_file"
    }

    fn description(&self) -> &str {
        "Read a text file and return its content."
    }

    fn parameters_schema(&self) -> ParameterSchema {
        let mut properties = HashMap::new();
        properties.insert(
            "path".to_string(),
            ParameterSchema::string(Some("Path of the file to read")),
        );
        ParameterSchema::object(
            Some("Read file parameters"),
            properties,
            vec!["path".to_string()],
        )
    }

    async fn execute(&self, ctx: &ToolContext, args: Value) -> ToolResult {
        let raw_path = args.get("path").and_then(|v| v.as_str()).unwrap_or_default();
        let path = resolve_path(raw_path, &ctx.project_root);

        match tokio::fs::read_to_string(&path).await {
            Ok(content) => ToolResult::ok(json!({
                "path": path.display().to_string(),
                "content": content,
            })),
            Err(e) => ToolResult::err(format!("Failed to read {}: {}", path.display(), e)),
        }
    }
}
