//! Create Folder Tool
//!
//! Creates a directory and any missing parents.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;

use buildforge_core::{ParameterSchema, Tool, ToolContext, ToolResult};

use super::create_file::resolve_path;

/// Create folder tool — `mkdir -p` semantics.
pub struct CreateFolderTool;

#[async_trait]
impl Tool for CreateFolderTool {
    fn name(&self) -> &str {
        "create_folder"
    }

    fn description(&self) -> &str {
        "Create a directory, including any missing parent directories. Succeeds if the directory already exists."
    }

    fn parameters_schema(&self) -> ParameterSchema {
        let mut properties = HashMap::new();
        properties.insert(
            "path".to_string(),
            ParameterSchema::string(Some("Path of the directory to create")),
        );
        ParameterSchema::object(
            Some("Create folder parameters"),
            properties,
            vec!["path".to_string()],
        )
    }

    async fn execute(&self, ctx: &ToolContext, args: Value) -> ToolResult {
        let raw_path = args.get("path").and_then(|v| v.as_str()).unwrap_or_default();
        let path = resolve_path(raw_path, &ctx.project_root);

        match tokio::fs::create_dir_all(&path).await {
            Ok(_) => ToolResult::ok(json!({"path": path.display().to_string()})),
            Err(e) => ToolResult::err(format!("Failed to create {}: {}", path.display(), e)),
        }
    }
}
