//! Create File Tool
//!
//! Writes content to a file, creating parent directories as needed.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::Path;

use buildforge_core::{ParameterSchema, Tool, ToolContext, ToolResult};

/// Create file tool — writes content, creating parent directories as needed.
pub struct CreateFileTool;

/// Resolve a possibly-relative path against the project root.
pub(crate) fn resolve_path(raw: &str, project_root: &Path) -> std::path::PathBuf {
    let path = Path::new(raw);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    }
}

#[async_trait]
impl Tool for CreateFileTool {
    fn name(&self) -> &str {
        "create_file"
    }

    fn description(&self) -> &str {
        "Create a file with the given content. Creates parent directories as needed and overwrites an existing file."
    }

    fn parameters_schema(&self) -> ParameterSchema {
        let mut properties = HashMap::new();
        properties.insert(
            "path".to_string(),
            ParameterSchema::string(Some("Path of the file to create")),
        );
        properties.insert(
            "content".to_string(),
            ParameterSchema::string(Some("The content to write to the file")),
        );
        ParameterSchema::object(
            Some("Create file parameters"),
            properties,
            vec!["path".to_string(), "content".to_string()],
        )
    }

    async fn execute(&self, ctx: &ToolContext, args: Value) -> ToolResult {
        let raw_path = args.get("path").and_then(|v| v.as_str()).unwrap_or_default();
        let content = args
            .get("content")
            .and_then(|v| v.as_str())
            .unwrap_or_default();

        let path = resolve_path(raw_path, &ctx.project_root);

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                if let Err(e) = tokio::fs::create_dir_all(parent).await {
                    return ToolResult::err(format!("Failed to create directories: {}", e));
                }
            }
        }

        match tokio::fs::write(&path, content).await {
            Ok(_) => ToolResult::ok(json!({
                "path": path.display().to_string(),
                "size": content.len(),
            })),
            Err(e) => ToolResult::err(format!("Failed to write file: {}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_ctx(dir: &TempDir) -> ToolContext {
        ToolContext::new("test", dir.path())
    }

    #[tokio::test]
    async fn test_create_file_with_parents() {
        let dir = TempDir::new().unwrap();
        let result = CreateFileTool
            .execute(
                &make_ctx(&dir),
                json!({"path": "src/components/App.tsx", "content": "export {}"}),
            )
            .await;

        assert!(result.success);
        let data = result.data.unwrap();
        assert_eq!(data["size"], 9);
        let written = dir.path().join("src/components/App.tsx");
        assert_eq!(std::fs::read_to_string(written).unwrap(), "export {}");
    }

    #[tokio::test]
    async fn test_create_file_absolute_path() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("notes.md");
        let result = CreateFileTool
            .execute(
                &make_ctx(&dir),
                json!({"path": target.display().to_string(), "content": "# notes"}),
            )
            .await;

        assert!(result.success);
        assert_eq!(std::fs::read_to_string(target).unwrap(), "# notes");
    }

    #[tokio::test]
    async fn test_create_file_overwrites() {
        let dir = TempDir::new().unwrap();
        let ctx = make_ctx(&dir);
        CreateFileTool
            .execute(&ctx, json!({"path": "a.txt", "content": "first"}))
            .await;
        let result = CreateFileTool
            .execute(&ctx, json!({"path": "a.txt", "content": "second"}))
            .await;

        assert!(result.success);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("a.txt")).unwrap(),
            "second"
        );
    }
}
