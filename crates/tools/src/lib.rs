//! Buildforge Tools
//!
//! Builtin tool capabilities dispatched through the core `ToolRegistry`:
//!
//! - `create_file` - write content to a file, creating parent directories
//! - `read_file` - read a file's text content
//! - `create_folder` - create a directory tree
//! - `run_command` - execute a shell command with a bounded timeout
//! - `generate_code` - produce code via a `TextGenerator`
//!
//! Each tool validates nothing itself beyond its own I/O concerns; argument
//! presence and typing are enforced by the registry before dispatch.

pub mod create_file;
pub mod create_folder;
pub mod generate_code;
pub mod read_file;
pub mod run_command;

use std::sync::Arc;

use buildforge_core::{CoreResult, ToolRegistry};
use buildforge_llm::TextGenerator;

pub use create_file::CreateFileTool;
pub use create_folder::CreateFolderTool;
pub use generate_code::GenerateCodeTool;
pub use read_file::ReadFileTool;
pub use run_command::RunCommandTool;

/// Build a registry with the full builtin tool set.
///
/// Registration happens once at process start; duplicate names are a
/// programming error and propagate as `CoreError::DuplicateTool`.
pub fn builtin_registry(generator: Arc<dyn TextGenerator>) -> CoreResult<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(CreateFileTool))?;
    registry.register(Arc::new(ReadFileTool))?;
    registry.register(Arc::new(CreateFolderTool))?;
    registry.register(Arc::new(RunCommandTool::new()))?;
    registry.register(Arc::new(GenerateCodeTool::new(generator)))?;
    Ok(registry)
}
