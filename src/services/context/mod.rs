//! Context Engine
//!
//! Owns the indexed view of a project. Callers construct an engine, call
//! `build` with a project path, and pass the engine by reference to the
//! search and chat services. Nothing here is global; two engines can hold
//! two different projects side by side.

pub mod tech_stack;

use std::sync::Arc;

use buildforge_core::{CoreError, CoreResult};

use crate::models::index::{FileNode, ProjectIndex};
use crate::services::indexer::{self, FileIndexer};
use tech_stack::TechStackDetector;

/// Everything the grounding services know about one project.
pub struct ProjectContext {
    /// Absolute path the context was built from
    pub project_path: String,
    /// File catalog
    pub index: ProjectIndex,
    /// Detected framework and language tags
    pub tech_stack: Vec<String>,
    /// Bookkeeping captured at build time
    pub metadata: ContextMetadata,
}

/// Build-time metadata for one context.
pub struct ContextMetadata {
    /// Final component of the project path
    pub project_name: String,
    /// Unix timestamp when the context was built
    pub indexed_at: i64,
    /// Most recent modification time across catalogued files
    pub last_modified: Option<i64>,
}

/// Holder for an optional [`ProjectContext`].
#[derive(Default)]
pub struct ContextEngine {
    context: Option<ProjectContext>,
}

impl ContextEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index the project at `project_path` and detect its stack, replacing
    /// any previously built context.
    pub fn build(&mut self, project_path: &str) -> CoreResult<()> {
        let root = std::path::Path::new(project_path);
        if !root.is_dir() {
            return Err(CoreError::not_found(format!(
                "Project path {} is not a directory",
                project_path
            )));
        }

        let index = FileIndexer::new(root).index_project();
        let tech_stack = TechStackDetector::detect(&index);
        tracing::info!(
            path = project_path,
            files = index.total_files,
            stack = ?tech_stack,
            "project context built"
        );

        let metadata = ContextMetadata {
            project_name: root
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| project_path.to_string()),
            indexed_at: index.last_indexed,
            last_modified: index.file_nodes().filter_map(|n| n.last_modified).max(),
        };

        self.context = Some(ProjectContext {
            project_path: project_path.to_string(),
            index,
            tech_stack,
            metadata,
        });
        Ok(())
    }

    pub fn is_built(&self) -> bool {
        self.context.is_some()
    }

    pub fn context(&self) -> Option<&ProjectContext> {
        self.context.as_ref()
    }

    /// Cached or freshly read content for a catalogued file.
    pub fn file_content(&self, path: &str) -> Option<String> {
        let ctx = self.context.as_ref()?;
        indexer::get_file_content(&ctx.index, path)
    }

    /// Case-insensitive name or path lookup across the catalog.
    pub fn search_files(&self, query: &str) -> Vec<Arc<FileNode>> {
        match &self.context {
            Some(ctx) => indexer::search_files(&ctx.index, query),
            None => Vec::new(),
        }
    }

    /// One-paragraph description used to ground chat prompts.
    pub fn project_summary(&self) -> String {
        let Some(ctx) = &self.context else {
            return "No project loaded.".to_string();
        };

        let languages: Vec<_> = ctx.index.languages.iter().cloned().collect();
        let stack = if ctx.tech_stack.is_empty() {
            "unknown".to_string()
        } else {
            ctx.tech_stack.join(", ")
        };
        format!(
            "Project at {}: {} files ({} bytes). Languages: {}. Tech stack: {}.",
            ctx.project_path,
            ctx.index.total_files,
            ctx.index.total_size,
            languages.join(", "),
            stack
        )
    }
}
