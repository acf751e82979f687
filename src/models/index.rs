//! Project Index Models
//!
//! The in-memory catalog of a workspace's files and aggregate metadata.
//! Rebuilt wholesale on each indexing pass; nodes are shared (`Arc`) so
//! search results reference them without copying.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// Whether a catalogued node is a file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    File,
    Directory,
}

/// One catalogued filesystem entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileNode {
    /// Path relative to the index root, with `/` separators
    pub path: String,
    /// File or directory name (final path component)
    pub name: String,
    /// File or directory
    pub kind: NodeKind,
    /// Size in bytes (0 for directories)
    pub size: u64,
    /// Extension without the dot, empty if none
    pub extension: String,
    /// Language derived from the extension; `plaintext` when unknown
    pub language: String,
    /// Last modification time (Unix seconds), if the stat provided one
    pub last_modified: Option<i64>,
    /// Cached text content. Populated only for files under the cache
    /// threshold whose content read as valid text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// The catalog for one workspace.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectIndex {
    /// Absolute root path the index was built from
    pub root_path: String,
    /// All catalogued nodes keyed by relative path
    pub files: HashMap<String, Arc<FileNode>>,
    /// Number of file nodes (directories excluded)
    pub total_files: usize,
    /// Sum of file sizes in bytes (directories excluded)
    pub total_size: u64,
    /// Distinct languages seen across file nodes
    pub languages: BTreeSet<String>,
    /// Unix timestamp (seconds) when the index finished building
    pub last_indexed: i64,
}

impl ProjectIndex {
    /// Create an empty index for a root path.
    pub fn new(root_path: impl Into<String>) -> Self {
        Self {
            root_path: root_path.into(),
            ..Default::default()
        }
    }

    /// Look up a node by its relative path.
    pub fn get(&self, path: &str) -> Option<Arc<FileNode>> {
        self.files.get(path).cloned()
    }

    /// Iterate over file nodes only (directories excluded).
    pub fn file_nodes(&self) -> impl Iterator<Item = &Arc<FileNode>> {
        self.files
            .values()
            .filter(|node| node.kind == NodeKind::File)
    }
}
