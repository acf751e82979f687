//! File Indexer
//!
//! Builds the in-memory catalog of a workspace: a depth-first recursive walk
//! that skips the fixed ignore set, classifies files by extension, and caches
//! text content for small files. Per-entry errors are logged and skipped;
//! a partial index is acceptable, a failed walk is not a thing.

pub mod ignore;
pub mod language;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::models::index::{FileNode, NodeKind, ProjectIndex};
use ignore::IgnoreMatcher;
use language::language_for_extension;

/// Files at or above this size never have their content cached.
pub const MAX_CACHED_FILE_SIZE: u64 = 100 * 1024;

/// Recursive project walker.
pub struct FileIndexer {
    root_path: std::path::PathBuf,
    matcher: IgnoreMatcher,
}

impl FileIndexer {
    /// Create an indexer rooted at the given path.
    pub fn new(root_path: impl AsRef<Path>) -> Self {
        Self {
            root_path: root_path.as_ref().to_path_buf(),
            matcher: IgnoreMatcher::new(),
        }
    }

    /// Build the catalog from scratch. Always succeeds; unreadable subtrees
    /// are skipped with a warning.
    pub fn index_project(&self) -> ProjectIndex {
        let mut index = ProjectIndex::new(self.root_path.display().to_string());
        self.walk_directory(&self.root_path, &mut index);
        index.last_indexed = chrono::Utc::now().timestamp();
        tracing::debug!(
            root = %self.root_path.display(),
            files = index.total_files,
            bytes = index.total_size,
            "indexed project"
        );
        index
    }

    /// Depth-first walk of one directory.
    fn walk_directory(&self, dir: &Path, index: &mut ProjectIndex) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(path = %dir.display(), error = %e, "skipping unreadable directory");
                return;
            }
        };

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(path = %dir.display(), error = %e, "skipping unreadable entry");
                    continue;
                }
            };

            let path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();
            let relative = self.relative_path(&path);

            if self.matcher.is_ignored(&name, &relative) {
                continue;
            }

            let metadata = match entry.metadata() {
                Ok(metadata) => metadata,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unstatable entry");
                    continue;
                }
            };

            if metadata.is_dir() {
                index.files.insert(
                    relative.clone(),
                    Arc::new(FileNode {
                        path: relative,
                        name,
                        kind: NodeKind::Directory,
                        size: 0,
                        extension: String::new(),
                        language: String::new(),
                        last_modified: modified_timestamp(&metadata),
                        content: None,
                    }),
                );
                self.walk_directory(&path, index);
            } else if metadata.is_file() {
                let node = self.build_file_node(&path, relative, name, &metadata);
                index.total_files += 1;
                index.total_size += node.size;
                index.languages.insert(node.language.clone());
                index.files.insert(node.path.clone(), Arc::new(node));
            }
            // Symlinks and other entry kinds are not catalogued.
        }
    }

    fn build_file_node(
        &self,
        path: &Path,
        relative: String,
        name: String,
        metadata: &fs::Metadata,
    ) -> FileNode {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default();
        let language = language_for_extension(&extension).to_string();
        let size = metadata.len();

        // Binary or non-UTF-8 content is swallowed; the node is kept
        // without a content cache.
        let content = if size < MAX_CACHED_FILE_SIZE {
            fs::read_to_string(path).ok()
        } else {
            None
        };

        FileNode {
            path: relative,
            name,
            kind: NodeKind::File,
            size,
            extension,
            language,
            last_modified: modified_timestamp(metadata),
            content,
        }
    }

    /// Relative path with `/` separators, for stable keys across platforms.
    fn relative_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.root_path)
            .unwrap_or(path)
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Case-insensitive substring match against node name or path, unordered.
pub fn search_files(index: &ProjectIndex, query: &str) -> Vec<Arc<FileNode>> {
    let needle = query.to_lowercase();
    index
        .files
        .values()
        .filter(|node| {
            node.name.to_lowercase().contains(&needle)
                || node.path.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Cached content if present, else a fresh read, else `None`.
pub fn get_file_content(index: &ProjectIndex, path: &str) -> Option<String> {
    let node = index.get(path)?;
    if let Some(content) = &node.content {
        return Some(content.clone());
    }
    let absolute = Path::new(&index.root_path).join(path);
    fs::read_to_string(absolute).ok()
}

fn modified_timestamp(metadata: &fs::Metadata) -> Option<i64> {
    metadata
        .modified()
        .ok()
        .and_then(|time| time.duration_since(std::time::UNIX_EPOCH).ok())
        .map(|d| d.as_secs() as i64)
}
