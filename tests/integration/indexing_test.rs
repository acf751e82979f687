//! Indexing Integration Tests
//!
//! Walks real temporary directory trees and checks the catalog: ignore
//! handling, content caching, language classification, and aggregate
//! totals.

use std::fs;

use buildforge::services::indexer::{
    get_file_content, search_files, FileIndexer, MAX_CACHED_FILE_SIZE,
};
use buildforge::NodeKind;
use tempfile::TempDir;

fn write(dir: &TempDir, path: &str, content: &[u8]) {
    let full = dir.path().join(path);
    fs::create_dir_all(full.parent().unwrap()).unwrap();
    fs::write(full, content).unwrap();
}

#[test]
fn test_single_counted_file_among_ignored_trees() {
    let dir = TempDir::new().unwrap();
    write(&dir, "src/a.ts", &[b'x'; 50]);
    write(&dir, "node_modules/x.js", &[b'y'; 50]);

    let index = FileIndexer::new(dir.path()).index_project();

    assert_eq!(index.total_files, 1);
    assert_eq!(index.total_size, 50);
    let languages: Vec<_> = index.languages.iter().cloned().collect();
    assert_eq!(languages, vec!["typescript"]);
}

#[test]
fn test_no_node_under_ignored_segments() {
    let dir = TempDir::new().unwrap();
    write(&dir, "src/ok.rs", b"fn ok() {}");
    write(&dir, "node_modules/pkg/deep/mod.js", b"x");
    write(&dir, ".git/objects/ab/cdef", b"x");
    write(&dir, "dist/bundle.js", b"x");
    write(&dir, "coverage/lcov.info", b"x");
    write(&dir, ".DS_Store", b"x");
    write(&dir, "build.log", b"x");

    let index = FileIndexer::new(dir.path()).index_project();

    assert_eq!(index.total_files, 1);
    for key in index.files.keys() {
        assert!(!key.contains("node_modules"), "leaked: {}", key);
        assert!(!key.contains(".git"), "leaked: {}", key);
        assert!(!key.contains("dist"), "leaked: {}", key);
        assert!(!key.ends_with(".log"), "leaked: {}", key);
    }
}

#[test]
fn test_content_cache_threshold() {
    let dir = TempDir::new().unwrap();
    write(&dir, "small.rs", b"fn main() {}");
    write(&dir, "large.rs", &vec![b'a'; MAX_CACHED_FILE_SIZE as usize]);

    let index = FileIndexer::new(dir.path()).index_project();

    assert!(index.get("small.rs").unwrap().content.is_some());
    assert!(index.get("large.rs").unwrap().content.is_none());
    // Uncached content still reads on demand.
    assert!(get_file_content(&index, "large.rs").is_some());
}

#[test]
fn test_nested_directories_catalogued() {
    let dir = TempDir::new().unwrap();
    write(&dir, "a/b/c/leaf.py", b"x = 1");

    let index = FileIndexer::new(dir.path()).index_project();

    assert_eq!(index.total_files, 1);
    for path in ["a", "a/b", "a/b/c"] {
        assert_eq!(index.get(path).unwrap().kind, NodeKind::Directory);
    }
    let leaf = index.get("a/b/c/leaf.py").unwrap();
    assert_eq!(leaf.language, "python");
    assert_eq!(leaf.extension, "py");
}

#[test]
fn test_search_files_matches_name_and_path() {
    let dir = TempDir::new().unwrap();
    write(&dir, "src/services/AuthService.ts", b"export {}");
    write(&dir, "src/other.ts", b"export {}");

    let index = FileIndexer::new(dir.path()).index_project();

    let by_name = search_files(&index, "AUTHSERVICE");
    assert_eq!(by_name.len(), 1);

    let by_path: Vec<_> = search_files(&index, "services")
        .into_iter()
        .filter(|n| n.kind == NodeKind::File)
        .collect();
    assert_eq!(by_path.len(), 1);
    assert_eq!(by_path[0].path, "src/services/AuthService.ts");
}
