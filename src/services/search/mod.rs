//! Code Search
//!
//! Ranked keyword and pattern queries over an indexed project. Stateless:
//! every query borrows the context engine, and every query on an unbuilt
//! engine returns an empty result set rather than an error.

use std::cmp::Ordering;
use std::sync::Arc;

use serde::Serialize;

use crate::models::index::FileNode;
use crate::services::context::ContextEngine;
use crate::services::indexer::language::is_code_extension;

/// Upper bound on content-search results after ranking.
const MAX_CONTENT_RESULTS: usize = 20;

/// One ranked hit.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    /// Shared handle into the index; results never copy node data.
    pub file: Arc<FileNode>,
    /// Heuristic score in [0.0, 1.0].
    pub relevance: f64,
    /// Numbered context window around the matched line.
    pub snippet: Option<String>,
    /// 1-based line of the match, for content queries.
    pub line_number: Option<usize>,
}

/// Query modes over a built [`ContextEngine`].
pub struct CodeSearch<'a> {
    engine: &'a ContextEngine,
}

impl<'a> CodeSearch<'a> {
    pub fn new(engine: &'a ContextEngine) -> Self {
        Self { engine }
    }

    /// Name lookup with tiered relevance: exact 1.0, prefix 0.8, name
    /// substring 0.5, path substring 0.1. Sorted descending.
    pub fn search_by_name(&self, query: &str) -> Vec<SearchResult> {
        let Some(ctx) = self.engine.context() else {
            return Vec::new();
        };
        let needle = query.to_lowercase();

        let mut results: Vec<SearchResult> = ctx
            .index
            .file_nodes()
            .filter_map(|node| {
                let name = node.name.to_lowercase();
                let relevance = if name == needle {
                    1.0
                } else if name.starts_with(&needle) {
                    0.8
                } else if name.contains(&needle) {
                    0.5
                } else if node.path.to_lowercase().contains(&needle) {
                    0.1
                } else {
                    return None;
                };
                Some(SearchResult {
                    file: node.clone(),
                    relevance,
                    snippet: None,
                    line_number: None,
                })
            })
            .collect();

        sort_by_relevance(&mut results);
        results
    }

    /// Case-insensitive line scan over code files. Each hit carries a
    /// numbered context window of two lines either side. Capped at 20.
    pub fn search_by_content(&self, query: &str) -> Vec<SearchResult> {
        let needle = query.to_lowercase();
        let mut results = self.scan_code_files(|line, lowered| {
            if lowered.contains(&needle) {
                Some(content_relevance(line, lowered, &needle))
            } else {
                None
            }
        });

        sort_by_relevance(&mut results);
        results.truncate(MAX_CONTENT_RESULTS);
        results
    }

    /// Declaration-site lookup for an identifier. Every hit is 1.0 and the
    /// result set is neither ordered nor capped.
    pub fn find_definition(&self, identifier: &str) -> Vec<SearchResult> {
        let patterns: Vec<String> = [
            "function {}",
            "class {}",
            "interface {}",
            "type {} ",
            "const {} =",
            "let {} =",
            "export function {}",
            "export class {}",
            "export const {} =",
            "fn {}",
            "struct {}",
            "enum {}",
            "def {}",
        ]
        .iter()
        .map(|template| template.replace("{}", identifier).to_lowercase())
        .collect();

        self.scan_code_files(|_line, lowered| {
            patterns.iter().any(|p| lowered.contains(p)).then_some(1.0)
        })
    }

    /// Lines that look like HTTP route registrations.
    pub fn find_api_endpoints(&self) -> Vec<SearchResult> {
        const PATTERNS: &[&str] = &[
            "app.get(",
            "app.post(",
            "app.put(",
            "app.delete(",
            "app.patch(",
            "router.get(",
            "router.post(",
            "router.put(",
            "router.delete(",
            "router.patch(",
            "@get(",
            "@post(",
            "@put(",
            "@delete(",
            "fastify.get(",
            "fastify.post(",
        ];
        self.scan_for_patterns(PATTERNS)
    }

    /// Lines that look like SQL or ORM data access.
    pub fn find_database_queries(&self) -> Vec<SearchResult> {
        const PATTERNS: &[&str] = &[
            "select ",
            "insert into",
            "update ",
            "delete from",
            ".query(",
            ".execute(",
            ".findone(",
            ".findmany(",
            ".findall(",
            ".findbyid(",
            "prisma.",
            "mongoose.",
        ];
        self.scan_for_patterns(PATTERNS)
    }

    /// Lines that look like authentication or credential handling.
    pub fn find_auth_logic(&self) -> Vec<SearchResult> {
        const PATTERNS: &[&str] = &[
            "auth",
            "login",
            "logout",
            "password",
            "session",
            "token",
            "jwt",
            "bcrypt",
            "passport",
        ];
        self.scan_for_patterns(PATTERNS)
    }

    fn scan_for_patterns(&self, patterns: &[&str]) -> Vec<SearchResult> {
        self.scan_code_files(|_line, lowered| {
            patterns.iter().any(|p| lowered.contains(p)).then_some(1.0)
        })
    }

    /// Shared line scanner. `matcher` receives the raw line and its
    /// lowercase form and returns a relevance when the line hits.
    fn scan_code_files<F>(&self, matcher: F) -> Vec<SearchResult>
    where
        F: Fn(&str, &str) -> Option<f64>,
    {
        let Some(ctx) = self.engine.context() else {
            return Vec::new();
        };

        let mut results = Vec::new();
        for node in ctx.index.file_nodes() {
            if !is_code_extension(&node.extension) {
                continue;
            }
            let Some(content) = self.engine.file_content(&node.path) else {
                continue;
            };
            let lines: Vec<&str> = content.lines().collect();
            for (i, line) in lines.iter().enumerate() {
                let lowered = line.to_lowercase();
                if let Some(relevance) = matcher(line, &lowered) {
                    results.push(SearchResult {
                        file: node.clone(),
                        relevance,
                        snippet: Some(snippet_around(&lines, i)),
                        line_number: Some(i + 1),
                    });
                }
            }
        }
        results
    }
}

/// Context window of two lines either side, each prefixed with its
/// 1-based line number.
fn snippet_around(lines: &[&str], hit: usize) -> String {
    let start = hit.saturating_sub(2);
    let end = (hit + 2).min(lines.len().saturating_sub(1));
    lines[start..=end]
        .iter()
        .enumerate()
        .map(|(offset, line)| format!("{}: {}", start + offset + 1, line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// First matching tier wins.
fn content_relevance(line: &str, lowered: &str, needle: &str) -> f64 {
    if line.trim().to_lowercase() == *needle {
        1.0
    } else if lowered.contains("function") || lowered.contains("class") {
        0.9
    } else if lowered.contains("import") || lowered.contains("export") {
        0.7
    } else {
        0.5
    }
}

fn sort_by_relevance(results: &mut [SearchResult]) {
    results.sort_by(|a, b| {
        b.relevance
            .partial_cmp(&a.relevance)
            .unwrap_or(Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn built_engine(files: &[(&str, &str)]) -> (TempDir, ContextEngine) {
        let dir = TempDir::new().unwrap();
        for (path, content) in files {
            let full = dir.path().join(path);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(full, content).unwrap();
        }
        let mut engine = ContextEngine::new();
        engine.build(&dir.path().display().to_string()).unwrap();
        (dir, engine)
    }

    #[test]
    fn test_name_search_tiers() {
        let (_dir, engine) = built_engine(&[
            ("auth.ts", ""),
            ("auth_service.ts", ""),
            ("user_auth.ts", ""),
            ("services/auth/index.ts", ""),
        ]);
        let search = CodeSearch::new(&engine);

        let results = search.search_by_name("auth.ts");
        let exact = results
            .iter()
            .find(|r| r.file.name == "auth.ts")
            .unwrap();
        assert_eq!(exact.relevance, 1.0);

        let results = search.search_by_name("auth");
        let by_name: std::collections::HashMap<_, _> = results
            .iter()
            .map(|r| (r.file.path.clone(), r.relevance))
            .collect();
        assert_eq!(by_name["auth_service.ts"], 0.8);
        assert_eq!(by_name["user_auth.ts"], 0.5);
        assert_eq!(by_name["services/auth/index.ts"], 0.1);

        // Descending order.
        for window in results.windows(2) {
            assert!(window[0].relevance >= window[1].relevance);
        }
    }

    #[test]
    fn test_content_search_snippet_and_tie() {
        // Two plain hits with no keyword signal each score 0.5 and carry
        // a five-line numbered window centered on the hit.
        let file1 = "a\nb\nc\nd\nlet x = 1; // TODO\nf\ng\n";
        let file2 = "p\nlet y = 2; // TODO\nr\n";
        let (_dir, engine) = built_engine(&[("one.ts", file1), ("two.ts", file2)]);
        let search = CodeSearch::new(&engine);

        let results = search.search_by_content("TODO");
        assert_eq!(results.len(), 2);
        for r in &results {
            assert_eq!(r.relevance, 0.5);
        }

        let hit1 = results.iter().find(|r| r.file.name == "one.ts").unwrap();
        assert_eq!(hit1.line_number, Some(5));
        assert_eq!(
            hit1.snippet.as_deref(),
            Some("3: c\n4: d\n5: let x = 1; // TODO\n6: f\n7: g")
        );
    }

    #[test]
    fn test_content_relevance_tiers() {
        let source = "handleUser();\nexport function handleUser() {}\nimport { handleUser } from './user';\nhandleUser\n";
        let (_dir, engine) = built_engine(&[("app.ts", source)]);
        let search = CodeSearch::new(&engine);

        let results = search.search_by_content("handleUser");
        let by_line: std::collections::HashMap<_, _> = results
            .iter()
            .map(|r| (r.line_number.unwrap(), r.relevance))
            .collect();
        assert_eq!(by_line[&1], 0.5);
        assert_eq!(by_line[&2], 0.9);
        assert_eq!(by_line[&3], 0.7);
        assert_eq!(by_line[&4], 1.0);
        assert_eq!(results[0].line_number, Some(4));
    }

    #[test]
    fn test_content_search_capped_at_twenty() {
        let source = "target();\n".repeat(30);
        let (_dir, engine) = built_engine(&[("big.ts", &source)]);
        let search = CodeSearch::new(&engine);

        let results = search.search_by_content("target");
        assert_eq!(results.len(), MAX_CONTENT_RESULTS);
    }

    #[test]
    fn test_content_search_skips_non_code_files() {
        let (_dir, engine) = built_engine(&[
            ("notes.md", "TODO in markdown"),
            ("app.ts", "// TODO in code"),
        ]);
        let search = CodeSearch::new(&engine);

        let results = search.search_by_content("TODO");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].file.name, "app.ts");
    }

    #[test]
    fn test_find_definition_uncapped_all_max_relevance() {
        let mut source = String::new();
        for i in 0..25 {
            source.push_str(&format!("function resolve() {{ return {}; }}\n", i));
        }
        let (_dir, engine) = built_engine(&[("dup.ts", &source)]);
        let search = CodeSearch::new(&engine);

        let results = search.find_definition("resolve");
        assert_eq!(results.len(), 25);
        assert!(results.iter().all(|r| r.relevance == 1.0));
    }

    #[test]
    fn test_find_api_endpoints() {
        let source = "const app = express();\napp.get('/users', list);\napp.post('/users', create);\nconsole.log('up');\n";
        let (_dir, engine) = built_engine(&[("server.ts", source)]);
        let search = CodeSearch::new(&engine);

        let results = search.find_api_endpoints();
        let lines: Vec<_> = results.iter().map(|r| r.line_number.unwrap()).collect();
        assert_eq!(lines, vec![2, 3]);
        assert!(results.iter().all(|r| r.relevance == 1.0));
    }

    #[test]
    fn test_find_database_queries_and_auth() {
        let source = "db.query('SELECT * FROM users');\nconst hash = bcrypt.hash(password, 10);\n";
        let (_dir, engine) = built_engine(&[("repo.ts", source)]);
        let search = CodeSearch::new(&engine);

        assert_eq!(search.find_database_queries().len(), 1);
        // The bcrypt line matches both "bcrypt" and "password".
        assert!(!search.find_auth_logic().is_empty());
    }

    #[test]
    fn test_unbuilt_context_returns_empty() {
        let engine = ContextEngine::new();
        let search = CodeSearch::new(&engine);

        assert!(search.search_by_name("anything").is_empty());
        assert!(search.search_by_content("anything").is_empty());
        assert!(search.find_definition("anything").is_empty());
        assert!(search.find_api_endpoints().is_empty());
        assert!(search.find_database_queries().is_empty());
        assert!(search.find_auth_logic().is_empty());
    }
}
