//! Tech Stack Detection
//!
//! Derives a list of framework and language tags for an indexed project by
//! inspecting marker files (package.json, Cargo.toml, pyproject.toml, go.mod)
//! and falling back to an extension census over the catalogued files.

use std::collections::BTreeSet;

use crate::models::index::ProjectIndex;
use crate::services::indexer::get_file_content;

/// Detects the technology stack of an indexed project.
pub struct TechStackDetector;

impl TechStackDetector {
    /// Tags for the project, alphabetically ordered and deduplicated.
    pub fn detect(index: &ProjectIndex) -> Vec<String> {
        let mut tags = BTreeSet::new();

        if let Some(content) = get_file_content(index, "package.json") {
            Self::detect_node(&content, index, &mut tags);
        }
        if index.get("Cargo.toml").is_some() {
            tags.insert("rust".to_string());
        }
        if index.get("go.mod").is_some() {
            tags.insert("go".to_string());
        }
        if index.get("pyproject.toml").is_some()
            || index.get("requirements.txt").is_some()
            || index.get("setup.py").is_some()
        {
            tags.insert("python".to_string());
        }

        Self::census(index, &mut tags);

        tags.into_iter().collect()
    }

    /// package.json inspection: dependency names map to framework tags.
    fn detect_node(content: &str, index: &ProjectIndex, tags: &mut BTreeSet<String>) {
        tags.insert("node".to_string());

        let json: serde_json::Value = match serde_json::from_str(content) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "unparseable package.json, skipping dependency tags");
                return;
            }
        };

        let has_dep = |name: &str| -> bool {
            ["dependencies", "devDependencies"]
                .iter()
                .any(|section| json.get(section).and_then(|deps| deps.get(name)).is_some())
        };

        let framework_deps = [
            ("react", "react"),
            ("next", "next.js"),
            ("vue", "vue"),
            ("express", "express"),
            ("tailwindcss", "tailwind"),
        ];
        for (dep, tag) in framework_deps {
            if has_dep(dep) {
                tags.insert(tag.to_string());
            }
        }

        // Config-file markers catch frameworks missing from the manifest.
        if index.get("next.config.js").is_some() || index.get("next.config.mjs").is_some() {
            tags.insert("next.js".to_string());
        }
        if index.get("tailwind.config.js").is_some() || index.get("tailwind.config.ts").is_some() {
            tags.insert("tailwind".to_string());
        }
        if has_dep("typescript") || index.get("tsconfig.json").is_some() {
            tags.insert("typescript".to_string());
        }
    }

    /// Extension census: languages that dominate the file catalog become
    /// tags even without a marker file.
    fn census(index: &ProjectIndex, tags: &mut BTreeSet<String>) {
        for language in &index.languages {
            match language.as_str() {
                "typescript" | "javascript" | "rust" | "python" | "go" => {
                    tags.insert(language.clone());
                }
                _ => {}
            }
        }
    }
}
