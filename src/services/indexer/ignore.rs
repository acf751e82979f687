//! Indexing Ignore Patterns
//!
//! The fixed ignore set applied during the project walk. A pattern matches
//! an entry when its name matches exactly, when a literal `*` wildcard
//! pattern (translated to a permissive anchored regex) matches the name, or
//! when the entry's relative path contains the pattern as a full segment.

use regex::Regex;

/// Fixed ignore list; not configurable in the base design.
pub const IGNORE_PATTERNS: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    ".next",
    "coverage",
    ".vscode",
    ".idea",
    "*.log",
    ".DS_Store",
];

enum CompiledPattern {
    /// Exact name match plus `/<name>/` path containment
    Exact(String),
    /// Literal `*` wildcard translated to an anchored regex over the name
    Wildcard(Regex),
}

/// Matcher over the fixed ignore set.
pub struct IgnoreMatcher {
    patterns: Vec<CompiledPattern>,
}

impl IgnoreMatcher {
    /// Compile the fixed ignore set.
    pub fn new() -> Self {
        let patterns = IGNORE_PATTERNS
            .iter()
            .map(|pattern| {
                if pattern.contains('*') {
                    CompiledPattern::Wildcard(wildcard_regex(pattern))
                } else {
                    CompiledPattern::Exact(pattern.to_string())
                }
            })
            .collect();
        Self { patterns }
    }

    /// Whether an entry with this name and relative path should be skipped.
    pub fn is_ignored(&self, name: &str, relative_path: &str) -> bool {
        // Normalize so segment containment works for paths at any depth.
        let padded = format!("/{}/", relative_path.trim_matches('/'));
        self.patterns.iter().any(|pattern| match pattern {
            CompiledPattern::Exact(exact) => {
                name == exact || padded.contains(&format!("/{}/", exact))
            }
            CompiledPattern::Wildcard(regex) => regex.is_match(name),
        })
    }
}

impl Default for IgnoreMatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Translate a literal `*` wildcard pattern into an anchored regex.
///
/// Every regex metacharacter except `*` is escaped; `*` becomes `.*`.
fn wildcard_regex(pattern: &str) -> Regex {
    let mut translated = String::with_capacity(pattern.len() + 8);
    translated.push('^');
    for ch in pattern.chars() {
        if ch == '*' {
            translated.push_str(".*");
        } else {
            translated.push_str(&regex::escape(&ch.to_string()));
        }
    }
    translated.push('$');
    // The fixed pattern set always translates to a valid expression.
    Regex::new(&translated).unwrap_or_else(|_| Regex::new("$^").unwrap())
}
