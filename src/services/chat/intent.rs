//! Intent Classification
//!
//! Fixed, ordered keyword rules. Each rule is a conjunction of keyword
//! groups: the rule matches when every group contributes at least one
//! keyword found in the lowercased query. The first matching rule wins,
//! so priority lives in the table order, not in code flow.

use serde::{Deserialize, Serialize};

/// What the user is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    FindEndpoints,
    FindAuth,
    FindDatabase,
    Debug,
    Explain,
    General,
}

/// Rule table in priority order. Auth keywords outrank the explain rule,
/// so "Explain how auth works" classifies as `FindAuth`.
const RULES: &[(Intent, &[&[&str]])] = &[
    (Intent::FindEndpoints, &[&["where"], &["api", "endpoint"]]),
    (Intent::FindAuth, &[&["auth", "login", "password", "session"]]),
    (
        Intent::FindDatabase,
        &[&["database", "query", "sql", "schema"]],
    ),
    (Intent::Debug, &[&["bug", "error", "debug", "fix"]]),
    (Intent::Explain, &[&["explain", "how", "what", "why"]]),
];

/// Total function: always returns exactly one intent.
pub fn detect_intent(query: &str) -> Intent {
    let lowered = query.to_lowercase();
    for (intent, groups) in RULES {
        let matched = groups
            .iter()
            .all(|group| group.iter().any(|keyword| lowered.contains(keyword)));
        if matched {
            return *intent;
        }
    }
    Intent::General
}
