//! Intelligent Chat Engine
//!
//! Classifies a user query, gathers grounding context through the search
//! service, assembles a grounded prompt, and shapes a structured reply.
//! Keeps an append-only conversation history.

pub mod intent;

use crate::models::chat::{ChatMessage, ChatResponse};
use crate::services::context::ContextEngine;
use crate::services::search::{CodeSearch, SearchResult};
use intent::{detect_intent, Intent};

/// At most this many snippets ground a single reply.
const MAX_SNIPPETS: usize = 10;
/// Content-search results taken per extracted keyword.
const RESULTS_PER_KEYWORD: usize = 5;

const CHAT_SYSTEM_PROMPT: &str = "You are a senior engineer answering questions \
about the codebase below. Ground every claim in the provided files and say so \
when the context is insufficient.";

const CHAT_INSTRUCTION_SUFFIX: &str = "Answer using only the context above. \
Reference files by path when you do.";

/// Query tokens never treated as search keywords.
const STOP_WORDS: &[&str] = &[
    "about", "codebase", "could", "does", "explain", "file", "files", "find",
    "from", "have", "please", "project", "show", "that", "them", "then",
    "there", "these", "this", "what", "when", "where", "which", "with",
    "work", "works", "would", "your",
];

pub struct IntelligentChatEngine {
    conversation_history: Vec<ChatMessage>,
}

impl Default for IntelligentChatEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl IntelligentChatEngine {
    pub fn new() -> Self {
        Self {
            conversation_history: Vec::new(),
        }
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.conversation_history
    }

    /// Classify, ground, and answer one query. Appends the user message and
    /// the shaped assistant message to history, in that order.
    pub fn process_query(&mut self, context: &ContextEngine, query: &str) -> ChatResponse {
        let intent = detect_intent(query);
        tracing::debug!(?intent, query, "chat query classified");

        let results = self.gather_context(context, intent, query);
        let referenced_files = dedup_paths(&results);
        let code_snippets: Vec<String> = results
            .iter()
            .filter_map(snippet_block)
            .take(MAX_SNIPPETS)
            .collect();

        let grounded_prompt = assemble_prompt(context, &code_snippets, query);
        let reply = shape_reply(intent, &results, &referenced_files);

        self.conversation_history.push(ChatMessage::user(query));
        self.conversation_history.push(ChatMessage::assistant(
            reply.clone(),
            referenced_files.clone(),
            code_snippets.clone(),
        ));

        ChatResponse {
            reply,
            intent: intent_tag(intent).to_string(),
            referenced_files,
            code_snippets,
            grounded_prompt,
        }
    }

    /// Intent-directed lookups for the find intents; keyword content
    /// searches for everything else.
    fn gather_context(
        &self,
        context: &ContextEngine,
        intent: Intent,
        query: &str,
    ) -> Vec<SearchResult> {
        let search = CodeSearch::new(context);
        match intent {
            Intent::FindEndpoints => search.find_api_endpoints(),
            Intent::FindAuth => search.find_auth_logic(),
            Intent::FindDatabase => search.find_database_queries(),
            Intent::Debug | Intent::Explain | Intent::General => {
                let mut results = Vec::new();
                for keyword in extract_keywords(query) {
                    results.extend(
                        search
                            .search_by_content(&keyword)
                            .into_iter()
                            .take(RESULTS_PER_KEYWORD),
                    );
                }
                results
            }
        }
    }
}

/// Tokens longer than three characters, lowercased, minus stop words.
fn extract_keywords(query: &str) -> Vec<String> {
    query
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.len() > 3)
        .map(str::to_lowercase)
        .filter(|token| !STOP_WORDS.contains(&token.as_str()))
        .collect()
}

/// File paths in first-seen order, deduplicated.
fn dedup_paths(results: &[SearchResult]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    results
        .iter()
        .map(|r| r.file.path.clone())
        .filter(|path| seen.insert(path.clone()))
        .collect()
}

fn snippet_block(result: &SearchResult) -> Option<String> {
    let snippet = result.snippet.as_ref()?;
    let header = match result.line_number {
        Some(line) => format!("{} (line {})", result.file.path, line),
        None => result.file.path.clone(),
    };
    Some(format!("{}\n```\n{}\n```", header, snippet))
}

/// Deterministic concatenation: system prompt, project summary, snippet
/// blocks, the raw query, instruction suffix.
fn assemble_prompt(context: &ContextEngine, snippets: &[String], query: &str) -> String {
    let mut prompt = String::new();
    prompt.push_str(CHAT_SYSTEM_PROMPT);
    prompt.push_str("\n\n");
    prompt.push_str(&context.project_summary());
    prompt.push_str("\n\n");
    for snippet in snippets {
        prompt.push_str(snippet);
        prompt.push_str("\n\n");
    }
    prompt.push_str("User question: ");
    prompt.push_str(query);
    prompt.push_str("\n\n");
    prompt.push_str(CHAT_INSTRUCTION_SUFFIX);
    prompt
}

/// Find intents render an enumerated hit list; everything else gets a
/// summary plus the referenced files.
fn shape_reply(intent: Intent, results: &[SearchResult], referenced: &[String]) -> String {
    match intent {
        Intent::FindEndpoints | Intent::FindAuth | Intent::FindDatabase => {
            let subject = match intent {
                Intent::FindEndpoints => "API endpoints",
                Intent::FindAuth => "authentication logic",
                _ => "database access",
            };
            if results.is_empty() {
                return format!("No {} found in the indexed project.", subject);
            }
            let mut reply = format!("Found {} location(s) for {}:\n", results.len(), subject);
            for (i, result) in results.iter().enumerate() {
                let line = result
                    .line_number
                    .map(|n| format!(" (line {})", n))
                    .unwrap_or_default();
                reply.push_str(&format!("{}. {}{}\n", i + 1, result.file.path, line));
                if let Some(snippet) = &result.snippet {
                    reply.push_str(snippet);
                    reply.push('\n');
                }
            }
            reply
        }
        _ => {
            if referenced.is_empty() {
                "I could not find code relevant to that question in the indexed project."
                    .to_string()
            } else {
                format!(
                    "Found {} relevant file(s):\n{}",
                    referenced.len(),
                    referenced
                        .iter()
                        .map(|path| format!("- {}", path))
                        .collect::<Vec<_>>()
                        .join("\n")
                )
            }
        }
    }
}

fn intent_tag(intent: Intent) -> &'static str {
    match intent {
        Intent::FindEndpoints => "find_endpoints",
        Intent::FindAuth => "find_auth",
        Intent::FindDatabase => "find_database",
        Intent::Debug => "debug",
        Intent::Explain => "explain",
        Intent::General => "general",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chat::ChatRole;
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
    fn test_endpoint_query_lists_routes() {
        let (_dir, engine) = built_engine(&[(
            "server.ts",
            "const app = express();\napp.get('/users', list);\n",
        )]);
        let mut chat = IntelligentChatEngine::new();

        let response = chat.process_query(&engine, "Where are the API endpoints?");
        assert_eq!(response.intent, "find_endpoints");
        assert_eq!(response.referenced_files, vec!["server.ts".to_string()]);
        assert!(response.reply.contains("server.ts"));
        assert!(response.reply.contains("line 2"));
    }

    #[test]
    fn test_history_appends_user_then_assistant() {
        let (_dir, engine) = built_engine(&[("a.ts", "let x = 1;")]);
        let mut chat = IntelligentChatEngine::new();

        chat.process_query(&engine, "explain the parser");
        assert_eq!(chat.history().len(), 2);
        assert_eq!(chat.history()[0].role, ChatRole::User);
        assert_eq!(chat.history()[1].role, ChatRole::Assistant);

        chat.process_query(&engine, "and the lexer?");
        assert_eq!(chat.history().len(), 4);
    }

    #[test]
    fn test_keyword_extraction() {
        let keywords = extract_keywords("Where does the parser handle errors?");
        assert_eq!(keywords, vec!["parser", "handle", "errors"]);
    }

    #[test]
    fn test_grounded_prompt_structure() {
        let (_dir, engine) = built_engine(&[(
            "parser.ts",
            "export function parser() {\n  return tokens;\n}\n",
        )]);
        let mut chat = IntelligentChatEngine::new();

        let response = chat.process_query(&engine, "explain the parser module");
        assert!(response.grounded_prompt.starts_with(CHAT_SYSTEM_PROMPT));
        assert!(response.grounded_prompt.contains("parser.ts"));
        assert!(response
            .grounded_prompt
            .contains("User question: explain the parser module"));
        assert!(response.grounded_prompt.ends_with(CHAT_INSTRUCTION_SUFFIX));
    }

    #[test]
    fn test_snippets_capped() {
        let source = "function target() {}\n".repeat(30);
        let (_dir, engine) = built_engine(&[("many.ts", &source)]);
        let mut chat = IntelligentChatEngine::new();

        let response = chat.process_query(&engine, "explain target handling");
        assert!(response.code_snippets.len() <= MAX_SNIPPETS);
    }

    #[test]
    fn test_unbuilt_context_yields_empty_grounding() {
        let engine = ContextEngine::new();
        let mut chat = IntelligentChatEngine::new();

        let response = chat.process_query(&engine, "Where are the API endpoints?");
        assert!(response.referenced_files.is_empty());
        assert!(response.reply.contains("No API endpoints found"));
        assert!(response.grounded_prompt.contains("No project loaded."));
    }
}
