//! Grounding Integration Tests
//!
//! Search and chat over real indexed trees: relevance ranking, snippet
//! windows, intent routing, and grounded prompt assembly.

use std::fs;

use buildforge::services::chat::intent::{detect_intent, Intent};
use buildforge::{CodeSearch, ContextEngine, IntelligentChatEngine};
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
fn test_plain_content_hits_tie_at_half_relevance() {
    let file1 = "line1\nline2\nline3\nline4\nnote: TODO later\nline6\nline7\n";
    let file2 = "alpha\nbeta TODO\ngamma\n";
    let (_dir, engine) = built_engine(&[("one.ts", file1), ("two.ts", file2)]);
    let search = CodeSearch::new(&engine);

    let results = search.search_by_content("TODO");
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.relevance == 0.5));

    let first = results.iter().find(|r| r.file.name == "one.ts").unwrap();
    assert_eq!(first.line_number, Some(5));
    let snippet = first.snippet.as_deref().unwrap();
    assert_eq!(snippet.lines().count(), 5);
    assert!(snippet.contains("5: note: TODO later"));
}

#[test]
fn test_content_results_sorted_and_capped() {
    let mut source = String::from("export const marker = 1;\n");
    for _ in 0..25 {
        source.push_str("use_marker();\n");
    }
    let (_dir, engine) = built_engine(&[("mod.ts", &source)]);
    let search = CodeSearch::new(&engine);

    let results = search.search_by_content("marker");
    assert_eq!(results.len(), 20);
    for pair in results.windows(2) {
        assert!(pair[0].relevance >= pair[1].relevance);
    }
    // The export line outranks plain usages.
    assert_eq!(results[0].relevance, 0.7);
    assert_eq!(results[0].line_number, Some(1));
}

#[test]
fn test_intent_priority_order() {
    assert_eq!(
        detect_intent("Where are the API endpoints?"),
        Intent::FindEndpoints
    );
    // Auth keywords outrank the explain rule.
    assert_eq!(detect_intent("Explain how auth works"), Intent::FindAuth);
}

#[test]
fn test_auth_question_grounds_in_auth_code() {
    let (_dir, engine) = built_engine(&[
        (
            "src/auth.ts",
            "export function login(user, password) {\n  return session.create(user);\n}\n",
        ),
        ("src/math.ts", "export const add = (a, b) => a + b;\n"),
    ]);
    let mut chat = IntelligentChatEngine::new();

    let response = chat.process_query(&engine, "Explain how auth works");
    assert_eq!(response.intent, "find_auth");
    assert_eq!(response.referenced_files, vec!["src/auth.ts".to_string()]);
    assert!(response.grounded_prompt.contains("src/auth.ts"));
    assert!(response
        .grounded_prompt
        .contains("User question: Explain how auth works"));
}

#[test]
fn test_endpoint_question_end_to_end() {
    let (_dir, engine) = built_engine(&[(
        "server.ts",
        "const app = express();\napp.get('/users', listUsers);\napp.post('/users', createUser);\n",
    )]);
    let mut chat = IntelligentChatEngine::new();

    let response = chat.process_query(&engine, "Where are the API endpoints?");
    assert!(response.reply.contains("2 location(s)"));
    assert!(response.reply.contains("server.ts"));
    assert_eq!(chat.history().len(), 2);
    assert_eq!(chat.history()[1].referenced_files, response.referenced_files);
}

#[test]
fn test_definition_lookup_across_languages() {
    let (_dir, engine) = built_engine(&[
        ("a.ts", "export function resolve(x) { return x; }\n"),
        ("b.rs", "fn resolve(x: u32) -> u32 { x }\n"),
        ("c.py", "def resolve(x):\n    return x\n"),
    ]);
    let search = CodeSearch::new(&engine);

    let results = search.find_definition("resolve");
    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|r| r.relevance == 1.0));
}
