//! Orchestration Integration Tests
//!
//! Runs the full planner-to-tools pipeline with a scripted generator and
//! the built-in tool registry, verifying real filesystem effects, retry
//! and abort semantics, and the emitted event stream.

use std::sync::Arc;

use async_trait::async_trait;
use buildforge::core::{TaskEvent, TaskEventPayload};
use buildforge::llm::{LlmResult, TextGenerator};
use buildforge::models::task::generate_task_id;
use buildforge::tools::builtin_registry;
use buildforge::{StepStatus, TaskOrchestrator, TaskStatus};
use tempfile::TempDir;

/// Generator that replays a canned planning response.
struct ScriptedGenerator {
    response: String,
}

impl ScriptedGenerator {
    fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-1"
    }

    async fn generate(&self, _system: &str, _user: &str) -> LlmResult<String> {
        Ok(self.response.clone())
    }
}

fn orchestrator_with(response: &str) -> TaskOrchestrator {
    let provider = Arc::new(ScriptedGenerator::new(response));
    let registry = Arc::new(builtin_registry(provider.clone()).unwrap());
    TaskOrchestrator::new(provider, registry)
}

#[tokio::test]
async fn test_scaffold_task_creates_real_files() {
    let project = TempDir::new().unwrap();
    let plan = r#"Here is your plan:
[
  {"description": "Create the source folder", "tool": "create_folder", "args": {"path": "src"}},
  {"description": "Write the entry point", "tool": "create_file", "args": {"path": "src/index.js", "content": "console.log('hi');\n"}}
]
Good luck!"#;

    let orch = orchestrator_with(plan);
    let task = orch
        .execute_task("Scaffold a JS app", &project.path().display().to_string())
        .await;

    assert_eq!(task.status, TaskStatus::Complete);
    assert!(task.steps.iter().all(|s| s.status == StepStatus::Complete));
    assert!(project.path().join("src/index.js").is_file());
    assert_eq!(
        std::fs::read_to_string(project.path().join("src/index.js")).unwrap(),
        "console.log('hi');\n"
    );
    assert_eq!(task.files_created(), 1);
}

#[tokio::test]
async fn test_relative_paths_are_rooted_at_project() {
    let project = TempDir::new().unwrap();
    let plan = r#"[{"description": "Write config", "tool": "create_file", "args": {"path": "config.json", "content": "{}"}}]"#;

    let orch = orchestrator_with(plan);
    let task = orch
        .execute_task("Add a config", &project.path().display().to_string())
        .await;

    assert_eq!(task.status, TaskStatus::Complete);
    assert!(project.path().join("config.json").is_file());
    // The audit trail records the resolved absolute path.
    let recorded = task.executed_tools[0].args["path"].as_str().unwrap();
    assert!(recorded.starts_with(&project.path().display().to_string()));
}

#[tokio::test]
async fn test_step_failing_twice_aborts_later_steps() {
    let project = TempDir::new().unwrap();
    // Step 2 reads a file that does not exist, so it fails on both
    // attempts; step 3 must never run.
    let plan = r#"[
  {"description": "Create folder", "tool": "create_folder", "args": {"path": "out"}},
  {"description": "Read missing file", "tool": "read_file", "args": {"path": "no/such/file.txt"}},
  {"description": "Write result", "tool": "create_file", "args": {"path": "out/result.txt", "content": "x"}}
]"#;

    let orch = orchestrator_with(plan);
    let task = orch
        .execute_task("Transform a file", &project.path().display().to_string())
        .await;

    assert_eq!(task.status, TaskStatus::Failed);
    assert_eq!(task.steps[0].status, StepStatus::Complete);
    assert_eq!(task.steps[1].status, StepStatus::Failed);
    assert_eq!(task.steps[2].status, StepStatus::Pending);
    assert!(!task.errors.is_empty());
    assert!(!project.path().join("out/result.txt").exists());
    // Folder once, failed read twice.
    assert_eq!(task.executed_tools.len(), 3);
}

#[tokio::test]
async fn test_validation_failure_counts_toward_retry_policy() {
    let project = TempDir::new().unwrap();
    // Missing the required "content" argument; the registry rejects the
    // call both times without ever running the tool.
    let plan = r#"[{"description": "Write file", "tool": "create_file", "args": {"path": "a.txt"}}]"#;

    let orch = orchestrator_with(plan);
    let task = orch
        .execute_task("Write a file", &project.path().display().to_string())
        .await;

    assert_eq!(task.status, TaskStatus::Failed);
    assert!(task
        .errors
        .iter()
        .any(|e| e.contains("Missing required parameter")));
    assert!(!project.path().join("a.txt").exists());
}

#[tokio::test]
async fn test_unplannable_response_never_touches_the_project() {
    let project = TempDir::new().unwrap();
    let orch = orchestrator_with("Sorry, no structured output today.");

    let task = orch
        .execute_task("Do something", &project.path().display().to_string())
        .await;

    assert_eq!(task.status, TaskStatus::Failed);
    assert!(task.executed_tools.is_empty());
    assert_eq!(std::fs::read_dir(project.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_event_stream_for_successful_task() {
    let project = TempDir::new().unwrap();
    let plan = r#"[{"description": "Create folder", "tool": "create_folder", "args": {"path": "app"}}]"#;

    let provider = Arc::new(ScriptedGenerator::new(plan));
    let registry = Arc::new(builtin_registry(provider.clone()).unwrap());
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let orch = TaskOrchestrator::new(provider, registry).with_events(tx);

    orch.execute_task("Make a folder", &project.path().display().to_string())
        .await;

    let mut events: Vec<TaskEvent> = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }

    // Terminal signal is a single complete event, and error never appears.
    assert!(matches!(
        events.last().unwrap().payload,
        TaskEventPayload::Complete { .. }
    ));
    assert!(!events
        .iter()
        .any(|e| matches!(e.payload, TaskEventPayload::Error { .. })));

    // tool_call precedes its tool_result.
    let call_pos = events
        .iter()
        .position(|e| matches!(e.payload, TaskEventPayload::ToolCall { .. }))
        .unwrap();
    let result_pos = events
        .iter()
        .position(|e| matches!(e.payload, TaskEventPayload::ToolResult { .. }))
        .unwrap();
    assert!(call_pos < result_pos);

    // Timestamps never go backwards.
    for pair in events.windows(2) {
        assert!(pair[0].timestamp <= pair[1].timestamp);
    }
}

#[tokio::test]
async fn test_task_ids_unique_under_concurrent_creation() {
    let handles: Vec<_> = (0..32)
        .map(|_| tokio::spawn(async { generate_task_id() }))
        .collect();

    let mut ids = std::collections::HashSet::new();
    for handle in handles {
        assert!(ids.insert(handle.await.unwrap()));
    }
    assert_eq!(ids.len(), 32);
}
