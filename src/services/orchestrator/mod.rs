//! Task Orchestrator
//!
//! The top-level state machine: prompt in, completed or failed `Task` out.
//! Planning asks the text-generation service for a step plan; execution
//! dispatches each step through the tool registry in strict order, with
//! exactly one retry per step. Progress is narrated through an optional
//! event channel. `execute_task` never returns an error; failures are
//! recorded on the task itself.

pub mod planner;

use std::sync::Arc;

use buildforge_core::{TaskEvent, TaskEventPayload, ToolContext, ToolRegistry};
use buildforge_llm::TextGenerator;
use serde_json::Value;
use tokio::sync::mpsc::UnboundedSender;

use crate::models::task::{Step, StepStatus, Task, TaskStatus};
use planner::{build_planning_prompt, parse_plan, PLANNING_SYSTEM_PROMPT};

/// Total dispatch attempts per step: the first try plus one retry.
pub const MAX_STEP_ATTEMPTS: usize = 2;

#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {
    /// The generation service produced text with no extractable step array.
    #[error("Plan parsing failed: {0}")]
    PlanParse(String),

    /// The generation service itself failed (network, auth, server).
    #[error("Plan generation failed: {0}")]
    Generation(String),

    /// A step exhausted its attempts; the task aborts here.
    #[error("Step '{description}' failed after {attempts} attempts: {error}")]
    StepFailed {
        description: String,
        attempts: usize,
        error: String,
    },
}

pub struct TaskOrchestrator {
    provider: Arc<dyn TextGenerator>,
    registry: Arc<ToolRegistry>,
    /// Injected into steps whose tool declares an `api_key` parameter.
    default_api_key: Option<String>,
    /// Injected into steps whose tool declares a `model` parameter.
    default_model: Option<String>,
    events: Option<UnboundedSender<TaskEvent>>,
}

impl TaskOrchestrator {
    pub fn new(provider: Arc<dyn TextGenerator>, registry: Arc<ToolRegistry>) -> Self {
        Self {
            provider,
            registry,
            default_api_key: None,
            default_model: None,
            events: None,
        }
    }

    /// Attach an event channel. Send failures are ignored; a dropped
    /// receiver never aborts a task.
    pub fn with_events(mut self, events: UnboundedSender<TaskEvent>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn with_default_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.default_api_key = Some(api_key.into());
        self
    }

    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = Some(model.into());
        self
    }

    /// Run one orchestration request to a terminal state.
    ///
    /// Always returns the task record; planning and execution failures are
    /// captured in `task.status` and `task.errors`.
    pub async fn execute_task(&self, prompt: &str, project_path: &str) -> Task {
        let mut task = Task::new(prompt, project_path);
        tracing::info!(task_id = %task.id, prompt, project_path, "task started");
        self.emit(TaskEvent::thought(format!("Planning steps for: {}", prompt)));

        match self.plan(prompt, project_path).await {
            Ok(steps) => {
                task.steps = steps;
                task.status = TaskStatus::Executing;
                self.emit(TaskEvent::thought(format!(
                    "Created plan with {} steps",
                    task.steps.len()
                )));
                self.emit(TaskEvent::progress(0, task.steps.len(), None));
            }
            Err(e) => {
                tracing::warn!(task_id = %task.id, error = %e, "planning failed");
                task.fail(e.to_string());
                self.emit(TaskEvent::error(e.to_string()));
                return task;
            }
        }

        match self.execute_steps(&mut task).await {
            Ok(()) => {
                task.complete();
                let files_created = task.files_created();
                tracing::info!(task_id = %task.id, files_created, "task complete");
                self.emit(TaskEvent::new(TaskEventPayload::Complete {
                    project_path: project_path.to_string(),
                    files_created,
                }));
            }
            Err(e) => {
                tracing::warn!(task_id = %task.id, error = %e, "task failed");
                task.fail(e.to_string());
                self.emit(TaskEvent::error(e.to_string()));
            }
        }
        task
    }

    async fn plan(&self, prompt: &str, project_path: &str) -> Result<Vec<Step>, OrchestratorError> {
        let user_prompt = build_planning_prompt(prompt, project_path, &self.registry.definitions());
        let response = self
            .provider
            .generate(PLANNING_SYSTEM_PROMPT, &user_prompt)
            .await
            .map_err(|e| OrchestratorError::Generation(e.to_string()))?;
        parse_plan(&response)
    }

    /// Strict sequential execution. A step that fails on both attempts
    /// aborts the task; later steps stay `pending`.
    async fn execute_steps(&self, task: &mut Task) -> Result<(), OrchestratorError> {
        let total = task.steps.len();
        let ctx = ToolContext::new(&task.id, &task.project_path);

        for i in 0..total {
            let (description, tool) = {
                let step = &mut task.steps[i];
                step.status = StepStatus::Running;
                (step.description.clone(), step.tool.clone())
            };
            self.emit(TaskEvent::progress(i + 1, total, Some(description.clone())));

            let args = self.resolve_args(&tool, task.steps[i].args.clone(), &task.project_path);
            self.emit(TaskEvent::new(TaskEventPayload::ToolCall {
                tool: tool.clone(),
                args: args.clone(),
            }));

            let mut last_error = String::new();
            let mut succeeded = false;
            for attempt in 1..=MAX_STEP_ATTEMPTS {
                let result = self.registry.execute(&tool, &ctx, args.clone()).await;
                let result_value =
                    serde_json::to_value(&result).unwrap_or(Value::Null);
                task.executed_tools.push(crate::models::task::ToolCallRecord {
                    tool: tool.clone(),
                    args: args.clone(),
                    result: result_value.clone(),
                    timestamp: chrono::Utc::now().timestamp(),
                });
                self.emit(TaskEvent::new(TaskEventPayload::ToolResult {
                    tool: tool.clone(),
                    result: result_value,
                }));

                if result.success {
                    succeeded = true;
                    break;
                }

                last_error = result.error.unwrap_or_else(|| "Unknown error".to_string());
                task.errors.push(last_error.clone());
                if attempt < MAX_STEP_ATTEMPTS {
                    self.emit(TaskEvent::thought(format!("Retrying step: {}", description)));
                }
            }

            if !succeeded {
                task.steps[i].status = StepStatus::Failed;
                return Err(OrchestratorError::StepFailed {
                    description,
                    attempts: MAX_STEP_ATTEMPTS,
                    error: last_error,
                });
            }
            task.steps[i].status = StepStatus::Complete;
        }
        Ok(())
    }

    /// Fill in what the planner habitually leaves out: credential and model
    /// defaults for tools that declare them, project-rooted paths, and a
    /// working directory for command-taking tools.
    fn resolve_args(&self, tool: &str, args: Value, project_path: &str) -> Value {
        let mut map = match args {
            Value::Object(map) => map,
            Value::Null => serde_json::Map::new(),
            other => return other,
        };

        if let Some(schema) = self.registry.get(tool).map(|t| t.parameters_schema()) {
            if schema.has_property("api_key") && !map.contains_key("api_key") {
                if let Some(api_key) = &self.default_api_key {
                    map.insert("api_key".to_string(), Value::String(api_key.clone()));
                }
            }
            if schema.has_property("model") && !map.contains_key("model") {
                if let Some(model) = &self.default_model {
                    map.insert("model".to_string(), Value::String(model.clone()));
                }
            }
            if schema.has_property("command") && !map.contains_key("cwd") {
                map.insert("cwd".to_string(), Value::String(project_path.to_string()));
            }
        }

        if let Some(Value::String(path)) = map.get("path") {
            if std::path::Path::new(path).is_relative() {
                let rooted = std::path::Path::new(project_path).join(path);
                map.insert(
                    "path".to_string(),
                    Value::String(rooted.display().to_string()),
                );
            }
        }

        Value::Object(map)
    }

    fn emit(&self, event: TaskEvent) {
        if let Some(events) = &self.events {
            let _ = events.send(event);
        }
    }
}
