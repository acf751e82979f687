//! Step Planning
//!
//! Turns a natural-language build request into an ordered step plan by
//! prompting the text-generation service and scraping the first bracketed
//! JSON array out of whatever text it returns. Model output is free-form,
//! so extraction failure is an explicit error kind rather than a panic.

use buildforge_core::ToolDefinition;
use serde::Deserialize;
use serde_json::Value;

use crate::models::task::{Step, StepStatus};
use super::OrchestratorError;

pub const PLANNING_SYSTEM_PROMPT: &str = "You are a build planner. Given a \
request and a set of available tools, respond with a JSON array of steps. \
Each step is an object with \"description\" (string), \"tool\" (one of the \
available tool names), and \"args\" (object matching that tool's parameters). \
Respond with the JSON array only, no prose and no code fences.";

/// Wire shape of one planned step as the model emits it.
#[derive(Debug, Deserialize)]
struct PlannedStep {
    description: String,
    tool: String,
    #[serde(default)]
    args: Value,
}

/// User-facing planning prompt embedding the request, the target path, and
/// every registered tool definition.
pub fn build_planning_prompt(
    prompt: &str,
    project_path: &str,
    definitions: &[ToolDefinition],
) -> String {
    let mut out = String::new();
    out.push_str("Request: ");
    out.push_str(prompt);
    out.push_str("\nTarget project path: ");
    out.push_str(project_path);
    out.push_str("\n\nAvailable tools:\n");
    for def in definitions {
        let params = serde_json::to_string(&def.parameters).unwrap_or_default();
        out.push_str(&format!("- {}: {} {}\n", def.name, def.description, params));
    }
    out.push_str("\nProduce the step plan now.");
    out
}

/// Parse the model's response into pending steps.
pub fn parse_plan(response: &str) -> Result<Vec<Step>, OrchestratorError> {
    let span = extract_json_array(response)?;
    let planned: Vec<PlannedStep> = serde_json::from_str(span)
        .map_err(|e| OrchestratorError::PlanParse(format!("invalid step array: {}", e)))?;

    Ok(planned
        .into_iter()
        .map(|step| Step {
            description: step.description,
            tool: step.tool,
            args: if step.args.is_null() {
                Value::Object(Default::default())
            } else {
                step.args
            },
            status: StepStatus::Pending,
        })
        .collect())
}

/// The span from the first `[` to the last `]` in the response.
fn extract_json_array(response: &str) -> Result<&str, OrchestratorError> {
    let start = response.find('[');
    let end = response.rfind(']');
    match (start, end) {
        (Some(start), Some(end)) if start < end => Ok(&response[start..=end]),
        _ => Err(OrchestratorError::PlanParse(
            "response contains no JSON array".to_string(),
        )),
    }
}
