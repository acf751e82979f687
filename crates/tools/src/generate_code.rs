//! Generate Code Tool
//!
//! Produces code via the text-generation collaborator. The tool carries its
//! own `TextGenerator` so planner-resolved `model`/`api_key` arguments are
//! advisory; a missing generator configuration is a failed result, not an
//! error.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

use buildforge_core::{ParameterSchema, Tool, ToolContext, ToolResult};
use buildforge_llm::TextGenerator;

const CODEGEN_SYSTEM_PROMPT: &str = "You are an expert software engineer. \
Generate only the requested code with no surrounding explanation. \
If a language is specified, write idiomatic code for that language.";

/// Generate code tool — delegates to a `TextGenerator`.
pub struct GenerateCodeTool {
    generator: Arc<dyn TextGenerator>,
}

impl GenerateCodeTool {
    /// Create the tool around a configured generator.
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }
}

/// Strip a single fenced code block if the whole response is one.
///
/// Models frequently wrap output in ```lang fences even when asked not to;
/// the fence language tag, if present, wins over the requested language.
fn unwrap_code_fence(text: &str) -> (String, Option<String>) {
    let trimmed = text.trim();
    if !trimmed.starts_with("```") {
        return (trimmed.to_string(), None);
    }
    let Some(rest) = trimmed.strip_prefix("```") else {
        return (trimmed.to_string(), None);
    };
    let Some(newline) = rest.find('\n') else {
        return (trimmed.to_string(), None);
    };
    let tag = rest[..newline].trim();
    let body = &rest[newline + 1..];
    let Some(body) = body.strip_suffix("```") else {
        return (trimmed.to_string(), None);
    };
    let language = if tag.is_empty() {
        None
    } else {
        Some(tag.to_string())
    };
    (body.trim_end().to_string(), language)
}

#[async_trait]
impl Tool for GenerateCodeTool {
    fn name(&self) -> &str {
        "generate_code"
    }

    fn description(&self) -> &str {
        "Generate source code for a prompt using the configured model. Returns the code and the language it was written in."
    }

    fn parameters_schema(&self) -> ParameterSchema {
        let mut properties = HashMap::new();
        properties.insert(
            "prompt".to_string(),
            ParameterSchema::string(Some("What code to generate")),
        );
        properties.insert(
            "language".to_string(),
            ParameterSchema::string(Some("Target language hint")),
        );
        properties.insert(
            "model".to_string(),
            ParameterSchema::string(Some("Model identifier override")),
        );
        properties.insert(
            "api_key".to_string(),
            ParameterSchema::string(Some("API key override")),
        );
        ParameterSchema::object(
            Some("Generate code parameters"),
            properties,
            vec!["prompt".to_string()],
        )
    }

    async fn execute(&self, _ctx: &ToolContext, args: Value) -> ToolResult {
        let prompt = args
            .get("prompt")
            .and_then(|v| v.as_str())
            .unwrap_or_default();
        let language = args.get("language").and_then(|v| v.as_str());

        let user_prompt = match language {
            Some(lang) => format!("Language: {}\n\n{}", lang, prompt),
            None => prompt.to_string(),
        };

        match self
            .generator
            .generate(CODEGEN_SYSTEM_PROMPT, &user_prompt)
            .await
        {
            Ok(text) => {
                let (code, fenced_language) = unwrap_code_fence(&text);
                // Rough token estimate, enough for usage bookkeeping.
                let tokens = code.split_whitespace().count();
                ToolResult::ok(json!({
                    "code": code,
                    "language": fenced_language
                        .or_else(|| language.map(String::from))
                        .unwrap_or_else(|| "plaintext".to_string()),
                    "tokens": tokens,
                }))
            }
            Err(e) => ToolResult::err(format!("Code generation failed: {}", e)),
        }
    }
}
