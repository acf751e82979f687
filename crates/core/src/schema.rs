//! Tool Parameter Schemas
//!
//! JSON-schema-shaped declarations for tool parameters, plus runtime argument
//! validation. The registry validates arguments against a tool's schema before
//! dispatch, so a tool body never sees a missing required parameter or a
//! mistyped value.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// JSON Schema for tool parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterSchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<HashMap<String, ParameterSchema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<ParameterSchema>>,
}

impl ParameterSchema {
    /// Create a string schema
    pub fn string(description: Option<&str>) -> Self {
        Self {
            schema_type: "string".to_string(),
            description: description.map(|s| s.to_string()),
            properties: None,
            required: None,
            items: None,
        }
    }

    /// Create a number schema
    pub fn number(description: Option<&str>) -> Self {
        Self {
            schema_type: "number".to_string(),
            description: description.map(|s| s.to_string()),
            properties: None,
            required: None,
            items: None,
        }
    }

    /// Create a boolean schema
    pub fn boolean(description: Option<&str>) -> Self {
        Self {
            schema_type: "boolean".to_string(),
            description: description.map(|s| s.to_string()),
            properties: None,
            required: None,
            items: None,
        }
    }

    /// Create an object schema
    pub fn object(
        description: Option<&str>,
        properties: HashMap<String, ParameterSchema>,
        required: Vec<String>,
    ) -> Self {
        Self {
            schema_type: "object".to_string(),
            description: description.map(|s| s.to_string()),
            properties: Some(properties),
            required: Some(required),
            items: None,
        }
    }

    /// Create an array schema
    pub fn array(description: Option<&str>, items: ParameterSchema) -> Self {
        Self {
            schema_type: "array".to_string(),
            description: description.map(|s| s.to_string()),
            properties: None,
            required: None,
            items: Some(Box::new(items)),
        }
    }

    /// Whether this (object) schema declares a property with the given name.
    pub fn has_property(&self, name: &str) -> bool {
        self.properties
            .as_ref()
            .map(|props| props.contains_key(name))
            .unwrap_or(false)
    }

    /// Validate a JSON argument object against this (object) schema.
    ///
    /// Checks two things, in order:
    /// 1. Every `required` property is present in `args`.
    /// 2. Every property present in `args` that is declared in the schema
    ///    matches its declared runtime type.
    ///
    /// Undeclared extra arguments are tolerated. Returns the first specific
    /// violation message, or `Ok(())`.
    pub fn validate_args(&self, args: &Value) -> Result<(), String> {
        let obj = match args {
            Value::Object(map) => map,
            Value::Null => {
                // Treat null as an empty argument object.
                return match self.required.as_deref() {
                    Some([first, ..]) => Err(format!("Missing required parameter: {}", first)),
                    _ => Ok(()),
                };
            }
            other => {
                return Err(format!(
                    "Arguments must be an object, got {}",
                    json_type_name(other)
                ))
            }
        };

        if let Some(required) = &self.required {
            for name in required {
                if !obj.contains_key(name) {
                    return Err(format!("Missing required parameter: {}", name));
                }
            }
        }

        if let Some(properties) = &self.properties {
            for (name, value) in obj {
                if let Some(prop) = properties.get(name) {
                    if !type_matches(&prop.schema_type, value) {
                        return Err(format!(
                            "Parameter '{}' must be of type {}, got {}",
                            name,
                            prop.schema_type,
                            json_type_name(value)
                        ));
                    }
                }
            }
        }

        Ok(())
    }
}

/// Check a JSON value against a declared schema type name.
fn type_matches(schema_type: &str, value: &Value) -> bool {
    match schema_type {
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64(),
        "boolean" => value.is_boolean(),
        "array" => value.is_array(),
        "object" => value.is_object(),
        // Unknown declared types are not enforced.
        _ => true,
    }
}

/// Human-readable name for a JSON value's runtime type.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
