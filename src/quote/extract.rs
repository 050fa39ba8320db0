//! Transcript analysis via LLM function calling.
//!
//! The model is forced to call a single analysis function whose arguments
//! carry the structured task/material breakdown. Malformed or missing fields
//! in the returned arguments are explicit errors here, not downstream
//! surprises.

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::llm::{ChatMessage, ChatResponse, LlmClient, Role, ToolDefinition};

const ANALYZER_FUNCTION: &str = "analyze_construction_request";

const SYSTEM_PROMPT: &str = "You are a construction task analyzer. Extract tasks and required \
     materials from the transcript. For each material, estimate the quantity \
     needed based on industry standards.";

/// Structured analysis of a transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptAnalysis {
    pub tasks: Vec<ExtractedTask>,
    pub is_renovation: bool,
}

/// A task as extracted by the model, before resolution and pricing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedTask {
    pub label: String,
    #[serde(default)]
    pub materials: Vec<ExtractedMaterial>,
    pub estimated_hours: f64,
}

/// A material requirement as extracted by the model. Quantity and unit are
/// passed through unvalidated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedMaterial {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

/// Analyze a transcript into tasks and materials.
pub async fn extract(
    llm: &dyn LlmClient,
    model: &str,
    transcript: &str,
) -> anyhow::Result<TranscriptAnalysis> {
    let messages = [
        ChatMessage::new(Role::System, SYSTEM_PROMPT),
        ChatMessage::new(Role::User, transcript),
    ];
    let tools = [analyzer_tool()];

    let response = llm
        .chat_completion(model, &messages, Some(&tools))
        .await
        .context("Transcript analysis request failed")?;

    parse_analysis(&response)
}

/// Tool definition for the analysis function.
fn analyzer_tool() -> ToolDefinition {
    ToolDefinition::function(
        ANALYZER_FUNCTION,
        "Analyze a construction request transcript into tasks and materials",
        serde_json::json!({
            "type": "object",
            "properties": {
                "tasks": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "label": { "type": "string" },
                            "materials": {
                                "type": "array",
                                "items": {
                                    "type": "object",
                                    "properties": {
                                        "name": { "type": "string" },
                                        "quantity": { "type": "number" },
                                        "unit": { "type": "string" }
                                    },
                                    "required": ["name", "quantity", "unit"]
                                }
                            },
                            "estimated_hours": { "type": "number" }
                        },
                        "required": ["label", "materials", "estimated_hours"]
                    }
                },
                "is_renovation": { "type": "boolean" }
            },
            "required": ["tasks", "is_renovation"]
        }),
    )
}

/// Pull the analysis out of the model response.
pub fn parse_analysis(response: &ChatResponse) -> anyhow::Result<TranscriptAnalysis> {
    let call = response
        .tool_calls
        .as_ref()
        .and_then(|calls| {
            calls
                .iter()
                .find(|c| c.function.name == ANALYZER_FUNCTION)
        })
        .ok_or_else(|| anyhow::anyhow!("Model returned no {} call", ANALYZER_FUNCTION))?;

    serde_json::from_str(&call.function.arguments)
        .with_context(|| format!("Malformed {} arguments", ANALYZER_FUNCTION))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{FunctionCall, ToolCall};

    fn response_with_arguments(arguments: &str) -> ChatResponse {
        ChatResponse {
            content: None,
            tool_calls: Some(vec![ToolCall {
                id: "call_1".to_string(),
                call_type: "function".to_string(),
                function: FunctionCall {
                    name: ANALYZER_FUNCTION.to_string(),
                    arguments: arguments.to_string(),
                },
            }]),
            finish_reason: Some("tool_calls".to_string()),
            usage: None,
            model: None,
        }
    }

    #[test]
    fn test_parse_valid_analysis() {
        let response = response_with_arguments(
            r#"{
                "tasks": [{
                    "label": "Install bathroom tile",
                    "materials": [{"name": "tile", "quantity": 10, "unit": "m2"}],
                    "estimated_hours": 6
                }],
                "is_renovation": true
            }"#,
        );

        let analysis = parse_analysis(&response).unwrap();
        assert!(analysis.is_renovation);
        assert_eq!(analysis.tasks.len(), 1);
        assert_eq!(analysis.tasks[0].label, "Install bathroom tile");
        assert_eq!(analysis.tasks[0].materials[0].quantity, 10.0);
    }

    #[test]
    fn test_parse_rejects_missing_tool_call() {
        let response = ChatResponse {
            content: Some("I could not analyze that.".to_string()),
            tool_calls: None,
            finish_reason: Some("stop".to_string()),
            usage: None,
            model: None,
        };
        assert!(parse_analysis(&response).is_err());
    }

    #[test]
    fn test_parse_rejects_malformed_arguments() {
        let response = response_with_arguments(r#"{"tasks": "not an array"}"#);
        assert!(parse_analysis(&response).is_err());
    }

    #[test]
    fn test_parse_rejects_missing_renovation_flag() {
        let response = response_with_arguments(r#"{"tasks": []}"#);
        assert!(parse_analysis(&response).is_err());
    }

    #[test]
    fn test_missing_materials_defaults_to_empty() {
        let response = response_with_arguments(
            r#"{
                "tasks": [{"label": "Demolition", "estimated_hours": 4}],
                "is_renovation": false
            }"#,
        );
        let analysis = parse_analysis(&response).unwrap();
        assert!(analysis.tasks[0].materials.is_empty());
    }
}
