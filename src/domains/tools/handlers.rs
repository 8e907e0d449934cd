//! Tool handlers module.
//!
//! A tool is anything implementing [`ToolHandler`]: it declares its name,
//! description and parameter schema, and turns validated arguments into a
//! [`CallResult`]. Handlers never see raw transport payloads.

use rmcp::model::{CallToolResult, Content};
use serde_json::Value;

use super::error::ToolError;
use super::schema::ParameterSchema;
use super::validator::ValidatedArguments;

/// Transport-neutral outcome of a tool call.
pub type CallResult = Result<ToolOutput, ToolError>;

/// Successful payload of a tool call.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    Text(String),
    Json(Value),
}

impl ToolOutput {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Payload as a JSON value (text becomes a JSON string).
    pub fn into_json(self) -> Value {
        match self {
            Self::Text(text) => Value::String(text),
            Self::Json(value) => value,
        }
    }

    /// Payload as MCP content.
    pub fn into_content(self) -> Content {
        match self {
            Self::Text(text) => Content::text(text),
            Self::Json(value) => Content::text(value.to_string()),
        }
    }
}

/// Encode a call outcome as an MCP tool result.
///
/// Failures become error results carrying the message as text, so the
/// protocol never sees a transport-level error for a failed tool.
pub fn into_call_tool_result(result: CallResult) -> CallToolResult {
    match result {
        Ok(output) => CallToolResult::success(vec![output.into_content()]),
        Err(e) => CallToolResult::error(vec![Content::text(e.to_string())]),
    }
}

/// Trait implemented by every tool.
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync {
    /// Get the name of this tool.
    fn name(&self) -> &str;

    /// Get the description of this tool.
    fn description(&self) -> &str;

    /// Parameters accepted by this tool.
    fn schema(&self) -> ParameterSchema;

    /// Execute the tool with arguments already validated against [`Self::schema`].
    async fn call(&self, arguments: ValidatedArguments) -> CallResult;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;
    use serde_json::json;

    fn text_of(result: &CallToolResult) -> &str {
        match &result.content[0].raw {
            RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        }
    }

    #[test]
    fn test_output_into_json() {
        assert_eq!(ToolOutput::text("abc-123").into_json(), json!("abc-123"));
        assert_eq!(
            ToolOutput::Json(json!({ "n": 1 })).into_json(),
            json!({ "n": 1 })
        );
    }

    #[test]
    fn test_success_result() {
        let result = into_call_tool_result(Ok(ToolOutput::text("abc-123")));
        assert!(!result.is_error.unwrap_or(false));
        assert_eq!(text_of(&result), "abc-123");
    }

    #[test]
    fn test_error_result_carries_message() {
        let result = into_call_tool_result(Err(ToolError::not_found("nope")));
        assert!(result.is_error.unwrap_or(false));
        assert_eq!(text_of(&result), "unknown tool: nope");
    }
}
