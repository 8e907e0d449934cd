//! Insert-one tool definition.
//!
//! Inserts a single object into a Weaviate collection and returns its id.

use std::sync::Arc;

use tracing::{info, instrument};

use super::common::{COLLECTION_PARAM, resolve_collection};
use crate::domains::storage::StorageConnector;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::handlers::{CallResult, ToolHandler, ToolOutput};
use crate::domains::tools::schema::{ParameterKind, ParameterSchema, ParameterSpec};
use crate::domains::tools::validator::ValidatedArguments;

/// Insert-one tool - writes one object through the storage connector.
pub struct WeaviateInsertOneTool {
    connector: Arc<dyn StorageConnector>,
    default_collection: String,
}

impl WeaviateInsertOneTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "weaviate-insert-one";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Insert an object into Weaviate";

    pub fn new(connector: Arc<dyn StorageConnector>, default_collection: impl Into<String>) -> Self {
        Self {
            connector,
            default_collection: default_collection.into(),
        }
    }
}

#[async_trait::async_trait]
impl ToolHandler for WeaviateInsertOneTool {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        Self::DESCRIPTION
    }

    fn schema(&self) -> ParameterSchema {
        ParameterSchema::new()
            .with(ParameterSpec::optional(
                COLLECTION_PARAM,
                ParameterKind::String,
                "Name of the target collection",
            ))
            .with(ParameterSpec::required(
                "properties",
                ParameterKind::Object,
                "Object properties to insert",
            ))
    }

    #[instrument(skip_all)]
    async fn call(&self, arguments: ValidatedArguments) -> CallResult {
        let collection = resolve_collection(&arguments, &self.default_collection);
        let properties = arguments
            .object("properties")
            .ok_or_else(|| ToolError::internal("validated arguments lack 'properties'"))?;

        info!("Inserting object into {}", collection);

        let inserted = self
            .connector
            .insert_one(&collection, properties)
            .await
            .map_err(|e| ToolError::execution("failed to insert object", e))?;

        Ok(ToolOutput::Text(inserted.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::storage::mock::{RecordedCall, RecordingConnector};
    use crate::domains::tools::validator::validate;
    use serde_json::{Value, json};

    async fn run(tool: &WeaviateInsertOneTool, value: Value) -> CallResult {
        let Value::Object(bag) = value else {
            panic!("expected object")
        };
        let arguments = validate(&tool.schema(), &bag).unwrap();
        tool.call(arguments).await
    }

    #[tokio::test]
    async fn test_default_collection() {
        let connector = Arc::new(RecordingConnector::new().with_insert_id("abc-123"));
        let tool = WeaviateInsertOneTool::new(connector.clone(), "DefaultCollection");

        let result = run(&tool, json!({ "properties": { "a": 1 } })).await.unwrap();
        assert_eq!(result, ToolOutput::text("abc-123"));

        let properties = json!({ "a": 1 }).as_object().cloned().unwrap();
        assert_eq!(
            connector.calls(),
            vec![RecordedCall::Insert {
                collection: "DefaultCollection".to_string(),
                properties,
            }]
        );
    }

    #[tokio::test]
    async fn test_explicit_collection() {
        let connector = Arc::new(RecordingConnector::new());
        let tool = WeaviateInsertOneTool::new(connector.clone(), "DefaultCollection");

        run(&tool, json!({ "collection": "X", "properties": { "a": 1 } }))
            .await
            .unwrap();

        match &connector.calls()[0] {
            RecordedCall::Insert { collection, .. } => assert_eq!(collection, "X"),
            other => panic!("unexpected call: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_connector_failure_is_wrapped() {
        let connector = Arc::new(RecordingConnector::new().failing("connection refused"));
        let tool = WeaviateInsertOneTool::new(connector, "DefaultCollection");

        let err = run(&tool, json!({ "properties": {} })).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to insert object: malformed response: connection refused"
        );
    }
}
