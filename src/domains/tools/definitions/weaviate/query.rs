//! Query tool definition.
//!
//! Runs a hybrid search over a Weaviate collection and returns the requested
//! properties of each hit.

use std::sync::Arc;

use tracing::{info, instrument};

use super::common::{COLLECTION_PARAM, resolve_collection};
use crate::domains::storage::StorageConnector;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::handlers::{CallResult, ToolHandler, ToolOutput};
use crate::domains::tools::schema::{ParameterKind, ParameterSchema, ParameterSpec};
use crate::domains::tools::validator::ValidatedArguments;

/// Query tool - hybrid search through the storage connector.
pub struct WeaviateQueryTool {
    connector: Arc<dyn StorageConnector>,
    default_collection: String,
}

impl WeaviateQueryTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "weaviate-query";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Retrieve objects from Weaviate with hybrid search";

    pub fn new(connector: Arc<dyn StorageConnector>, default_collection: impl Into<String>) -> Self {
        Self {
            connector,
            default_collection: default_collection.into(),
        }
    }
}

#[async_trait::async_trait]
impl ToolHandler for WeaviateQueryTool {
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
                "query",
                ParameterKind::String,
                "Query data within Weaviate",
            ))
            .with(ParameterSpec::required(
                "targetProperties",
                ParameterKind::StringArray,
                "Properties to return with the query",
            ))
    }

    #[instrument(skip_all)]
    async fn call(&self, arguments: ValidatedArguments) -> CallResult {
        let collection = resolve_collection(&arguments, &self.default_collection);
        let (Some(query), Some(target_properties)) =
            (arguments.str("query"), arguments.string_list("targetProperties"))
        else {
            return Err(ToolError::internal(
                "validated arguments lack 'query' or 'targetProperties'",
            ));
        };

        info!("Querying {} for {:?}", collection, query);

        let rendered = self
            .connector
            .query(&collection, query, target_properties)
            .await
            .map_err(|e| ToolError::execution("failed to process query", e))?;

        Ok(ToolOutput::Text(rendered))
    }
}
