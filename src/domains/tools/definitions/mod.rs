//! Tool definitions module.
//!
//! Each tool lives in its own file; [`build_tool_registry`] registers the
//! built-in set at startup.

pub mod weaviate;

use std::sync::Arc;

pub use weaviate::{WeaviateInsertOneTool, WeaviateQueryTool};

use super::error::RegistryError;
use super::registry::{ToolDefinition, ToolRegistry};
use crate::domains::storage::StorageConnector;

/// Build the registry with all built-in tools.
///
/// `default_collection` is used by every tool whose caller omits a
/// collection.
pub fn build_tool_registry(
    default_collection: &str,
    connector: Arc<dyn StorageConnector>,
) -> Result<ToolRegistry, RegistryError> {
    let mut registry = ToolRegistry::new();
    registry.register(ToolDefinition::new(WeaviateInsertOneTool::new(
        connector.clone(),
        default_collection,
    )))?;
    registry.register(ToolDefinition::new(WeaviateQueryTool::new(
        connector,
        default_collection,
    )))?;
    Ok(registry)
}
