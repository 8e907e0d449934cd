//! Tool Registry - central registration and lookup for all tools.
//!
//! The registry is filled once at startup through [`ToolRegistry::register`]
//! and is read-only afterwards. It is shared behind an `Arc` and read
//! concurrently without locking.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use super::error::{RegistryError, ToolError};
use super::handlers::ToolHandler;
use super::schema::ParameterSchema;

// ============================================================================
// Tool Definition
// ============================================================================

/// A registered tool: its metadata plus the handler that runs it.
///
/// Name, description and schema are captured once when the definition is
/// created and never change.
#[derive(Clone)]
pub struct ToolDefinition {
    name: String,
    description: String,
    schema: ParameterSchema,
    handler: Arc<dyn ToolHandler>,
}

impl ToolDefinition {
    pub fn new(handler: impl ToolHandler + 'static) -> Self {
        let handler: Arc<dyn ToolHandler> = Arc::new(handler);
        Self {
            name: handler.name().to_string(),
            description: handler.description().to_string(),
            schema: handler.schema(),
            handler,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn schema(&self) -> &ParameterSchema {
        &self.schema
    }

    pub fn handler(&self) -> &Arc<dyn ToolHandler> {
        &self.handler
    }
}

impl std::fmt::Debug for ToolDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDefinition")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

/// Introspection view of a registered tool.
#[derive(Debug, Clone, Copy)]
pub struct ToolDescriptor<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub schema: &'a ParameterSchema,
}

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - maps tool names to their definitions.
///
/// Listing preserves registration order.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: Vec<ToolDefinition>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool definition.
    ///
    /// Fails if the name is taken or the schema repeats a parameter name.
    pub fn register(&mut self, definition: ToolDefinition) -> Result<(), RegistryError> {
        if self.index.contains_key(definition.name()) {
            return Err(RegistryError::DuplicateTool(definition.name().to_string()));
        }
        if let Some(parameter) = definition.schema().duplicate_name() {
            return Err(RegistryError::DuplicateParameter {
                tool: definition.name().to_string(),
                parameter: parameter.to_string(),
            });
        }

        info!("Registering tool: {}", definition.name());
        self.index
            .insert(definition.name().to_string(), self.tools.len());
        self.tools.push(definition);
        Ok(())
    }

    /// Look up a tool by name.
    pub fn lookup(&self, name: &str) -> Result<&ToolDefinition, ToolError> {
        self.index
            .get(name)
            .map(|&i| &self.tools[i])
            .ok_or_else(|| ToolError::not_found(name))
    }

    /// Enumerate registered tools.
    ///
    /// The iterator is lazy and can be cloned to restart from the beginning.
    pub fn list(&self) -> impl Iterator<Item = ToolDescriptor<'_>> + Clone + '_ {
        self.tools.iter().map(|t| ToolDescriptor {
            name: t.name(),
            description: t.description(),
            schema: t.schema(),
        })
    }

    /// Get all tool names in registration order.
    pub fn tool_names(&self) -> Vec<&str> {
        self.list().map(|d| d.name).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
