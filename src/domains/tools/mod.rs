//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//!
//! ## Architecture
//!
//! - `schema.rs` - Parameter schemas declared by each tool
//! - `validator.rs` - Checks raw argument bags against a schema
//! - `registry.rs` - Tool definitions and the name → tool registry
//! - `dispatcher.rs` - Transport-neutral entry point for tool calls
//! - `handlers.rs` - The `ToolHandler` trait and call outcomes
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` implementing `ToolHandler`
//! 2. Register it in `definitions::build_tool_registry`
//!
//! Both transports pick it up from the registry; neither needs changes.

pub mod definitions;
mod dispatcher;
mod error;
mod handlers;
mod registry;
mod schema;
mod validator;

pub use definitions::build_tool_registry;
pub use dispatcher::{CallContext, Dispatcher};
pub use error::{RegistryError, ToolError, ValidationError};
pub use handlers::{CallResult, ToolHandler, ToolOutput, into_call_tool_result};
pub use registry::{ToolDefinition, ToolDescriptor, ToolRegistry};
pub use schema::{ParameterKind, ParameterSchema, ParameterSpec};
pub use validator::{ArgValue, ArgumentBag, ValidatedArguments, validate};
