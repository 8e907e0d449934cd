//! Weaviate MCP Server Library
//!
//! Exposes a small set of Weaviate operations as MCP tools, reachable over
//! the stdio MCP protocol or a plain HTTP JSON API.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP handler and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: tool registry, argument validation and the dispatcher
//!   - **storage**: the storage connector and its Weaviate implementation
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use weaviate_mcp_server::core::{Config, McpServer, TransportService};
//! use weaviate_mcp_server::domains::storage::WeaviateConnector;
//! use weaviate_mcp_server::domains::tools::build_tool_registry;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let connector = WeaviateConnector::new(&config.weaviate)?;
//!     let registry = build_tool_registry(&config.tools.default_collection, Arc::new(connector))?;
//!     let server = McpServer::new(config.clone(), registry);
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
