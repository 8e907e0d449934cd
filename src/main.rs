//! Weaviate MCP Server Entry Point
//!
//! Loads configuration, initializes logging, connects to Weaviate and starts
//! the configured transport.

use std::sync::Arc;

use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use weaviate_mcp_server::core::{Config, McpServer, TransportService};
use weaviate_mcp_server::domains::storage::WeaviateConnector;
use weaviate_mcp_server::domains::tools::build_tool_registry;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment
    let config = Config::from_env();

    // Initialize logging
    init_logging(&config.logging.level);

    info!("Starting {} v{}", config.server.name, config.server.version);
    config.validate()?;

    let connector = WeaviateConnector::new(&config.weaviate)?;
    info!("Weaviate endpoint: {}", connector.base_url());

    let registry = build_tool_registry(&config.tools.default_collection, Arc::new(connector))?;
    info!("Registered tools: {}", registry.tool_names().join(", "));

    let server = McpServer::new(config.clone(), registry);

    // Create and run the transport service
    let transport = TransportService::new(config.transport);
    transport.run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs go to stderr so they never mix with stdio protocol frames.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
