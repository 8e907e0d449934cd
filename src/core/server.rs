//! MCP Server implementation and lifecycle management.
//!
//! [`McpServer`] owns the [`Dispatcher`] and speaks the MCP protocol on top
//! of it: `tools/list` is answered from the registry and `tools/call` is
//! forwarded to the dispatcher. The HTTP transport uses the same server
//! handle, so both transports see one registry.

use std::sync::Arc;
use std::time::Duration;

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, model::*, service::RequestContext,
};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use super::config::Config;
use crate::domains::tools::{
    ArgumentBag, CallContext, Dispatcher, ToolDescriptor, ToolRegistry, into_call_tool_result,
};

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Transport-neutral tool dispatcher.
    dispatcher: Dispatcher,

    /// Keeps protocol tool calls from overlapping. Waiters are served FIFO.
    call_gate: Arc<Mutex<()>>,
}

impl McpServer {
    /// Create a new MCP server over a fully built registry.
    pub fn new(config: Config, registry: ToolRegistry) -> Self {
        let timeout = Duration::from_secs(config.tools.call_timeout_secs);
        Self {
            config: Arc::new(config),
            dispatcher: Dispatcher::new(Arc::new(registry), timeout),
            call_gate: Arc::new(Mutex::new(())),
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// The dispatcher every transport calls into.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// The tool registry.
    pub fn registry(&self) -> &ToolRegistry {
        self.dispatcher.registry()
    }

    /// All tools as MCP tool models.
    pub fn mcp_tools(&self) -> Vec<Tool> {
        self.registry().list().map(to_mcp_tool).collect()
    }

    /// Run one protocol tool call; no two gated calls overlap.
    pub(crate) async fn call_gated(
        &self,
        name: &str,
        arguments: ArgumentBag,
        cancel: CancellationToken,
    ) -> CallToolResult {
        let _turn = self.call_gate.lock().await;
        let ctx = CallContext::new(cancel);
        into_call_tool_result(self.dispatcher.dispatch(name, arguments, &ctx).await)
    }
}

/// Convert a registry entry to an MCP tool model.
fn to_mcp_tool(descriptor: ToolDescriptor<'_>) -> Tool {
    Tool {
        name: descriptor.name.to_string().into(),
        description: Some(descriptor.description.to_string().into()),
        input_schema: Arc::new(descriptor.schema.to_json_schema()),
        annotations: None,
        output_schema: None,
        icons: None,
        meta: None,
        title: None,
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Insert objects into Weaviate and retrieve them with hybrid search.".to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.name().to_string(),
                version: self.version().to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult::with_all_items(self.mcp_tools()))
    }

    #[instrument(skip_all, fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        info!("Calling tool: {}", request.name);
        let arguments = request.arguments.unwrap_or_default();
        Ok(self
            .call_gated(&request.name, arguments, context.ct.clone())
            .await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::storage::mock::RecordingConnector;
    use crate::domains::tools::build_tool_registry;
    use serde_json::{Value, json};
    use std::time::Instant;

    fn server_with(connector: Arc<RecordingConnector>) -> McpServer {
        let registry = build_tool_registry("DefaultCollection", connector).unwrap();
        McpServer::new(Config::default(), registry)
    }

    fn test_server() -> McpServer {
        server_with(Arc::new(RecordingConnector::new()))
    }

    fn bag(value: Value) -> ArgumentBag {
        match value {
            Value::Object(map) => map,
            _ => panic!("test bag must be an object"),
        }
    }

    fn text_of(result: &CallToolResult) -> &str {
        match &result.content[0].raw {
            RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        }
    }

    #[test]
    fn test_mcp_tools_match_registry() {
        let server = test_server();
        let tools = server.mcp_tools();
        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert_eq!(names, server.registry().tool_names());
    }

    #[test]
    fn test_mcp_tool_schema() {
        let server = test_server();
        let tools = server.mcp_tools();
        let insert = tools
            .iter()
            .find(|t| t.name == "weaviate-insert-one")
            .unwrap();

        assert_eq!(insert.input_schema["type"], "object");
        assert_eq!(insert.input_schema["properties"]["properties"]["type"], "object");
        assert_eq!(insert.input_schema["required"], serde_json::json!(["properties"]));
    }

    #[test]
    fn test_server_info_advertises_tools() {
        let info = test_server().get_info();
        assert!(info.capabilities.tools.is_some());
        assert_eq!(info.server_info.name, "Weaviate MCP Server");
    }

    #[tokio::test]
    async fn test_gated_calls_do_not_overlap() {
        let delay = Duration::from_millis(100);
        let connector = Arc::new(RecordingConnector::new().with_delay(delay));
        let server = server_with(connector.clone());

        let started = Instant::now();
        let (first, second) = tokio::join!(
            server.call_gated(
                "weaviate-insert-one",
                bag(json!({ "properties": { "n": 1 } })),
                CancellationToken::new(),
            ),
            server.call_gated(
                "weaviate-insert-one",
                bag(json!({ "properties": { "n": 2 } })),
                CancellationToken::new(),
            ),
        );
        assert!(started.elapsed() >= delay * 2);

        assert!(!first.is_error.unwrap_or(false));
        assert!(!second.is_error.unwrap_or(false));
        assert_eq!(connector.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_gated_unknown_tool_is_error_result() {
        let result = test_server()
            .call_gated("nope", ArgumentBag::new(), CancellationToken::new())
            .await;

        assert_eq!(result.is_error, Some(true));
        assert_eq!(text_of(&result), "unknown tool: nope");
    }

    #[tokio::test]
    async fn test_gated_validation_error_is_error_result() {
        let result = test_server()
            .call_gated(
                "weaviate-query",
                bag(json!({ "query": "q", "targetProperties": [1] })),
                CancellationToken::new(),
            )
            .await;

        assert_eq!(result.is_error, Some(true));
        assert_eq!(text_of(&result), "targetProperties must contain only strings");
    }
}
