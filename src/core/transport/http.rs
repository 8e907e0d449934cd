//! HTTP transport implementation.
//!
//! Plain JSON endpoints for platform deployments:
//! - `GET /health` - liveness probe
//! - `GET /` - service descriptor
//! - `GET /tools` - registered tools and their parameter schemas
//! - `POST /call` - invoke a tool with `{"tool": ..., "arguments": {...}}`
//!
//! Every request runs on its own task; the only shared state is the
//! read-only registry and the storage connector behind it.

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get},
};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, instrument, warn};

use super::{TransportError, TransportResult, config::HttpConfig};
use crate::core::McpServer;
use crate::domains::tools::{ArgumentBag, CallContext, ToolError};

/// Service identifier reported by the health endpoint.
pub const SERVICE_ID: &str = "weaviate-mcp-server";

/// Routes advertised by the root descriptor.
const ENDPOINTS: [&str; 3] = ["/health", "/tools", "/call"];

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// Body of `POST /call`.
#[derive(Debug, Deserialize)]
pub struct CallRequest {
    pub tool: String,
    #[serde(default)]
    pub arguments: Option<ArgumentBag>,
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    server: McpServer,
}

/// Rejections produced by the HTTP adapter.
#[derive(Debug)]
pub enum ApiError {
    /// `/call` was hit with something other than POST.
    MethodNotAllowed,
    /// The request body was not a valid call request.
    InvalidJson(serde_json::Error),
    /// The dispatcher returned a failure.
    Tool(ToolError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::MethodNotAllowed => {
                (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed").into_response()
            }
            Self::InvalidJson(e) => {
                (StatusCode::BAD_REQUEST, format!("Invalid JSON: {}", e)).into_response()
            }
            Self::Tool(e) if e.is_not_found() => {
                (StatusCode::BAD_REQUEST, e.to_string()).into_response()
            }
            Self::Tool(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
        }
    }
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Run the HTTP transport until Ctrl-C.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();
        let app = build_router(server, self.config.enable_cors);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!("Ready - listening on {}", addr);
        info!("  → Health: GET /health");
        info!("  → Tools:  GET /tools");
        info!("  → Call:   POST /call");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("HTTP transport finished");
        Ok(())
    }
}

/// Build the HTTP router.
pub fn build_router(server: McpServer, enable_cors: bool) -> Router {
    let state = AppState { server };

    let mut app = Router::new()
        .route("/health", get(health_check))
        .route("/", get(root_handler))
        .route("/tools", get(list_tools))
        .route("/call", any(call_tool))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": SERVICE_ID
    }))
}

/// Root handler - describes the service.
async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "name": state.server.name(),
        "version": state.server.version(),
        "endpoints": ENDPOINTS,
        "tools": state.server.registry().tool_names()
    }))
}

/// List registered tools with their parameter schemas.
async fn list_tools(State(state): State<AppState>) -> impl IntoResponse {
    let tools: Vec<_> = state
        .server
        .registry()
        .list()
        .map(|t| {
            serde_json::json!({
                "name": t.name,
                "description": t.description,
                "parameters": t.schema.to_json_schema()
            })
        })
        .collect();

    Json(serde_json::json!({ "tools": tools }))
}

/// Invoke a tool.
///
/// The cancellation token is cancelled when this future is dropped, which
/// happens when the client disconnects mid-call.
#[instrument(skip_all)]
async fn call_tool(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> Result<Response, ApiError> {
    if method != Method::POST {
        warn!("Rejected {} /call", method);
        return Err(ApiError::MethodNotAllowed);
    }

    let request: CallRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!("Invalid call body: {}", e);
        ApiError::InvalidJson(e)
    })?;
    info!("HTTP call for tool: {}", request.tool);

    let cancel = CancellationToken::new();
    let _cancel_on_drop = cancel.clone().drop_guard();
    let ctx = CallContext::new(cancel);

    let output = state
        .server
        .dispatcher()
        .dispatch(&request.tool, request.arguments.unwrap_or_default(), &ctx)
        .await
        .map_err(ApiError::Tool)?;

    Ok((StatusCode::OK, Json(output.into_json())).into_response())
}
