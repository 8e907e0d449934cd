//! Dispatcher - the single entry point for tool calls from any transport.
//!
//! `dispatch(name, arguments, ctx)` resolves the tool, validates the
//! arguments, runs the handler and returns a [`CallResult`]. Transports only
//! encode and decode around it; no transport type crosses this boundary.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use super::error::ToolError;
use super::handlers::CallResult;
use super::registry::ToolRegistry;
use super::validator::{ArgumentBag, validate};

/// Per-call context supplied by the transport.
///
/// Cancelling the token abandons the in-flight handler; the optional timeout
/// overrides the dispatcher's default deadline.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    cancel: CancellationToken,
    timeout: Option<Duration>,
}

impl CallContext {
    pub fn new(cancel: CancellationToken) -> Self {
        Self {
            cancel,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }
}

/// Routes tool calls to their handlers.
///
/// Holds only the read-only registry, so clones can be used from many tasks
/// at once.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
    call_timeout: Duration,
}

impl Dispatcher {
    pub fn new(registry: Arc<ToolRegistry>, call_timeout: Duration) -> Self {
        Self {
            registry,
            call_timeout,
        }
    }

    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    /// Dispatch a tool call.
    #[instrument(skip(self, arguments, ctx), fields(tool = %name))]
    pub async fn dispatch(&self, name: &str, arguments: ArgumentBag, ctx: &CallContext) -> CallResult {
        let tool = match self.registry.lookup(name) {
            Ok(tool) => tool,
            Err(e) => {
                warn!("Unknown tool requested: {}", name);
                return Err(e);
            }
        };

        let arguments = validate(tool.schema(), &arguments).map_err(|e| {
            warn!("Invalid arguments for {}: {}", name, e);
            ToolError::from(e)
        })?;

        let deadline = ctx.timeout.unwrap_or(self.call_timeout);
        let call = AssertUnwindSafe(tool.handler().call(arguments)).catch_unwind();

        let result = tokio::select! {
            biased;
            _ = ctx.cancel.cancelled() => Err(ToolError::Cancelled(name.to_string())),
            outcome = tokio::time::timeout(deadline, call) => match outcome {
                Ok(Ok(result)) => result,
                Ok(Err(_panic)) => Err(ToolError::internal(format!("tool '{}' panicked", name))),
                Err(_elapsed) => Err(ToolError::Timeout {
                    tool: name.to_string(),
                    after: deadline,
                }),
            },
        };

        match &result {
            Ok(_) => info!("Tool {} completed", name),
            Err(e) => warn!("Tool {} failed: {}", name, e),
        }
        result
    }
}
