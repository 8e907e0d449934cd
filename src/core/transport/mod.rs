//! Transport layer for the MCP server.
//!
//! Two transports share one [`Dispatcher`](crate::domains::tools::Dispatcher):
//! - **STDIO**: MCP over standard input/output, one call at a time
//! - **HTTP**: plain JSON endpoints (`/health`, `/`, `/tools`, `/call`)
//!
//! Each transport only decodes requests into a tool name plus argument bag
//! and encodes the call outcome back into its own wire shape.

mod config;
mod error;
mod service;

pub mod http;
pub mod stdio;

pub use config::{DEFAULT_HTTP_PORT, HttpConfig, TransportConfig};
pub use error::{TransportError, TransportResult};
pub use service::TransportService;
