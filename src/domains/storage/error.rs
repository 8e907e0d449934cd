//! Storage connector error types.

use thiserror::Error;

/// Errors reported by a storage connector.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// The request could not be sent or the response could not be read.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("weaviate returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The GraphQL endpoint reported errors.
    #[error("query errors: {0}")]
    Graphql(String),

    /// A collection or property name is not a valid identifier.
    #[error("invalid {kind} name '{value}'")]
    InvalidIdentifier { kind: &'static str, value: String },

    /// The backend answered with an unexpected payload.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl ConnectorError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }
}
