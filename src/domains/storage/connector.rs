//! The storage connector seam.
//!
//! Tools reach the data store only through [`StorageConnector`]. Implementors
//! must be safe to share between concurrent calls.

use serde_json::{Map, Value};

use super::error::ConnectorError;

/// Result of a successful insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertedObject {
    pub id: String,
}

/// Insert and query operations against the backing store.
#[async_trait::async_trait]
pub trait StorageConnector: Send + Sync {
    /// Insert one object into `collection`.
    async fn insert_one(
        &self,
        collection: &str,
        properties: &Map<String, Value>,
    ) -> Result<InsertedObject, ConnectorError>;

    /// Run a hybrid search over `collection`, returning `target_properties`
    /// of each hit rendered as text.
    async fn query(
        &self,
        collection: &str,
        query: &str,
        target_properties: &[String],
    ) -> Result<String, ConnectorError>;
}
