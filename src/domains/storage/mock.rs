//! In-memory connector that records every call, for tests.

use std::sync::Mutex;
use std::time::Duration;

use serde_json::{Map, Value};

use super::connector::{InsertedObject, StorageConnector};
use super::error::ConnectorError;

/// A call observed by [`RecordingConnector`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Insert {
        collection: String,
        properties: Map<String, Value>,
    },
    Query {
        collection: String,
        query: String,
        target_properties: Vec<String>,
    },
}

/// Records calls and answers with canned responses.
///
/// Unless configured, inserts answer with `"<collection>:<properties json>"`
/// and queries with `"<collection>:<query>"`.
#[derive(Default)]
pub struct RecordingConnector {
    calls: Mutex<Vec<RecordedCall>>,
    insert_id: Option<String>,
    failure: Option<String>,
    delay: Option<Duration>,
}

impl RecordingConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_insert_id(mut self, id: impl Into<String>) -> Self {
        self.insert_id = Some(id.into());
        self
    }

    /// Fail every call with a `MalformedResponse` carrying `message`.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    async fn respond<T>(&self, call: RecordedCall, ok: T) -> Result<T, ConnectorError> {
        self.calls.lock().unwrap().push(call);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.failure {
            Some(message) => Err(ConnectorError::malformed(message.clone())),
            None => Ok(ok),
        }
    }
}

#[async_trait::async_trait]
impl StorageConnector for RecordingConnector {
    async fn insert_one(
        &self,
        collection: &str,
        properties: &Map<String, Value>,
    ) -> Result<InsertedObject, ConnectorError> {
        let id = self.insert_id.clone().unwrap_or_else(|| {
            format!("{}:{}", collection, Value::Object(properties.clone()))
        });
        let call = RecordedCall::Insert {
            collection: collection.to_string(),
            properties: properties.clone(),
        };
        self.respond(call, InsertedObject { id }).await
    }

    async fn query(
        &self,
        collection: &str,
        query: &str,
        target_properties: &[String],
    ) -> Result<String, ConnectorError> {
        let call = RecordedCall::Query {
            collection: collection.to_string(),
            query: query.to_string(),
            target_properties: target_properties.to_vec(),
        };
        self.respond(call, format!("{}:{}", collection, query)).await
    }
}
