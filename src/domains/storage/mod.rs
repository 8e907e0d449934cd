//! Storage domain - the data store behind the tools.
//!
//! Tools depend only on the [`StorageConnector`] trait; [`WeaviateConnector`]
//! is the production implementation.

mod connector;
mod error;
mod weaviate;

#[cfg(test)]
pub(crate) mod mock;

pub use connector::{InsertedObject, StorageConnector};
pub use error::ConnectorError;
pub use weaviate::WeaviateConnector;
