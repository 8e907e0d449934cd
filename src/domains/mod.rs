//! Domains module containing business logic organized by bounded contexts.
//!
//! - `tools` owns the registry, argument validation and dispatch.
//! - `storage` owns the connector tools use to reach Weaviate.

pub mod storage;
pub mod tools;
