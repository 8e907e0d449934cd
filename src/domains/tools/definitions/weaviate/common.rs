//! Helpers shared by the Weaviate tools.

use crate::domains::tools::validator::{ArgValue, ValidatedArguments};

/// Parameter name for the optional target collection.
pub const COLLECTION_PARAM: &str = "collection";

/// Resolve the collection a call targets.
///
/// A non-empty `collection` argument wins; anything else falls back to
/// `default`.
pub fn resolve_collection(arguments: &ValidatedArguments, default: &str) -> String {
    match arguments.get(COLLECTION_PARAM) {
        ArgValue::String(name) if !name.is_empty() => name.clone(),
        _ => default.to_string(),
    }
}
