mod common;
pub mod insert_one;
pub mod query;

pub use common::resolve_collection;
pub use insert_one::WeaviateInsertOneTool;
pub use query::WeaviateQueryTool;
