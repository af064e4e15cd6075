//! Category domain module.
//!
//! - `model`: category records and request payloads
//! - `tree`: hierarchical projections (indent, collapsible, search, parent picker)
//! - `api`: backend operations on categories

mod api;
mod model;
pub mod tree;

pub use api::CategoryApi;
pub use model::{Category, CategoryPayload};
pub use tree::{CategoryForest, DisplayNode, HierarchyEntry, IndentedCategory, ParentOption};
