//! Node Catalog (C1): an embedded, read-only snapshot of node
//! definitions with full-text, AND/OR, and fuzzy search plus
//! category/trigger/AI-tool queries.

mod catalog;
mod data;
mod escape;
mod model;

pub use catalog::{Catalog, SearchHit, SearchMode};
pub use model::{DisplayOptions, NodeDefinition, NodeFlags, PropertyOption, PropertySchema, PropertyType};
