//! Knowledge graph data model
//!
//! - Nodes keyed by integer or string, with typed concept attributes
//! - Directed edges, one per ordered pair, with relationship and weight
//! - Configurable handling of edges that reference unknown nodes

pub mod edge;
pub mod node;
pub mod property;
pub mod store;
pub mod types;

// Re-export main types
pub use edge::{EdgeAttributes, DEFAULT_WEIGHT};
pub use node::NodeAttributes;
pub use property::{PropertyMap, PropertyValue};
pub use store::{
    EdgeEntry, GraphError, GraphResult, GraphSnapshot, GraphStore, NodeEntry, UndirectedGraph,
};
pub use types::{EdgeMode, NodeKey};
