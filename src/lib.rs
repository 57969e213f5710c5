//! kgraph: knowledge graph analytics
//!
//! An in-memory directed knowledge graph of concepts and relationships, with
//! structural analytics on top of it.
//!
//! # Layout
//!
//! - [`graph`]: the store. Nodes keyed by integer or string, one directed edge per
//!   ordered pair, deterministic insertion order everywhere.
//! - [`algo`]: statistics, centrality, PageRank, community detection, shortest
//!   paths, spanning forests and node summaries. All pure functions of a store.
//! - [`loader`]: commits concept and relationship rows into a store.
//! - [`config`]: YAML-loadable analytics settings.
//!
//! The algorithms themselves live in the `kgraph-algorithms` crate and run on a
//! dense CSR view built per call.
//!
//! ## Example Usage
//!
//! ```rust
//! use kgraph::algo::{degree_centrality, find_shortest_path, PathWeighting};
//! use kgraph::graph::{EdgeAttributes, GraphStore, NodeAttributes, NodeKey};
//!
//! let mut store = GraphStore::new();
//! store.add_node("mona_lisa", NodeAttributes::new("Mona Lisa", "Art"));
//! store.add_edge("sfumato", "mona_lisa", EdgeAttributes::new("used_in")).unwrap();
//! store.add_edge("optics", "sfumato", EdgeAttributes::new("informs")).unwrap();
//!
//! let scores = degree_centrality(&store);
//! assert_eq!(scores.get(&NodeKey::from("sfumato")), Some(1.0));
//!
//! let path = find_shortest_path(
//!     &store,
//!     &NodeKey::from("optics"),
//!     &NodeKey::from("mona_lisa"),
//!     PathWeighting::Unweighted,
//! )
//! .unwrap();
//! assert_eq!(path.hops(), 2);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod config;
pub mod graph;
pub mod loader;

// Re-export main types for convenience
pub use graph::{
    EdgeAttributes, EdgeMode, GraphError, GraphResult, GraphStore, NodeAttributes, NodeKey,
    PropertyMap, PropertyValue,
};

pub use algo::{
    CentralityResult, CommunityDetection, CommunityMethod, GraphStatistics, MstResult, NodeInfo,
    PageRankOutcome, Partition, Path, PathWeighting,
};

pub use config::{AnalyticsConfig, ConfigError, ConfigResult};

pub use loader::{EdgeRecord, JsonRecords, LoadError, LoadResult, LoadSummary, NodeRecord};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
