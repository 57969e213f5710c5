//! Graph analytics
//!
//! Stateless functions over a [`GraphStore`] snapshot. Each call builds a dense
//! `GraphView` of the store and hands it to the `kgraph-algorithms` crate; this
//! module is the integration/adapter layer that maps results back to node keys.

pub mod centrality;
pub mod common;
pub mod community;
pub mod mst;
pub mod pagerank;
pub mod pathfinding;
pub mod stats;

use crate::graph::GraphStore;
use kgraph_algorithms::{GraphView, NodeId as AlgoNodeId};

pub use centrality::{betweenness_centrality, closeness_centrality, degree_centrality};
pub use common::CentralityResult;
pub use community::{
    detect_communities, detect_with_config, modularity, weakly_connected_components, CommunityConfig,
    CommunityDetection, CommunityMethod, Partition, UnknownMethod,
};
pub use kgraph_algorithms::{ClosenessDirection, CommunityError, PageRankConfig};
pub use mst::{minimum_spanning_tree, MstResult, SpanningEdge};
pub use pagerank::{pagerank, PageRankOutcome};
pub use pathfinding::{find_shortest_path, Path, PathWeighting};
pub use stats::{basic_stats, node_info, GraphStatistics, NodeInfo, StatValue};

/// Dense ids: node `i` of the store (insertion order) is `i` in the view
fn dense_ids(store: &GraphStore) -> Vec<AlgoNodeId> {
    (0..store.node_count() as AlgoNodeId).collect()
}

/// Build a directed GraphView of the store.
///
/// With `weighted`, each edge carries its effective weight (stored weight or 1.0).
pub fn build_view(store: &GraphStore, weighted: bool) -> GraphView {
    let edges: Vec<(usize, usize, f64)> = store
        .indexed_edges()
        .map(|(s, t, attrs)| (s, t, attrs.weight()))
        .collect();
    GraphView::from_edges(dense_ids(store), &edges, weighted)
}

/// Build a symmetric GraphView of the store's undirected projection
pub fn build_undirected_view(store: &GraphStore, weighted: bool) -> GraphView {
    let projection = store.to_undirected_view();
    let edges: Vec<(usize, usize, f64)> = projection
        .indexed_edges()
        .map(|(a, b, attrs)| (a, b, attrs.weight()))
        .collect();
    GraphView::symmetric_from_edges(dense_ids(store), &edges, weighted)
}

/// Map a view id back to the store's key
pub(crate) fn key_of(store: &GraphStore, id: AlgoNodeId) -> Option<crate::graph::NodeKey> {
    store.key_at(id as usize).cloned()
}
