//! Centrality measures over the directed graph

use super::build_view;
use super::common::CentralityResult;
use crate::graph::GraphStore;
use kgraph_algorithms::ClosenessDirection;

/// `(in + out) / (n - 1)` per node; all zero when the graph has at most one node
pub fn degree_centrality(store: &GraphStore) -> CentralityResult {
    let view = build_view(store, false);
    CentralityResult::from_view_scores(store, &kgraph_algorithms::degree_centrality(&view))
}

/// Normalized betweenness over unweighted directed shortest paths
pub fn betweenness_centrality(store: &GraphStore) -> CentralityResult {
    let view = build_view(store, false);
    CentralityResult::from_view_scores(store, &kgraph_algorithms::betweenness_centrality(&view))
}

/// Wasserman-Faust closeness; isolated nodes score 0
pub fn closeness_centrality(store: &GraphStore, direction: ClosenessDirection) -> CentralityResult {
    let view = build_view(store, false);
    CentralityResult::from_view_scores(store, &kgraph_algorithms::closeness_centrality(&view, direction))
}
