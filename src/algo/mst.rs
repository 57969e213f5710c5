//! Minimum spanning forest of the undirected projection

use super::{build_undirected_view, key_of};
use crate::graph::{GraphStore, NodeKey};
use kgraph_algorithms::prim_mst;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpanningEdge {
    pub source: NodeKey,
    pub target: NodeKey,
    pub weight: f64,
}

/// Spanning forest: one tree per weakly connected component
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MstResult {
    pub edges: Vec<SpanningEdge>,
    pub total_weight: f64,
}

impl MstResult {
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn contains(&self, a: &NodeKey, b: &NodeKey) -> bool {
        self.edges
            .iter()
            .any(|e| (&e.source == a && &e.target == b) || (&e.source == b && &e.target == a))
    }
}

/// Minimum spanning forest by weight, treating edges as undirected.
///
/// A graph of `n` nodes in `k` components yields `n - k` edges. Equal weights
/// prefer the edge inserted first.
pub fn minimum_spanning_tree(store: &GraphStore) -> MstResult {
    let view = build_undirected_view(store, true);
    let result = prim_mst(&view);

    let edges = result
        .edges
        .into_iter()
        .filter_map(|(s, t, weight)| {
            Some(SpanningEdge {
                source: key_of(store, s)?,
                target: key_of(store, t)?,
                weight,
            })
        })
        .collect();

    MstResult {
        edges,
        total_weight: result.total_weight,
    }
}
