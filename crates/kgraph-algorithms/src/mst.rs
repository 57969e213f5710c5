//! Minimum Spanning Tree algorithms
//!
//! Implements Prim's algorithm, restarted per component to produce a spanning forest.

use super::common::{GraphView, NodeId};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MSTResult {
    pub total_weight: f64,
    pub edges: Vec<(NodeId, NodeId, f64)>, // (source, target, weight)
}

#[derive(Copy, Clone, PartialEq)]
struct EdgeState {
    weight: f64,
    rank: usize,
    source: usize,
    target: usize,
}

impl Eq for EdgeState {}

impl Ord for EdgeState {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse for min-heap; equal weights pop the earlier edge first
        other
            .weight
            .partial_cmp(&self.weight)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.rank.cmp(&self.rank))
    }
}

impl PartialOrd for EdgeState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Prim's Algorithm for Minimum Spanning Tree
///
/// Expects a symmetric view (see [`GraphView`]). Each unvisited node, in index order,
/// seeds a new tree, so a graph with `k` components of `n` nodes yields `n - k` edges.
/// Self-loops never join a tree.
pub fn prim_mst(view: &GraphView) -> MSTResult {
    let n = view.node_count;
    let mut visited = vec![false; n];
    let mut heap = BinaryHeap::new();
    let mut mst_edges = Vec::new();
    let mut total_weight = 0.0;

    for start_idx in 0..n {
        if visited[start_idx] {
            continue;
        }
        visited[start_idx] = true;
        add_edges(view, start_idx, &mut heap, &visited);

        while let Some(EdgeState { weight, source, target, .. }) = heap.pop() {
            if visited[target] {
                continue;
            }

            visited[target] = true;
            mst_edges.push((view.index_to_node[source], view.index_to_node[target], weight));
            total_weight += weight;

            add_edges(view, target, &mut heap, &visited);
        }
    }

    MSTResult {
        total_weight,
        edges: mst_edges,
    }
}

fn add_edges(view: &GraphView, u: usize, heap: &mut BinaryHeap<EdgeState>, visited: &[bool]) {
    for (i, (v, weight)) in view.weighted_successors(u).enumerate() {
        if !visited[v] {
            heap.push(EdgeState {
                weight,
                rank: view.edge_rank(u, i),
                source: u,
                target: v,
            });
        }
    }
}
