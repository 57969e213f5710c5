//! Shared utilities for graph algorithms
//!
//! Provides a read-only, optimized view of the graph topology for algorithm execution.

use std::collections::HashMap;

/// Node Identifier type (u64)
pub type NodeId = u64;

/// A dense, integer-indexed view of the graph topology using Compressed Sparse Row (CSR) format.
///
/// Algorithms that operate on an undirected graph (community detection, spanning trees)
/// expect a *symmetric* view: every undirected edge `{u, v}` with `u != v` is stored as
/// both `u -> v` and `v -> u` with the same weight, and a self-loop is stored once.
#[derive(Debug, Clone)]
pub struct GraphView {
    /// Number of nodes
    pub node_count: usize,
    /// Mapping from dense index (0..N) back to NodeId
    pub index_to_node: Vec<NodeId>,
    /// Mapping from NodeId to dense index
    pub node_to_index: HashMap<NodeId, usize>,

    /// Outgoing edges CSR structure
    /// Offsets into `out_targets`. Size = node_count + 1
    pub out_offsets: Vec<usize>,
    /// Contiguous array of target node indices
    pub out_targets: Vec<usize>,

    /// Incoming edges CSR structure (Compressed Sparse Column effectively)
    /// Offsets into `in_sources`. Size = node_count + 1
    pub in_offsets: Vec<usize>,
    /// Contiguous array of source node indices
    pub in_sources: Vec<usize>,

    /// Edge weights: aligned with `out_targets`
    pub weights: Option<Vec<f64>>,

    /// Insertion rank of every outgoing edge, aligned with `out_targets`.
    /// Both directions of a symmetric edge share one rank.
    pub edge_ranks: Vec<usize>,
}

impl GraphView {
    /// Get the out-degree of a node (by index)
    pub fn out_degree(&self, idx: usize) -> usize {
        self.out_offsets[idx + 1] - self.out_offsets[idx]
    }

    /// Get the in-degree of a node (by index)
    pub fn in_degree(&self, idx: usize) -> usize {
        self.in_offsets[idx + 1] - self.in_offsets[idx]
    }

    /// Get outgoing neighbors (successors) of a node
    pub fn successors(&self, idx: usize) -> &[usize] {
        let start = self.out_offsets[idx];
        let end = self.out_offsets[idx + 1];
        &self.out_targets[start..end]
    }

    /// Get incoming neighbors (predecessors) of a node
    pub fn predecessors(&self, idx: usize) -> &[usize] {
        let start = self.in_offsets[idx];
        let end = self.in_offsets[idx + 1];
        &self.in_sources[start..end]
    }

    /// Get weights for outgoing edges of a node
    pub fn weights(&self, idx: usize) -> Option<&[f64]> {
        self.weights.as_ref().map(|w| {
            let start = self.out_offsets[idx];
            let end = self.out_offsets[idx + 1];
            &w[start..end]
        })
    }

    /// Weight of the `i`-th outgoing edge of `idx`, 1.0 for unweighted views
    pub fn edge_weight(&self, idx: usize, i: usize) -> f64 {
        match &self.weights {
            Some(w) => w[self.out_offsets[idx] + i],
            None => 1.0,
        }
    }

    /// Insertion rank of the `i`-th outgoing edge of `idx`
    pub fn edge_rank(&self, idx: usize, i: usize) -> usize {
        self.edge_ranks[self.out_offsets[idx] + i]
    }

    /// Iterate outgoing `(target, weight)` pairs of a node
    pub fn weighted_successors(&self, idx: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.successors(idx)
            .iter()
            .enumerate()
            .map(move |(i, &v)| (v, self.edge_weight(idx, i)))
    }

    /// Total number of stored (directed) edges
    pub fn edge_count(&self) -> usize {
        self.out_targets.len()
    }

    /// Helper to create GraphView from adjacency lists.
    ///
    /// `outgoing[u]` lists `(target, rank)` pairs; `weights[u]` (when present) is aligned with it.
    /// The incoming structure is derived, predecessors appearing in rank order.
    pub fn from_adjacency_list(
        index_to_node: Vec<NodeId>,
        outgoing: Vec<Vec<(usize, usize)>>,
        weights: Option<Vec<Vec<f64>>>,
    ) -> Self {
        let node_count = index_to_node.len();
        let node_to_index = index_to_node
            .iter()
            .enumerate()
            .map(|(idx, &id)| (id, idx))
            .collect();

        let mut out_offsets = Vec::with_capacity(node_count + 1);
        let mut out_targets = Vec::new();
        let mut edge_ranks = Vec::new();
        let mut flat_weights = if weights.is_some() { Some(Vec::new()) } else { None };
        let mut incoming: Vec<Vec<(usize, usize)>> = vec![Vec::new(); node_count];

        out_offsets.push(0);
        for (u, neighbors) in outgoing.into_iter().enumerate() {
            for (v, rank) in neighbors {
                out_targets.push(v);
                edge_ranks.push(rank);
                incoming[v].push((rank, u));
            }
            out_offsets.push(out_targets.len());

            if let Some(ref mut w_flat) = flat_weights {
                if let Some(w_row) = weights.as_ref().map(|w| &w[u]) {
                    w_flat.extend(w_row.iter());
                }
            }
        }

        let mut in_offsets = Vec::with_capacity(node_count + 1);
        let mut in_sources = Vec::new();
        in_offsets.push(0);
        for mut sources in incoming {
            sources.sort_by_key(|&(rank, _)| rank);
            in_sources.extend(sources.into_iter().map(|(_, u)| u));
            in_offsets.push(in_sources.len());
        }

        GraphView {
            node_count,
            index_to_node,
            node_to_index,
            out_offsets,
            out_targets,
            in_offsets,
            in_sources,
            weights: flat_weights,
            edge_ranks,
        }
    }

    /// Build a view from a directed edge list `(source_idx, target_idx, weight)`.
    ///
    /// Edge ranks follow list order; successors of each node keep that order too.
    pub fn from_edges(index_to_node: Vec<NodeId>, edges: &[(usize, usize, f64)], weighted: bool) -> Self {
        let n = index_to_node.len();
        let mut outgoing = vec![Vec::new(); n];
        let mut weights = vec![Vec::new(); n];
        for (rank, &(u, v, w)) in edges.iter().enumerate() {
            outgoing[u].push((v, rank));
            weights[u].push(w);
        }
        Self::from_adjacency_list(index_to_node, outgoing, weighted.then_some(weights))
    }

    /// Build a symmetric view from an undirected edge list.
    ///
    /// Each `{u, v}` is stored in both directions; self-loops once.
    pub fn symmetric_from_edges(index_to_node: Vec<NodeId>, edges: &[(usize, usize, f64)], weighted: bool) -> Self {
        let n = index_to_node.len();
        let mut outgoing = vec![Vec::new(); n];
        let mut weights = vec![Vec::new(); n];
        for (rank, &(u, v, w)) in edges.iter().enumerate() {
            outgoing[u].push((v, rank));
            weights[u].push(w);
            if u != v {
                outgoing[v].push((u, rank));
                weights[v].push(w);
            }
        }
        Self::from_adjacency_list(index_to_node, outgoing, weighted.then_some(weights))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Directed view over nodes `0..n` (NodeId == index)
    pub fn directed(n: usize, edges: &[(usize, usize)]) -> GraphView {
        let weighted: Vec<_> = edges.iter().map(|&(u, v)| (u, v, 1.0)).collect();
        GraphView::from_edges((0..n as u64).collect(), &weighted, false)
    }

    /// Symmetric view over nodes `0..n` (NodeId == index)
    pub fn undirected(n: usize, edges: &[(usize, usize, f64)]) -> GraphView {
        GraphView::symmetric_from_edges((0..n as u64).collect(), edges, true)
    }
}
