//! Community detection algorithms
//!
//! Weakly connected components plus the shared modularity machinery used by
//! [`louvain`](crate::louvain) and [`greedy_modularity`](crate::greedy_modularity).

use super::common::{GraphView, NodeId};
use std::collections::HashMap;
use thiserror::Error;

/// Internal failures of modularity-based community detection
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommunityError {
    #[error("graph has no edges, modularity is undefined")]
    NoEdges,

    #[error("invalid edge weight {0}")]
    InvalidWeight(f64),

    #[error("modularity became non-finite at level {0}")]
    NumericalInstability(usize),
}

/// Result of a modularity-based detection run
#[derive(Debug, Clone)]
pub struct CommunityResult {
    /// Communities as lists of NodeIds; every node appears in exactly one
    pub communities: Vec<Vec<NodeId>>,
    /// Modularity of the returned partition
    pub modularity: f64,
}

/// Result of WCC algorithm
pub struct WccResult {
    /// Components ordered by their first node; members in index order
    pub components: Vec<Vec<NodeId>>,
    /// Map of NodeId -> Component ID (position in `components`)
    pub node_component: HashMap<NodeId, usize>,
}

impl WccResult {
    pub fn component_count(&self) -> usize {
        self.components.len()
    }
}

/// Union-Find data structure
pub(crate) struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl UnionFind {
    pub(crate) fn new(size: usize) -> Self {
        UnionFind {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    pub(crate) fn find(&mut self, i: usize) -> usize {
        if self.parent[i] != i {
            self.parent[i] = self.find(self.parent[i]); // Path compression
        }
        self.parent[i]
    }

    pub(crate) fn union(&mut self, i: usize, j: usize) -> bool {
        let root_i = self.find(i);
        let root_j = self.find(j);

        if root_i == root_j {
            return false;
        }
        if self.rank[root_i] < self.rank[root_j] {
            self.parent[root_i] = root_j;
        } else if self.rank[root_i] > self.rank[root_j] {
            self.parent[root_j] = root_i;
        } else {
            self.parent[root_j] = root_i;
            self.rank[root_i] += 1;
        }
        true
    }
}

/// Weakly Connected Components (WCC)
///
/// Finds all disjoint subgraphs in the graph.
/// Ignores edge direction.
pub fn weakly_connected_components(view: &GraphView) -> WccResult {
    let n = view.node_count;
    let mut uf = UnionFind::new(n);

    // Iterate all edges and Union connected nodes
    for u_idx in 0..n {
        for &v_idx in view.successors(u_idx) {
            uf.union(u_idx, v_idx);
        }
    }

    // Build results
    let mut root_component: HashMap<usize, usize> = HashMap::new();
    let mut components: Vec<Vec<NodeId>> = Vec::new();
    let mut node_component = HashMap::with_capacity(n);

    for i in 0..n {
        let root = uf.find(i);
        let node_id = view.index_to_node[i];
        let component = *root_component.entry(root).or_insert_with(|| {
            components.push(Vec::new());
            components.len() - 1
        });
        components[component].push(node_id);
        node_component.insert(node_id, component);
    }

    WccResult {
        components,
        node_component,
    }
}

/// Weighted undirected adjacency read from a symmetric view.
///
/// Self-loops appear once in `adj` and count twice towards `degree`.
#[derive(Debug, Clone)]
pub(crate) struct WeightedAdjacency {
    pub adj: Vec<Vec<(usize, f64)>>,
    pub degree: Vec<f64>,
}

impl WeightedAdjacency {
    pub fn from_view(view: &GraphView) -> Self {
        let n = view.node_count;
        let mut adj = vec![Vec::new(); n];
        let mut degree = vec![0.0; n];
        for u in 0..n {
            for (v, w) in view.weighted_successors(u) {
                adj[u].push((v, w));
                degree[u] += if u == v { 2.0 * w } else { w };
            }
        }
        WeightedAdjacency { adj, degree }
    }

    /// Build from an undirected edge list (each `{a, b}` listed once)
    pub fn from_edges(n: usize, edges: impl IntoIterator<Item = (usize, usize, f64)>) -> Self {
        let mut adj = vec![Vec::new(); n];
        let mut degree = vec![0.0; n];
        for (a, b, w) in edges {
            adj[a].push((b, w));
            if a == b {
                degree[a] += 2.0 * w;
            } else {
                adj[b].push((a, w));
                degree[a] += w;
                degree[b] += w;
            }
        }
        WeightedAdjacency { adj, degree }
    }

    pub fn len(&self) -> usize {
        self.adj.len()
    }

    /// Total edge weight `m` (each undirected edge once)
    pub fn total_weight(&self) -> f64 {
        self.degree.iter().sum::<f64>() / 2.0
    }

    /// First negative or non-finite weight, if any
    pub fn invalid_weight(&self) -> Option<f64> {
        self.adj
            .iter()
            .flatten()
            .map(|&(_, w)| w)
            .find(|w| !w.is_finite() || *w < 0.0)
    }

    /// `Q = sum_c [ L_c / m - resolution * (D_c / 2m)^2 ]`
    pub fn modularity(&self, membership: &[usize], resolution: f64) -> f64 {
        let m = self.total_weight();
        if m <= 0.0 {
            return 0.0;
        }
        let communities = membership.iter().copied().max().map_or(0, |c| c + 1);
        let mut internal = vec![0.0; communities];
        let mut degree = vec![0.0; communities];

        for (u, neighbors) in self.adj.iter().enumerate() {
            let cu = membership[u];
            degree[cu] += self.degree[u];
            for &(v, w) in neighbors {
                if membership[v] == cu {
                    // Symmetric storage lists non-loop edges twice
                    internal[cu] += if u == v { w } else { w / 2.0 };
                }
            }
        }

        internal
            .iter()
            .zip(degree.iter())
            .map(|(l, d)| l / m - resolution * (d / (2.0 * m)).powi(2))
            .sum()
    }
}

/// Modularity of a community assignment (`membership[idx]` = community of node `idx`)
/// over a symmetric view. Zero for a graph without edges.
pub fn modularity(view: &GraphView, membership: &[usize], resolution: f64) -> f64 {
    WeightedAdjacency::from_view(view).modularity(membership, resolution)
}

/// Group node indices by community, communities in order of their first node
pub(crate) fn group_by_membership(view: &GraphView, membership: &[usize]) -> Vec<Vec<NodeId>> {
    let mut position: HashMap<usize, usize> = HashMap::new();
    let mut communities: Vec<Vec<NodeId>> = Vec::new();
    for (idx, &c) in membership.iter().enumerate() {
        let slot = *position.entry(c).or_insert_with(|| {
            communities.push(Vec::new());
            communities.len() - 1
        });
        communities[slot].push(view.index_to_node[idx]);
    }
    communities
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::test_support::{directed, undirected};

    #[test]
    fn test_wcc() {
        // Nodes: 0..6
        // Edges: 0->1, 2->3->4, 5 (isolated)
        let view = directed(6, &[(0, 1), (2, 3), (3, 4)]);

        let result = weakly_connected_components(&view);

        assert_eq!(result.component_count(), 3);
        assert_eq!(result.components[0], vec![0, 1]);
        assert_eq!(result.components[1], vec![2, 3, 4]);
        assert_eq!(result.components[2], vec![5]);

        let c1 = result.node_component[&0];
        let c2 = result.node_component[&1];
        assert_eq!(c1, c2);
        assert_ne!(c1, result.node_component[&3]);
    }

    #[test]
    fn test_wcc_ignores_direction() {
        // 1 -> 0 and 1 -> 2 share a source only
        let view = directed(3, &[(1, 0), (1, 2)]);
        assert_eq!(weakly_connected_components(&view).component_count(), 1);
    }

    #[test]
    fn test_modularity_two_triangles() {
        let view = undirected(
            6,
            &[(0, 1, 1.0), (1, 2, 1.0), (2, 0, 1.0), (3, 4, 1.0), (4, 5, 1.0), (5, 3, 1.0)],
        );
        let q = modularity(&view, &[0, 0, 0, 1, 1, 1], 1.0);
        assert!((q - 0.5).abs() < 1e-12);

        let all_in_one = modularity(&view, &[0; 6], 1.0);
        assert!(all_in_one.abs() < 1e-12);
    }

    #[test]
    fn test_modularity_without_edges() {
        let view = undirected(3, &[]);
        assert_eq!(modularity(&view, &[0, 1, 2], 1.0), 0.0);
    }

    #[test]
    fn test_self_loop_degree() {
        let adjacency = WeightedAdjacency::from_edges(2, vec![(0, 0, 1.0), (0, 1, 2.0)]);
        assert_eq!(adjacency.degree, vec![4.0, 2.0]);
        assert_eq!(adjacency.total_weight(), 3.0);
    }
}
