//! Shortest paths along edge direction

use super::{build_view, key_of};
use crate::graph::{GraphStore, NodeKey};
use kgraph_algorithms::{bfs, dijkstra, NodeId as AlgoNodeId, PathResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How path length is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathWeighting {
    /// Fewest edges
    #[default]
    Unweighted,
    /// Smallest total weight; negative-weight edges are not traversed
    Weighted,
}

/// A shortest path, source first and target last
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Path {
    pub nodes: Vec<NodeKey>,
    /// Edge count for unweighted search, weight sum for weighted search
    pub cost: f64,
}

impl Path {
    fn from_result(store: &GraphStore, result: PathResult) -> Self {
        Path {
            nodes: result.path.into_iter().filter_map(|id| key_of(store, id)).collect(),
            cost: result.cost,
        }
    }

    /// Number of edges traversed
    pub fn hops(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    pub fn source(&self) -> Option<&NodeKey> {
        self.nodes.first()
    }

    pub fn target(&self) -> Option<&NodeKey> {
        self.nodes.last()
    }

    /// Consecutive `(from, to)` pairs
    pub fn steps(&self) -> impl Iterator<Item = (&NodeKey, &NodeKey)> {
        self.nodes.windows(2).map(|pair| (&pair[0], &pair[1]))
    }
}

/// Shortest directed path from `source` to `target`.
///
/// Returns `None` when either key is unknown or the target is unreachable.
/// A path from a node to itself is that single node with cost 0.
pub fn find_shortest_path(
    store: &GraphStore,
    source: &NodeKey,
    target: &NodeKey,
    weighting: PathWeighting,
) -> Option<Path> {
    let src = store.index_of(source)? as AlgoNodeId;
    let tgt = store.index_of(target)? as AlgoNodeId;

    let result = match weighting {
        PathWeighting::Unweighted => bfs(&build_view(store, false), src, tgt),
        PathWeighting::Weighted => dijkstra(&build_view(store, true), src, tgt),
    };

    if result.is_none() {
        debug!(%source, %target, "No path found");
    }
    result.map(|r| Path::from_result(store, r))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::EdgeAttributes;

    fn detour() -> GraphStore {
        // a -> d is direct but expensive; a -> b -> c -> d is cheap
        let mut store = GraphStore::new();
        store.add_edge("a", "d", EdgeAttributes::weighted(10.0)).unwrap();
        store.add_edge("a", "b", EdgeAttributes::weighted(1.0)).unwrap();
        store.add_edge("b", "c", EdgeAttributes::weighted(1.0)).unwrap();
        store.add_edge("c", "d", EdgeAttributes::weighted(1.0)).unwrap();
        store
    }

    fn key(s: &str) -> NodeKey {
        NodeKey::from(s)
    }

    #[test]
    fn test_unweighted_takes_fewest_hops() {
        let store = detour();
        let path = find_shortest_path(&store, &key("a"), &key("d"), PathWeighting::Unweighted).unwrap();
        assert_eq!(path.nodes, vec![key("a"), key("d")]);
        assert_eq!(path.cost, 1.0);
        assert_eq!(path.hops(), 1);
    }

    #[test]
    fn test_weighted_takes_lightest() {
        let store = detour();
        let path = find_shortest_path(&store, &key("a"), &key("d"), PathWeighting::Weighted).unwrap();
        assert_eq!(path.nodes, vec![key("a"), key("b"), key("c"), key("d")]);
        assert_eq!(path.cost, 3.0);
        let steps: Vec<_> = path.steps().collect();
        assert_eq!(steps[0], (&key("a"), &key("b")));
    }

    #[test]
    fn test_direction_respected() {
        let store = detour();
        assert!(find_shortest_path(&store, &key("d"), &key("a"), PathWeighting::Unweighted).is_none());
    }

    #[test]
    fn test_unknown_and_self() {
        let store = detour();
        assert!(find_shortest_path(&store, &key("a"), &key("zz"), PathWeighting::Weighted).is_none());

        let path = find_shortest_path(&store, &key("b"), &key("b"), PathWeighting::Weighted).unwrap();
        assert_eq!(path.nodes, vec![key("b")]);
        assert_eq!(path.cost, 0.0);
    }
}
