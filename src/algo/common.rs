//! Result types shared by the centrality measures

use crate::graph::{GraphStore, NodeKey};
use indexmap::IndexMap;
use kgraph_algorithms::NodeId as AlgoNodeId;
use serde::Serialize;
use std::collections::HashMap;

/// Score per node, complete over the graph, iterated in node insertion order
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct CentralityResult {
    scores: IndexMap<NodeKey, f64>,
}

impl CentralityResult {
    /// Attach view scores to store keys; nodes missing from `scores` get 0
    pub(crate) fn from_view_scores(store: &GraphStore, scores: &HashMap<AlgoNodeId, f64>) -> Self {
        let scores = store
            .nodes()
            .enumerate()
            .map(|(idx, (key, _))| {
                let score = scores.get(&(idx as AlgoNodeId)).copied().unwrap_or(0.0);
                (key.clone(), score)
            })
            .collect();
        CentralityResult { scores }
    }

    pub fn get(&self, key: &NodeKey) -> Option<f64> {
        self.scores.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NodeKey, f64)> {
        self.scores.iter().map(|(k, v)| (k, *v))
    }

    /// Sum of all scores
    pub fn total(&self) -> f64 {
        self.scores.values().sum()
    }

    /// The `k` highest-scoring nodes, best first; ties keep insertion order
    pub fn top_k(&self, k: usize) -> Vec<(&NodeKey, f64)> {
        let mut ranked: Vec<(&NodeKey, f64)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(k);
        ranked
    }

    pub fn into_inner(self) -> IndexMap<NodeKey, f64> {
        self.scores
    }
}

impl<'a> IntoIterator for &'a CentralityResult {
    type Item = (&'a NodeKey, &'a f64);
    type IntoIter = indexmap::map::Iter<'a, NodeKey, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.scores.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeAttributes;

    #[test]
    fn test_top_k_ties_keep_order() {
        let mut store = GraphStore::new();
        for key in ["a", "b", "c", "d"] {
            store.add_node(key, NodeAttributes::default());
        }
        let scores: HashMap<u64, f64> = [(0, 0.1), (1, 0.5), (2, 0.5), (3, 0.9)].into_iter().collect();
        let result = CentralityResult::from_view_scores(&store, &scores);

        let top: Vec<_> = result.top_k(3).into_iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(top, vec!["d", "b", "c"]);
        assert_eq!(result.len(), 4);
        assert!((result.total() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_missing_scores_default_to_zero() {
        let mut store = GraphStore::new();
        store.add_node(1, NodeAttributes::default());
        let result = CentralityResult::from_view_scores(&store, &HashMap::new());
        assert_eq!(result.get(&NodeKey::from(1)), Some(0.0));
    }
}
