//! PageRank over the weighted directed graph

use super::build_view;
use super::common::CentralityResult;
use crate::graph::GraphStore;
use kgraph_algorithms::{page_rank, PageRankConfig};
use serde::Serialize;
use tracing::{debug, warn};

/// PageRank scores plus convergence information
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageRankOutcome {
    pub scores: CentralityResult,
    pub iterations: usize,
    /// False when the iteration cap was reached; `scores` is then the last estimate
    pub converged: bool,
}

/// Compute PageRank with edge weights as transition weights.
///
/// Non-convergence is not an error: the last iterate is returned and a warning logged.
pub fn pagerank(store: &GraphStore, config: &PageRankConfig) -> PageRankOutcome {
    let view = build_view(store, true);
    let result = page_rank(&view, config);

    if result.converged {
        debug!(iterations = result.iterations, "PageRank converged");
    } else {
        warn!(
            iterations = result.iterations,
            tolerance = config.tolerance,
            "PageRank did not converge, returning last estimate"
        );
    }

    PageRankOutcome {
        scores: CentralityResult::from_view_scores(store, &result.scores),
        iterations: result.iterations,
        converged: result.converged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{EdgeAttributes, NodeKey};

    #[test]
    fn test_pagerank_sums_to_one() {
        let mut store = GraphStore::new();
        store.add_edge("a", "b", EdgeAttributes::default()).unwrap();
        store.add_edge("b", "c", EdgeAttributes::default()).unwrap();
        store.add_edge("c", "a", EdgeAttributes::default()).unwrap();
        store.add_node("d", Default::default());

        let outcome = pagerank(&store, &PageRankConfig::default());
        assert!(outcome.converged);
        assert_eq!(outcome.scores.len(), 4);
        assert!((outcome.scores.total() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_pagerank_follows_weights() {
        let mut store = GraphStore::new();
        store.add_edge("hub", "heavy", EdgeAttributes::weighted(9.0)).unwrap();
        store.add_edge("hub", "light", EdgeAttributes::weighted(1.0)).unwrap();

        let outcome = pagerank(&store, &PageRankConfig::default());
        let heavy = outcome.scores.get(&NodeKey::from("heavy")).unwrap();
        let light = outcome.scores.get(&NodeKey::from("light")).unwrap();
        assert!(heavy > light);
    }

    #[test]
    fn test_pagerank_iteration_cap_returns_estimate() {
        let mut store = GraphStore::new();
        store.add_edge("a", "b", EdgeAttributes::default()).unwrap();
        store.add_edge("b", "c", EdgeAttributes::default()).unwrap();

        let config = PageRankConfig {
            max_iterations: 1,
            tolerance: 1e-15,
            ..Default::default()
        };
        let outcome = pagerank(&store, &config);
        assert!(!outcome.converged);
        assert_eq!(outcome.iterations, 1);
        assert_eq!(outcome.scores.len(), 3);
    }
}
