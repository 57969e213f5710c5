//! PageRank algorithm implementation
//!
//! Weighted power iteration with uniform teleport and dangling-node redistribution.

use super::common::{GraphView, NodeId};
use std::collections::HashMap;
use tracing::debug;

/// PageRank configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PageRankConfig {
    /// Damping factor (usually 0.85)
    pub damping_factor: f64,
    /// Iteration cap
    pub max_iterations: usize,
    /// Per-node tolerance; iteration stops once the L1 change drops below `N * tolerance`
    pub tolerance: f64,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping_factor: 0.85,
            max_iterations: 100,
            tolerance: 1e-6,
        }
    }
}

/// Result of a PageRank run
#[derive(Debug, Clone)]
pub struct PageRankResult {
    /// Score per node; scores sum to 1
    pub scores: HashMap<NodeId, f64>,
    /// Iterations performed
    pub iterations: usize,
    /// False when the cap was hit before reaching tolerance
    pub converged: bool,
}

fn usable_successors(view: &GraphView, idx: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
    view.weighted_successors(idx).filter(|&(_, w)| w.is_finite() && w >= 0.0)
}

/// Calculate PageRank for the graph view
///
/// Transition probabilities are proportional to edge weights (1.0 in an unweighted view).
/// Negative or non-finite weights are skipped.
/// Nodes without positive out-weight are dangling; their mass is spread uniformly.
pub fn page_rank(view: &GraphView, config: &PageRankConfig) -> PageRankResult {
    let n = view.node_count;

    if n == 0 {
        return PageRankResult {
            scores: HashMap::new(),
            iterations: 0,
            converged: true,
        };
    }

    let out_weight: Vec<f64> = (0..n)
        .map(|i| usable_successors(view, i).map(|(_, w)| w).sum())
        .collect();

    let uniform = 1.0 / n as f64;
    let mut scores = vec![uniform; n];
    let mut next_scores = vec![0.0; n];

    let d = config.damping_factor;
    let threshold = n as f64 * config.tolerance;
    let mut iterations = 0;
    let mut converged = false;

    while iterations < config.max_iterations {
        iterations += 1;

        let dangling_sum: f64 = (0..n)
            .filter(|&i| out_weight[i] <= 0.0)
            .map(|i| scores[i])
            .sum();
        let base_score = (1.0 - d) * uniform + d * dangling_sum * uniform;
        next_scores.iter_mut().for_each(|s| *s = base_score);

        for u in 0..n {
            if out_weight[u] <= 0.0 {
                continue;
            }
            let share = d * scores[u] / out_weight[u];
            for (v, w) in usable_successors(view, u) {
                next_scores[v] += share * w;
            }
        }

        let total_diff: f64 = next_scores
            .iter()
            .zip(scores.iter())
            .map(|(a, b)| (a - b).abs())
            .sum();

        // Swap buffers
        std::mem::swap(&mut scores, &mut next_scores);

        if total_diff < threshold {
            converged = true;
            break;
        }
    }

    debug!(iterations, converged, "pagerank finished");

    let mut result = HashMap::with_capacity(n);
    for (idx, score) in scores.into_iter().enumerate() {
        result.insert(view.index_to_node[idx], score);
    }

    PageRankResult {
        scores: result,
        iterations,
        converged,
    }
}
