//! Centrality measures
//!
//! Degree, betweenness (Brandes) and closeness (Wasserman-Faust) over a directed view.
//! All traversals are unweighted and respect edge direction.

use super::common::{GraphView, NodeId};
use std::collections::{HashMap, VecDeque};

/// Which distances closeness centrality is computed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ClosenessDirection {
    /// Distances from the node to every node it can reach
    #[default]
    Outgoing,
    /// Distances from every node that can reach it to the node
    Incoming,
}

fn collect(view: &GraphView, scores: Vec<f64>) -> HashMap<NodeId, f64> {
    scores
        .into_iter()
        .enumerate()
        .map(|(idx, score)| (view.index_to_node[idx], score))
        .collect()
}

/// Degree centrality: `(in + out) / (n - 1)`, zero for every node when `n <= 1`
pub fn degree_centrality(view: &GraphView) -> HashMap<NodeId, f64> {
    let n = view.node_count;
    let scores = (0..n)
        .map(|i| {
            if n <= 1 {
                0.0
            } else {
                (view.in_degree(i) + view.out_degree(i)) as f64 / (n - 1) as f64
            }
        })
        .collect();
    collect(view, scores)
}

/// Betweenness centrality (Brandes 2001), normalized by `1 / ((n-1)(n-2))`.
///
/// Sources and successors are visited in index order so the accumulation order, and
/// therefore every floating-point result, is identical across runs.
pub fn betweenness_centrality(view: &GraphView) -> HashMap<NodeId, f64> {
    let n = view.node_count;
    let mut centrality = vec![0.0; n];

    let mut stack = Vec::with_capacity(n);
    let mut preds: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut sigma = vec![0.0f64; n];
    let mut dist = vec![-1i64; n];
    let mut delta = vec![0.0f64; n];
    let mut queue = VecDeque::new();

    for s in 0..n {
        stack.clear();
        for i in 0..n {
            preds[i].clear();
            sigma[i] = 0.0;
            dist[i] = -1;
            delta[i] = 0.0;
        }
        sigma[s] = 1.0;
        dist[s] = 0;
        queue.push_back(s);

        while let Some(v) = queue.pop_front() {
            stack.push(v);
            for &w in view.successors(v) {
                if dist[w] < 0 {
                    dist[w] = dist[v] + 1;
                    queue.push_back(w);
                }
                if dist[w] == dist[v] + 1 {
                    sigma[w] += sigma[v];
                    preds[w].push(v);
                }
            }
        }

        while let Some(w) = stack.pop() {
            for &v in &preds[w] {
                delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
            }
            if w != s {
                centrality[w] += delta[w];
            }
        }
    }

    if n > 2 {
        let scale = 1.0 / ((n - 1) * (n - 2)) as f64;
        centrality.iter_mut().for_each(|c| *c *= scale);
    }

    collect(view, centrality)
}

/// BFS hop distances from `source`, following successors or predecessors
fn bfs_distances(view: &GraphView, source: usize, direction: ClosenessDirection) -> Vec<Option<usize>> {
    let mut dist = vec![None; view.node_count];
    let mut queue = VecDeque::new();
    dist[source] = Some(0);
    queue.push_back(source);

    while let Some(v) = queue.pop_front() {
        let d = dist[v].unwrap_or(0);
        let next = match direction {
            ClosenessDirection::Outgoing => view.successors(v),
            ClosenessDirection::Incoming => view.predecessors(v),
        };
        for &w in next {
            if dist[w].is_none() {
                dist[w] = Some(d + 1);
                queue.push_back(w);
            }
        }
    }
    dist
}

/// Closeness centrality with the Wasserman-Faust reachability correction:
/// `c(u) = (r / (n-1)) * (r / sum_d)` where `r` counts the nodes reachable from `u`.
pub fn closeness_centrality(view: &GraphView, direction: ClosenessDirection) -> HashMap<NodeId, f64> {
    let n = view.node_count;
    let scores = (0..n)
        .map(|u| {
            let dist = bfs_distances(view, u, direction);
            let (reachable, total) = dist
                .iter()
                .enumerate()
                .filter(|&(v, _)| v != u)
                .filter_map(|(_, d)| *d)
                .fold((0usize, 0usize), |(r, t), d| (r + 1, t + d));

            if total == 0 || n <= 1 {
                0.0
            } else {
                let r = reachable as f64;
                (r / total as f64) * (r / (n - 1) as f64)
            }
        })
        .collect();
    collect(view, scores)
}
