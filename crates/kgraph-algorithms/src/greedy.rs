//! Greedy modularity maximization (Clauset, Newman & Moore 2004)
//!
//! Starts from singleton communities and repeatedly merges the adjacent pair with
//! the largest positive modularity gain.

use super::common::{GraphView, NodeId};
use super::community::{CommunityResult, WeightedAdjacency};
use std::collections::BTreeMap;
use tracing::debug;

/// Greedy modularity communities over a symmetric view.
///
/// Ties between equal gains go to the pair with the smallest community indices.
/// A graph without edges yields one singleton community per node. Communities are
/// returned largest first; equal sizes keep the order of their first member.
pub fn greedy_modularity(view: &GraphView, resolution: f64) -> CommunityResult {
    let n = view.node_count;
    let adjacency = WeightedAdjacency::from_view(view);
    let m = adjacency.total_weight();

    let mut members: Vec<Vec<usize>> = (0..n).map(|i| vec![i]).collect();
    let mut alive = vec![true; n];

    if m > 0.0 {
        let mut a: Vec<f64> = adjacency.degree.iter().map(|k| k / (2.0 * m)).collect();
        // e[i][j]: fraction of edge ends joining community i to community j (i != j)
        let mut e: Vec<BTreeMap<usize, f64>> = vec![BTreeMap::new(); n];
        for (u, neighbors) in adjacency.adj.iter().enumerate() {
            for &(v, w) in neighbors {
                if u != v {
                    *e[u].entry(v).or_insert(0.0) += w / (2.0 * m);
                }
            }
        }

        let mut merges = 0;
        loop {
            let mut best: Option<(f64, usize, usize)> = None;
            for i in 0..n {
                if !alive[i] {
                    continue;
                }
                for (&j, &eij) in e[i].range(i + 1..) {
                    let gain = 2.0 * (eij - resolution * a[i] * a[j]);
                    if best.map_or(true, |(b, _, _)| gain > b) {
                        best = Some((gain, i, j));
                    }
                }
            }

            let (i, j) = match best {
                Some((gain, i, j)) if gain > 0.0 => (i, j),
                _ => break,
            };

            // Fold j into i
            let moved = std::mem::take(&mut members[j]);
            members[i].extend(moved);
            a[i] += a[j];
            a[j] = 0.0;
            alive[j] = false;

            let row_j = std::mem::take(&mut e[j]);
            e[i].remove(&j);
            for (k, ejk) in row_j {
                if k == i {
                    continue;
                }
                e[k].remove(&j);
                *e[i].entry(k).or_insert(0.0) += ejk;
                *e[k].entry(i).or_insert(0.0) += ejk;
            }
            merges += 1;
        }
        debug!(merges, "greedy modularity finished");
    }

    let mut groups: Vec<Vec<usize>> = members
        .into_iter()
        .zip(alive)
        .filter(|(_, alive)| *alive)
        .map(|(mut group, _)| {
            group.sort_unstable();
            group
        })
        .collect();
    groups.sort_by(|x, y| y.len().cmp(&x.len()).then(x[0].cmp(&y[0])));

    let mut membership = vec![0; n];
    for (c, group) in groups.iter().enumerate() {
        for &idx in group {
            membership[idx] = c;
        }
    }

    let communities: Vec<Vec<NodeId>> = groups
        .iter()
        .map(|group| group.iter().map(|&idx| view.index_to_node[idx]).collect())
        .collect();

    CommunityResult {
        communities,
        modularity: adjacency.modularity(&membership, resolution),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::test_support::undirected;

    #[test]
    fn test_greedy_two_triangles() {
        let view = undirected(
            6,
            &[(0, 1, 1.0), (1, 2, 1.0), (2, 0, 1.0), (3, 4, 1.0), (4, 5, 1.0), (5, 3, 1.0)],
        );
        let result = greedy_modularity(&view, 1.0);
        assert_eq!(result.communities, vec![vec![0, 1, 2], vec![3, 4, 5]]);
        assert!((result.modularity - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_greedy_edgeless_graph_is_singletons() {
        let view = undirected(3, &[]);
        let result = greedy_modularity(&view, 1.0);
        assert_eq!(result.communities, vec![vec![0], vec![1], vec![2]]);
        assert_eq!(result.modularity, 0.0);
    }

    #[test]
    fn test_greedy_largest_first() {
        // Triangle 3-4-5 plus a lone edge 0-1, node 2 isolated
        let view = undirected(6, &[(0, 1, 1.0), (3, 4, 1.0), (4, 5, 1.0), (5, 3, 1.0)]);
        let result = greedy_modularity(&view, 1.0);
        assert_eq!(result.communities, vec![vec![3, 4, 5], vec![0, 1], vec![2]]);
    }
}
