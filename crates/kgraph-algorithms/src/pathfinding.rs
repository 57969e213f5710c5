//! Pathfinding algorithms
//!
//! BFS (unweighted) and Dijkstra (weighted) shortest paths, respecting edge direction.

use super::common::{GraphView, NodeId};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

/// Result of a pathfinding algorithm
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathResult {
    pub source: NodeId,
    pub target: NodeId,
    pub path: Vec<NodeId>,
    pub cost: f64,
}

fn reconstruct(view: &GraphView, parent: &[Option<usize>], target_idx: usize) -> Vec<NodeId> {
    let mut path = Vec::new();
    let mut curr = Some(target_idx);
    while let Some(idx) = curr {
        path.push(view.index_to_node[idx]);
        curr = parent[idx];
    }
    path.reverse();
    path
}

/// Breadth-First Search (Unweighted Shortest Path)
///
/// Each node keeps the first parent that discovered it.
pub fn bfs(view: &GraphView, source: NodeId, target: NodeId) -> Option<PathResult> {
    let source_idx = *view.node_to_index.get(&source)?;
    let target_idx = *view.node_to_index.get(&target)?;

    let mut queue = VecDeque::new();
    let mut visited = vec![false; view.node_count];
    let mut parent: Vec<Option<usize>> = vec![None; view.node_count];

    queue.push_back(source_idx);
    visited[source_idx] = true;

    while let Some(current_idx) = queue.pop_front() {
        if current_idx == target_idx {
            let path = reconstruct(view, &parent, target_idx);
            return Some(PathResult {
                source,
                target,
                cost: (path.len() - 1) as f64,
                path,
            });
        }

        for &next_idx in view.successors(current_idx) {
            if !visited[next_idx] {
                visited[next_idx] = true;
                parent[next_idx] = Some(current_idx);
                queue.push_back(next_idx);
            }
        }
    }

    None
}

/// State for Dijkstra priority queue
#[derive(Copy, Clone, PartialEq)]
struct State {
    cost: f64,
    node_idx: usize,
}

impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Compare costs reversed for min-heap; equal costs pop the lower index first
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.node_idx.cmp(&self.node_idx))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dijkstra's Algorithm (Weighted Shortest Path)
///
/// Uses edge weights from GraphView if available, otherwise assumes 1.0.
/// Negative-weight edges are skipped.
pub fn dijkstra(view: &GraphView, source: NodeId, target: NodeId) -> Option<PathResult> {
    let source_idx = *view.node_to_index.get(&source)?;
    let target_idx = *view.node_to_index.get(&target)?;

    let mut dist = vec![f64::INFINITY; view.node_count];
    let mut parent: Vec<Option<usize>> = vec![None; view.node_count];
    let mut heap = BinaryHeap::new();

    dist[source_idx] = 0.0;
    heap.push(State { cost: 0.0, node_idx: source_idx });

    while let Some(State { cost, node_idx }) = heap.pop() {
        if node_idx == target_idx {
            return Some(PathResult {
                source,
                target,
                path: reconstruct(view, &parent, target_idx),
                cost,
            });
        }

        if cost > dist[node_idx] {
            continue;
        }

        for (next_idx, weight) in view.weighted_successors(node_idx) {
            if weight < 0.0 || weight.is_nan() {
                continue;
            }

            let next_cost = cost + weight;

            if next_cost < dist[next_idx] {
                dist[next_idx] = next_cost;
                parent[next_idx] = Some(node_idx);
                heap.push(State { cost: next_cost, node_idx: next_idx });
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::test_support::directed;

    #[test]
    fn test_bfs() {
        // 1->2->3
        let view = GraphView::from_edges(vec![1, 2, 3], &[(0, 1, 1.0), (1, 2, 1.0)], false);

        let result = bfs(&view, 1, 3).unwrap();
        assert_eq!(result.path, vec![1, 2, 3]);
        assert_eq!(result.cost, 2.0);
    }

    #[test]
    fn test_bfs_respects_direction() {
        let view = directed(3, &[(0, 1), (1, 2)]);
        assert!(bfs(&view, 2, 0).is_none());
    }

    #[test]
    fn test_bfs_same_node() {
        let view = directed(2, &[]);
        let result = bfs(&view, 1, 1).unwrap();
        assert_eq!(result.path, vec![1]);
        assert_eq!(result.cost, 0.0);
    }

    #[test]
    fn test_bfs_unknown_endpoint() {
        let view = directed(2, &[(0, 1)]);
        assert!(bfs(&view, 0, 42).is_none());
    }

    #[test]
    fn test_dijkstra() {
        // 1->2 (10.0), 2->3 (5.0), 1->3 (50.0)
        let view = GraphView::from_edges(
            vec![1, 2, 3],
            &[(0, 1, 10.0), (0, 2, 50.0), (1, 2, 5.0)],
            true,
        );

        let result = dijkstra(&view, 1, 3).unwrap();
        assert_eq!(result.path, vec![1, 2, 3]);
        assert_eq!(result.cost, 15.0);
    }

    #[test]
    fn test_dijkstra_skips_negative_weights() {
        let view = GraphView::from_edges(vec![0, 1], &[(0, 1, -1.0)], true);
        assert!(dijkstra(&view, 0, 1).is_none());
    }
}
