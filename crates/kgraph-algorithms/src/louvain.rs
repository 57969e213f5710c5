//! Louvain community detection (Blondel et al. 2008)
//!
//! Multi-level modularity optimization over a symmetric weighted view:
//! local moving until no node changes community, then aggregation of each
//! community into a single node, repeated while modularity keeps improving.

use super::common::GraphView;
use super::community::{group_by_membership, CommunityError, CommunityResult, WeightedAdjacency};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Louvain configuration
#[derive(Debug, Clone, PartialEq)]
pub struct LouvainConfig {
    /// Resolution parameter (1.0 = standard modularity)
    pub resolution: f64,
    /// Shuffle the node visiting order with this seed; `None` visits nodes in index order
    pub seed: Option<u64>,
    /// Minimum modularity gain for another pass or level
    pub threshold: f64,
}

impl Default for LouvainConfig {
    fn default() -> Self {
        Self {
            resolution: 1.0,
            seed: None,
            threshold: 1e-7,
        }
    }
}

/// Neighbouring community weights of `node`, in first-seen order, self-loops excluded
fn neighbor_communities(level: &WeightedAdjacency, node: usize, node2com: &[usize]) -> Vec<(usize, f64)> {
    let mut slots: HashMap<usize, usize> = HashMap::new();
    let mut weights: Vec<(usize, f64)> = Vec::new();
    for &(v, w) in &level.adj[node] {
        if v == node {
            continue;
        }
        let com = node2com[v];
        match slots.get(&com) {
            Some(&slot) => weights[slot].1 += w,
            None => {
                slots.insert(com, weights.len());
                weights.push((com, w));
            }
        }
    }
    weights
}

/// Local moving phase. Returns the assignment and whether any node moved.
fn one_level(
    level: &WeightedAdjacency,
    order: &[usize],
    config: &LouvainConfig,
) -> (Vec<usize>, bool) {
    let n = level.len();
    let m = level.total_weight();
    let resolution = config.resolution;

    let mut node2com: Vec<usize> = (0..n).collect();
    let mut tot: Vec<f64> = level.degree.clone();
    let mut current = level.modularity(&node2com, resolution);
    let mut moved_any = false;

    loop {
        let mut moved = false;

        for &node in order {
            let com_node = node2com[node];
            let degree = level.degree[node];
            let degc_totw = degree / (2.0 * m);
            let neighbors = neighbor_communities(level, node, &node2com);

            let own_weight = neighbors
                .iter()
                .find(|(c, _)| *c == com_node)
                .map_or(0.0, |&(_, w)| w);
            let remove_cost = -own_weight + resolution * (tot[com_node] - degree) * degc_totw;
            tot[com_node] -= degree;

            let mut best_com = com_node;
            let mut best_increase = 0.0;
            for &(com, dnc) in &neighbors {
                let increase = remove_cost + dnc - resolution * tot[com] * degc_totw;
                if increase > best_increase {
                    best_increase = increase;
                    best_com = com;
                }
            }

            tot[best_com] += degree;
            node2com[node] = best_com;
            if best_com != com_node {
                moved = true;
            }
        }

        if !moved {
            break;
        }
        moved_any = true;

        let next = level.modularity(&node2com, resolution);
        if next - current < config.threshold {
            break;
        }
        current = next;
    }

    (node2com, moved_any)
}

/// Relabel communities `0..count` in order of first appearance
fn renumber(node2com: &[usize]) -> (Vec<usize>, usize) {
    let mut labels: HashMap<usize, usize> = HashMap::new();
    let assignment = node2com
        .iter()
        .map(|c| {
            let next = labels.len();
            *labels.entry(*c).or_insert(next)
        })
        .collect();
    (assignment, labels.len())
}

/// Collapse every community into one node; internal weight becomes a self-loop
fn induce(level: &WeightedAdjacency, assignment: &[usize], count: usize) -> WeightedAdjacency {
    let mut merged: BTreeMap<(usize, usize), f64> = BTreeMap::new();
    for (u, neighbors) in level.adj.iter().enumerate() {
        for &(v, w) in neighbors {
            // Each non-loop edge is stored in both directions; keep one
            if v < u {
                continue;
            }
            let (a, b) = (assignment[u], assignment[v]);
            *merged.entry((a.min(b), a.max(b))).or_insert(0.0) += w;
        }
    }
    WeightedAdjacency::from_edges(count, merged.into_iter().map(|((a, b), w)| (a, b, w)))
}

/// Louvain community detection over a symmetric view.
///
/// Fails when modularity is undefined (no edge weight), when a weight is negative or
/// non-finite, or when modularity is not a finite number (overflowing total weight,
/// a resolution that is not a positive finite number).
pub fn louvain(view: &GraphView, config: &LouvainConfig) -> Result<CommunityResult, CommunityError> {
    let base = WeightedAdjacency::from_view(view);

    if let Some(w) = base.invalid_weight() {
        return Err(CommunityError::InvalidWeight(w));
    }
    if base.total_weight() <= 0.0 {
        return Err(CommunityError::NoEdges);
    }

    let resolution = config.resolution;
    let mut rng = config.seed.map(StdRng::seed_from_u64);
    let mut membership: Vec<usize> = (0..view.node_count).collect();
    let mut level = base.clone();
    let mut current = base.modularity(&membership, resolution);
    if !base.total_weight().is_finite() || !resolution.is_finite() || resolution <= 0.0 || !current.is_finite() {
        return Err(CommunityError::NumericalInstability(0));
    }
    let mut depth = 0;

    loop {
        let mut order: Vec<usize> = (0..level.len()).collect();
        if let Some(rng) = rng.as_mut() {
            order.shuffle(rng);
        }

        let (node2com, moved) = one_level(&level, &order, config);
        if !moved {
            break;
        }

        let (assignment, count) = renumber(&node2com);
        for c in membership.iter_mut() {
            *c = assignment[*c];
        }

        let next = base.modularity(&membership, resolution);
        if !next.is_finite() {
            return Err(CommunityError::NumericalInstability(depth));
        }
        debug!(level = depth, communities = count, modularity = next, "louvain level complete");

        level = induce(&level, &assignment, count);
        depth += 1;

        if next - current < config.threshold {
            current = next;
            break;
        }
        current = next;
    }

    if !current.is_finite() {
        return Err(CommunityError::NumericalInstability(depth));
    }

    Ok(CommunityResult {
        communities: group_by_membership(view, &membership),
        modularity: current,
    })
}
