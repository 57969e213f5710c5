//! Community detection with Louvain to greedy-modularity fallback

use super::{build_undirected_view, build_view, key_of};
use crate::graph::{GraphStore, NodeKey};
use kgraph_algorithms::{greedy_modularity, louvain, CommunityError, CommunityResult, LouvainConfig};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::{info, warn};

/// Community detection algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommunityMethod {
    /// Multi-level modularity optimization on edge weights
    #[default]
    Louvain,
    /// Clauset-Newman-Moore agglomeration, unweighted
    Greedy,
}

impl fmt::Display for CommunityMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommunityMethod::Louvain => write!(f, "louvain"),
            CommunityMethod::Greedy => write!(f, "greedy"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown community method '{0}', expected 'louvain' or 'greedy'")]
pub struct UnknownMethod(pub String);

impl FromStr for CommunityMethod {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "louvain" => Ok(CommunityMethod::Louvain),
            "greedy" | "greedy_modularity" => Ok(CommunityMethod::Greedy),
            other => Err(UnknownMethod(other.to_string())),
        }
    }
}

/// Community detection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommunityConfig {
    /// Method used by [`detect_with_config`]
    pub method: CommunityMethod,
    pub resolution: f64,
    /// Louvain visiting-order seed; unset visits nodes in insertion order
    pub seed: Option<u64>,
}

impl Default for CommunityConfig {
    fn default() -> Self {
        Self {
            method: CommunityMethod::default(),
            resolution: 1.0,
            seed: None,
        }
    }
}

/// Disjoint communities covering every node exactly once
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Partition {
    communities: Vec<Vec<NodeKey>>,
}

impl Partition {
    pub fn new(communities: Vec<Vec<NodeKey>>) -> Self {
        Partition { communities }
    }

    fn from_result(store: &GraphStore, result: &CommunityResult) -> Self {
        let communities = result
            .communities
            .iter()
            .map(|members| members.iter().filter_map(|&id| key_of(store, id)).collect())
            .collect();
        Partition { communities }
    }

    pub fn communities(&self) -> &[Vec<NodeKey>] {
        &self.communities
    }

    pub fn len(&self) -> usize {
        self.communities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.communities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vec<NodeKey>> {
        self.communities.iter()
    }

    /// Position of the community holding `key`
    pub fn community_of(&self, key: &NodeKey) -> Option<usize> {
        self.communities.iter().position(|c| c.contains(key))
    }

    /// Total number of assigned nodes
    pub fn node_count(&self) -> usize {
        self.communities.iter().map(Vec::len).sum()
    }

    pub fn into_inner(self) -> Vec<Vec<NodeKey>> {
        self.communities
    }
}

/// Outcome of [`detect_communities`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CommunityDetection {
    /// The requested method produced the partition
    Detected {
        method: CommunityMethod,
        partition: Partition,
        modularity: f64,
    },
    /// Louvain failed and greedy modularity ran instead
    FellBack {
        requested: CommunityMethod,
        used: CommunityMethod,
        reason: CommunityError,
        partition: Partition,
        modularity: f64,
    },
}

impl CommunityDetection {
    pub fn partition(&self) -> &Partition {
        match self {
            CommunityDetection::Detected { partition, .. } => partition,
            CommunityDetection::FellBack { partition, .. } => partition,
        }
    }

    pub fn into_partition(self) -> Partition {
        match self {
            CommunityDetection::Detected { partition, .. } => partition,
            CommunityDetection::FellBack { partition, .. } => partition,
        }
    }

    /// Method that actually produced the partition
    pub fn method_used(&self) -> CommunityMethod {
        match self {
            CommunityDetection::Detected { method, .. } => *method,
            CommunityDetection::FellBack { used, .. } => *used,
        }
    }

    pub fn modularity(&self) -> f64 {
        match self {
            CommunityDetection::Detected { modularity, .. } => *modularity,
            CommunityDetection::FellBack { modularity, .. } => *modularity,
        }
    }

    pub fn fell_back(&self) -> bool {
        matches!(self, CommunityDetection::FellBack { .. })
    }
}

fn run_greedy(store: &GraphStore, config: &CommunityConfig) -> CommunityResult {
    let view = build_undirected_view(store, false);
    greedy_modularity(&view, config.resolution)
}

/// Partition the undirected projection into communities.
///
/// Louvain runs on edge weights. If it fails (no edges, an invalid weight, or
/// non-finite modularity) greedy modularity runs instead and the outcome says so.
/// Greedy ignores weights and never fails.
pub fn detect_communities(
    store: &GraphStore,
    method: CommunityMethod,
    config: &CommunityConfig,
) -> CommunityDetection {
    let detection = match method {
        CommunityMethod::Louvain => {
            let view = build_undirected_view(store, true);
            let louvain_config = LouvainConfig {
                resolution: config.resolution,
                seed: config.seed,
                ..Default::default()
            };
            match louvain(&view, &louvain_config) {
                Ok(result) => CommunityDetection::Detected {
                    method,
                    partition: Partition::from_result(store, &result),
                    modularity: result.modularity,
                },
                Err(reason) => {
                    warn!(%reason, "Louvain failed, falling back to greedy modularity");
                    let result = run_greedy(store, config);
                    CommunityDetection::FellBack {
                        requested: method,
                        used: CommunityMethod::Greedy,
                        reason,
                        partition: Partition::from_result(store, &result),
                        modularity: result.modularity,
                    }
                }
            }
        }
        CommunityMethod::Greedy => {
            let result = run_greedy(store, config);
            CommunityDetection::Detected {
                method,
                partition: Partition::from_result(store, &result),
                modularity: result.modularity,
            }
        }
    };

    info!(
        method = %detection.method_used(),
        communities = detection.partition().len(),
        modularity = detection.modularity(),
        "Community detection finished"
    );
    detection
}

/// [`detect_communities`] with the method named in `config`
pub fn detect_with_config(store: &GraphStore, config: &CommunityConfig) -> CommunityDetection {
    detect_communities(store, config.method, config)
}

/// Modularity of `partition` on the unweighted undirected projection (resolution 1).
///
/// Nodes the partition does not mention count as singleton communities; unknown keys are ignored.
pub fn modularity(store: &GraphStore, partition: &Partition) -> f64 {
    let n = store.node_count();
    let mut membership: Vec<Option<usize>> = vec![None; n];
    for (community, members) in partition.iter().enumerate() {
        for key in members {
            if let Some(idx) = store.index_of(key) {
                membership[idx].get_or_insert(community);
            }
        }
    }
    let mut next = partition.len();
    let membership: Vec<usize> = membership
        .into_iter()
        .map(|slot| {
            slot.unwrap_or_else(|| {
                next += 1;
                next - 1
            })
        })
        .collect();

    let view = build_undirected_view(store, false);
    kgraph_algorithms::modularity(&view, &membership, 1.0)
}

/// Weakly connected components, ordered by first member; members in insertion order
pub fn weakly_connected_components(store: &GraphStore) -> Vec<Vec<NodeKey>> {
    let view = build_view(store, false);
    kgraph_algorithms::weakly_connected_components(&view)
        .components
        .iter()
        .map(|members| members.iter().filter_map(|&id| key_of(store, id)).collect())
        .collect()
}
