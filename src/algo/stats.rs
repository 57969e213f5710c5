//! Whole-graph statistics and per-node summaries

use crate::graph::{GraphResult, GraphStore, NodeAttributes, NodeKey};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// A single statistic value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatValue {
    Count(usize),
    Real(f64),
    Flag(bool),
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Count(n) => write!(f, "{}", n),
            StatValue::Real(x) => write!(f, "{:.4}", x),
            StatValue::Flag(b) => write!(f, "{}", b),
        }
    }
}

/// Summary statistics of a graph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStatistics {
    pub node_count: usize,
    pub edge_count: usize,
    pub density: f64,
    /// Always true: the store is directed
    pub is_directed: bool,
    pub weakly_connected_components: usize,
    /// `2E / N`, 0 for an empty graph
    pub average_degree: f64,
    pub is_weakly_connected: bool,
}

impl GraphStatistics {
    /// Labelled view, in report order
    pub fn to_map(&self) -> IndexMap<&'static str, StatValue> {
        let mut map = IndexMap::new();
        map.insert("Number of nodes", StatValue::Count(self.node_count));
        map.insert("Number of edges", StatValue::Count(self.edge_count));
        map.insert("Density", StatValue::Real(self.density));
        map.insert("Is directed", StatValue::Flag(self.is_directed));
        map.insert(
            "Number of weakly connected components",
            StatValue::Count(self.weakly_connected_components),
        );
        map.insert("Average degree", StatValue::Real(self.average_degree));
        map.insert("Is weakly connected", StatValue::Flag(self.is_weakly_connected));
        map
    }
}

pub fn basic_stats(store: &GraphStore) -> GraphStatistics {
    let n = store.node_count();
    let e = store.edge_count();
    let components = store.weakly_connected_component_count();
    GraphStatistics {
        node_count: n,
        edge_count: e,
        density: store.density(),
        is_directed: true,
        weakly_connected_components: components,
        average_degree: if n == 0 { 0.0 } else { 2.0 * e as f64 / n as f64 },
        is_weakly_connected: components <= 1,
    }
}

/// Attributes, degrees and successors of one node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeInfo {
    pub key: NodeKey,
    #[serde(flatten)]
    pub attributes: NodeAttributes,
    pub degree: usize,
    pub in_degree: usize,
    pub out_degree: usize,
    /// Successors in edge insertion order
    pub neighbors: Vec<NodeKey>,
}

pub fn node_info(store: &GraphStore, key: &NodeKey) -> GraphResult<NodeInfo> {
    let neighbors = store.neighbors(key)?;
    let in_degree = store.in_degree(key)?;
    let out_degree = store.out_degree(key)?;
    let attributes = store.node(key).cloned().unwrap_or_default();
    Ok(NodeInfo {
        key: key.clone(),
        attributes,
        degree: in_degree + out_degree,
        in_degree,
        out_degree,
        neighbors,
    })
}
