//! In-memory graph storage implementation
//!
//! The store owns a directed graph with at most one edge per ordered pair.
//! Nodes and edges keep their first-insertion position for their whole lifetime,
//! which is the order every query and algorithm iterates in.

use super::edge::EdgeAttributes;
use super::node::NodeAttributes;
use super::property::PropertyMap;
use super::types::{EdgeMode, NodeKey};
use crate::config::AnalyticsConfig;
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during graph operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Node {0} not found")]
    NodeNotFound(NodeKey),

    #[error("Invalid edge: source node {0} does not exist")]
    InvalidEdgeSource(NodeKey),

    #[error("Invalid edge: target node {0} does not exist")]
    InvalidEdgeTarget(NodeKey),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// In-memory directed graph storage
///
/// - nodes: NodeKey -> attributes, in insertion order (dense index = position)
/// - edges: (source index, target index) -> attributes, in insertion order
/// - outgoing / incoming: adjacency by dense index, in edge insertion order
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    mode: EdgeMode,

    nodes: IndexMap<NodeKey, NodeAttributes>,

    edges: IndexMap<(usize, usize), EdgeAttributes>,

    /// Outgoing neighbours for each node (adjacency list)
    outgoing: Vec<Vec<usize>>,

    /// Incoming neighbours for each node (adjacency list)
    incoming: Vec<Vec<usize>>,
}

impl GraphStore {
    /// Create a new empty graph store that auto-creates missing edge endpoints
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty graph store with the given endpoint policy
    pub fn with_mode(mode: EdgeMode) -> Self {
        GraphStore {
            mode,
            ..Self::default()
        }
    }

    pub fn from_config(config: &AnalyticsConfig) -> Self {
        Self::with_mode(config.edge_mode)
    }

    pub fn mode(&self) -> EdgeMode {
        self.mode
    }

    fn ensure_node(&mut self, key: NodeKey) -> usize {
        if let Some(idx) = self.nodes.get_index_of(&key) {
            return idx;
        }
        let (idx, _) = self.nodes.insert_full(key, NodeAttributes::default());
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        idx
    }

    /// Insert a node, or replace all attributes of an existing one
    pub fn add_node(&mut self, key: impl Into<NodeKey>, attributes: NodeAttributes) {
        let (idx, _) = self.nodes.insert_full(key.into(), attributes);
        if idx == self.outgoing.len() {
            self.outgoing.push(Vec::new());
            self.incoming.push(Vec::new());
        }
    }

    /// Insert a directed edge, or replace the attributes of an existing one.
    ///
    /// In [`EdgeMode::Permissive`] missing endpoints are created (source first) and this
    /// never fails. In [`EdgeMode::Strict`] a missing endpoint rejects the edge and the
    /// store is left untouched.
    pub fn add_edge(
        &mut self,
        source: impl Into<NodeKey>,
        target: impl Into<NodeKey>,
        attributes: EdgeAttributes,
    ) -> GraphResult<()> {
        let source = source.into();
        let target = target.into();

        let (s, t) = match self.mode {
            EdgeMode::Permissive => (self.ensure_node(source), self.ensure_node(target)),
            EdgeMode::Strict => {
                let s = self
                    .index_of(&source)
                    .ok_or_else(|| GraphError::InvalidEdgeSource(source.clone()))?;
                let t = self
                    .index_of(&target)
                    .ok_or_else(|| GraphError::InvalidEdgeTarget(target.clone()))?;
                (s, t)
            }
        };

        let (_, previous) = self.edges.insert_full((s, t), attributes);
        if previous.is_none() {
            self.outgoing[s].push(t);
            self.incoming[t].push(s);
        }
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// `edges / (nodes * (nodes - 1))`, zero for fewer than two nodes
    pub fn density(&self) -> f64 {
        let n = self.node_count();
        if n <= 1 {
            return 0.0;
        }
        self.edge_count() as f64 / (n * (n - 1)) as f64
    }

    pub fn contains_node(&self, key: &NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    pub fn node(&self, key: &NodeKey) -> Option<&NodeAttributes> {
        self.nodes.get(key)
    }

    pub fn edge(&self, source: &NodeKey, target: &NodeKey) -> Option<&EdgeAttributes> {
        let s = self.index_of(source)?;
        let t = self.index_of(target)?;
        self.edges.get(&(s, t))
    }

    pub fn has_edge(&self, source: &NodeKey, target: &NodeKey) -> bool {
        self.edge(source, target).is_some()
    }

    /// Dense index of a node (its insertion position)
    pub fn index_of(&self, key: &NodeKey) -> Option<usize> {
        self.nodes.get_index_of(key)
    }

    /// Node key at a dense index
    pub fn key_at(&self, idx: usize) -> Option<&NodeKey> {
        self.nodes.get_index(idx).map(|(key, _)| key)
    }

    fn require(&self, key: &NodeKey) -> GraphResult<usize> {
        self.index_of(key).ok_or_else(|| GraphError::NodeNotFound(key.clone()))
    }

    pub fn in_degree(&self, key: &NodeKey) -> GraphResult<usize> {
        Ok(self.incoming[self.require(key)?].len())
    }

    pub fn out_degree(&self, key: &NodeKey) -> GraphResult<usize> {
        Ok(self.outgoing[self.require(key)?].len())
    }

    /// `in_degree + out_degree`; a self-loop counts in both
    pub fn degree(&self, key: &NodeKey) -> GraphResult<usize> {
        let idx = self.require(key)?;
        Ok(self.incoming[idx].len() + self.outgoing[idx].len())
    }

    /// Successors of a node, in edge insertion order
    pub fn neighbors(&self, key: &NodeKey) -> GraphResult<Vec<NodeKey>> {
        let idx = self.require(key)?;
        Ok(self.outgoing[idx]
            .iter()
            .filter_map(|&t| self.key_at(t).cloned())
            .collect())
    }

    /// Predecessors of a node, in edge insertion order
    pub fn predecessors(&self, key: &NodeKey) -> GraphResult<Vec<NodeKey>> {
        let idx = self.require(key)?;
        Ok(self.incoming[idx]
            .iter()
            .filter_map(|&s| self.key_at(s).cloned())
            .collect())
    }

    /// Number of components when edge direction is ignored
    pub fn weakly_connected_component_count(&self) -> usize {
        let view = crate::algo::build_view(self, false);
        kgraph_algorithms::weakly_connected_components(&view).component_count()
    }

    /// True iff one weak component spans every node. The empty graph counts as connected.
    pub fn is_weakly_connected(&self) -> bool {
        self.node_count() == 0 || self.weakly_connected_component_count() == 1
    }

    /// Undirected projection: `{u, v}` exists iff `u -> v` or `v -> u` does.
    ///
    /// Edges are applied in insertion order, so when both directions exist the
    /// later-inserted edge supplies the attributes.
    pub fn to_undirected_view(&self) -> UndirectedGraph {
        let mut edges: IndexMap<(usize, usize), EdgeAttributes> = IndexMap::with_capacity(self.edges.len());
        for (&(s, t), attrs) in &self.edges {
            edges.insert((s.min(t), s.max(t)), attrs.clone());
        }
        UndirectedGraph {
            nodes: self.nodes.keys().cloned().collect(),
            edges,
        }
    }

    /// All nodes with attributes, in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = (&NodeKey, &NodeAttributes)> {
        self.nodes.iter()
    }

    /// All edges with attributes, in insertion order
    pub fn edges(&self) -> impl Iterator<Item = (&NodeKey, &NodeKey, &EdgeAttributes)> {
        self.edges.iter().filter_map(move |(&(s, t), attrs)| {
            Some((self.key_at(s)?, self.key_at(t)?, attrs))
        })
    }

    /// Edges by dense index, in insertion order
    pub(crate) fn indexed_edges(&self) -> impl Iterator<Item = (usize, usize, &EdgeAttributes)> {
        self.edges.iter().map(|(&(s, t), attrs)| (s, t, attrs))
    }

    /// Keys of the nodes whose category equals `category`
    pub fn nodes_in_category(&self, category: &str) -> Vec<&NodeKey> {
        self.nodes
            .iter()
            .filter(|(_, attrs)| attrs.category.as_deref() == Some(category))
            .map(|(key, _)| key)
            .collect()
    }

    /// Serializable copy of the whole graph for export collaborators
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            directed: true,
            nodes: self
                .nodes
                .iter()
                .map(|(key, attributes)| NodeEntry {
                    key: key.clone(),
                    attributes: attributes.clone(),
                })
                .collect(),
            edges: self
                .edges()
                .map(|(source, target, attributes)| EdgeEntry {
                    source: source.clone(),
                    target: target.clone(),
                    weight: attributes.weight(),
                    relationship: attributes.relationship.clone(),
                    extra: attributes.extra.clone(),
                })
                .collect(),
        }
    }
}

/// Undirected projection of a [`GraphStore`]
#[derive(Debug, Clone)]
pub struct UndirectedGraph {
    nodes: IndexSet<NodeKey>,
    /// Keyed by (lower index, higher index)
    edges: IndexMap<(usize, usize), EdgeAttributes>,
}

impl UndirectedGraph {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edge(&self, a: &NodeKey, b: &NodeKey) -> Option<&EdgeAttributes> {
        let a = self.nodes.get_index_of(a)?;
        let b = self.nodes.get_index_of(b)?;
        self.edges.get(&(a.min(b), a.max(b)))
    }

    pub fn contains_edge(&self, a: &NodeKey, b: &NodeKey) -> bool {
        self.edge(a, b).is_some()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &NodeKey> {
        self.nodes.iter()
    }

    /// Edges in projection order; endpoints ordered by node position
    pub fn edges(&self) -> impl Iterator<Item = (&NodeKey, &NodeKey, &EdgeAttributes)> {
        self.edges.iter().filter_map(move |(&(a, b), attrs)| {
            Some((self.nodes.get_index(a)?, self.nodes.get_index(b)?, attrs))
        })
    }

    pub(crate) fn indexed_edges(&self) -> impl Iterator<Item = (usize, usize, &EdgeAttributes)> {
        self.edges.iter().map(|(&(a, b), attrs)| (a, b, attrs))
    }
}

/// A node as handed to export collaborators
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeEntry {
    pub key: NodeKey,
    #[serde(flatten)]
    pub attributes: NodeAttributes,
}

/// An edge as handed to export collaborators; `weight` is the effective weight
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeEntry {
    pub source: NodeKey,
    pub target: NodeKey,
    pub weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
    #[serde(skip_serializing_if = "PropertyMap::is_empty")]
    pub extra: PropertyMap,
}

/// Full node and edge sets of a store
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphSnapshot {
    pub directed: bool,
    pub nodes: Vec<NodeEntry>,
    pub edges: Vec<EdgeEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> NodeKey {
        NodeKey::from(s)
    }

    #[test]
    fn test_add_node_overwrites() {
        let mut store = GraphStore::new();
        store.add_node("flight", NodeAttributes::new("Flight", "Engineering").with_description("Ornithopter"));
        store.add_node("anatomy", NodeAttributes::new("Anatomy", "Anatomy"));
        store.add_node("flight", NodeAttributes::new("Flying machine", "Science"));

        assert_eq!(store.node_count(), 2);
        let attrs = store.node(&key("flight")).unwrap();
        assert_eq!(attrs.name.as_deref(), Some("Flying machine"));
        assert_eq!(attrs.category.as_deref(), Some("Science"));
        // Replaced wholesale, not merged
        assert_eq!(attrs.description, None);
        // Position kept
        assert_eq!(store.index_of(&key("flight")), Some(0));
    }

    #[test]
    fn test_add_edge_autocreates_endpoints() {
        let mut store = GraphStore::new();
        store.add_edge("a", "b", EdgeAttributes::new("inspires")).unwrap();

        assert_eq!(store.node_count(), 2);
        assert!(store.node(&key("a")).unwrap().is_empty());
        assert_eq!(store.key_at(0), Some(&key("a")));
        assert_eq!(store.key_at(1), Some(&key("b")));
    }

    #[test]
    fn test_strict_mode_rejects_unknown_endpoints() {
        let mut store = GraphStore::with_mode(EdgeMode::Strict);
        store.add_node("a", NodeAttributes::new("A", "Art"));

        assert_eq!(
            store.add_edge("a", "b", EdgeAttributes::default()),
            Err(GraphError::InvalidEdgeTarget(key("b")))
        );
        assert_eq!(
            store.add_edge("z", "a", EdgeAttributes::default()),
            Err(GraphError::InvalidEdgeSource(key("z")))
        );
        assert_eq!(store.node_count(), 1);
        assert_eq!(store.edge_count(), 0);
    }

    #[test]
    fn test_edge_reinsertion_overwrites() {
        let mut store = GraphStore::new();
        store.add_edge("a", "b", EdgeAttributes::new("sketches").with_weight(2.0)).unwrap();
        store.add_edge("a", "b", EdgeAttributes::new("paints")).unwrap();

        assert_eq!(store.edge_count(), 1);
        assert_eq!(store.out_degree(&key("a")).unwrap(), 1);
        let attrs = store.edge(&key("a"), &key("b")).unwrap();
        assert_eq!(attrs.relationship.as_deref(), Some("paints"));
        assert_eq!(attrs.weight(), 1.0);
    }

    #[test]
    fn test_degrees_and_neighbors() {
        let mut store = GraphStore::new();
        store.add_edge("a", "b", EdgeAttributes::default()).unwrap();
        store.add_edge("a", "c", EdgeAttributes::default()).unwrap();
        store.add_edge("c", "a", EdgeAttributes::default()).unwrap();

        assert_eq!(store.out_degree(&key("a")).unwrap(), 2);
        assert_eq!(store.in_degree(&key("a")).unwrap(), 1);
        assert_eq!(store.degree(&key("a")).unwrap(), 3);
        assert_eq!(store.neighbors(&key("a")).unwrap(), vec![key("b"), key("c")]);
        assert_eq!(store.predecessors(&key("a")).unwrap(), vec![key("c")]);
        assert!(store.neighbors(&key("b")).unwrap().is_empty());
        assert_eq!(store.neighbors(&key("x")), Err(GraphError::NodeNotFound(key("x"))));
        assert_eq!(store.degree(&key("x")), Err(GraphError::NodeNotFound(key("x"))));
    }

    #[test]
    fn test_self_loop_degree() {
        let mut store = GraphStore::new();
        store.add_edge("a", "a", EdgeAttributes::default()).unwrap();
        assert_eq!(store.degree(&key("a")).unwrap(), 2);
        assert_eq!(store.neighbors(&key("a")).unwrap(), vec![key("a")]);
    }

    #[test]
    fn test_density() {
        let mut store = GraphStore::new();
        assert_eq!(store.density(), 0.0);
        store.add_node("a", NodeAttributes::default());
        assert_eq!(store.density(), 0.0);
        store.add_edge("a", "b", EdgeAttributes::default()).unwrap();
        store.add_edge("b", "c", EdgeAttributes::default()).unwrap();
        // 2 edges over 3 * 2 ordered pairs
        assert!((store.density() - 2.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_weak_connectivity() {
        let mut store = GraphStore::new();
        assert!(store.is_weakly_connected());
        assert_eq!(store.weakly_connected_component_count(), 0);

        store.add_edge("a", "b", EdgeAttributes::default()).unwrap();
        store.add_edge("c", "b", EdgeAttributes::default()).unwrap();
        assert!(store.is_weakly_connected());

        store.add_node("d", NodeAttributes::default());
        assert!(!store.is_weakly_connected());
        assert_eq!(store.weakly_connected_component_count(), 2);
    }

    #[test]
    fn test_undirected_view_last_applied_wins() {
        let mut store = GraphStore::new();
        store.add_edge("a", "b", EdgeAttributes::new("teaches").with_weight(1.0)).unwrap();
        store.add_edge("b", "c", EdgeAttributes::default()).unwrap();
        store.add_edge("b", "a", EdgeAttributes::new("learns").with_weight(4.0)).unwrap();

        let undirected = store.to_undirected_view();
        assert_eq!(undirected.node_count(), 3);
        assert_eq!(undirected.edge_count(), 2);

        let ab = undirected.edge(&key("b"), &key("a")).unwrap();
        assert_eq!(ab.relationship.as_deref(), Some("learns"));
        assert_eq!(ab.weight(), 4.0);

        let order: Vec<_> = undirected.edges().map(|(a, b, _)| (a.clone(), b.clone())).collect();
        assert_eq!(order, vec![(key("a"), key("b")), (key("b"), key("c"))]);
    }

    #[test]
    fn test_nodes_in_category() {
        let mut store = GraphStore::new();
        store.add_node(1, NodeAttributes::new("Mona Lisa", "Art"));
        store.add_node(2, NodeAttributes::new("Helicopter", "Engineering"));
        store.add_node(3, NodeAttributes::new("Last Supper", "Art"));

        assert_eq!(store.nodes_in_category("Art"), vec![&NodeKey::from(1), &NodeKey::from(3)]);
        assert!(store.nodes_in_category("Music").is_empty());
    }

    #[test]
    fn test_snapshot_json() {
        let mut store = GraphStore::new();
        store.add_node(1, NodeAttributes::new("Mona Lisa", "Art"));
        store.add_edge(1, 2, EdgeAttributes::new("precedes")).unwrap();

        let json = serde_json::to_value(store.snapshot()).unwrap();
        assert_eq!(json["directed"], true);
        assert_eq!(json["nodes"][0]["key"], 1);
        assert_eq!(json["nodes"][0]["name"], "Mona Lisa");
        assert_eq!(json["nodes"][1]["key"], 2);
        assert_eq!(json["edges"][0]["weight"], 1.0);
        assert_eq!(json["edges"][0]["relationship"], "precedes");
    }

    #[test]
    fn test_snapshot_edge_carries_weight_once() {
        let mut store = GraphStore::new();
        store
            .add_edge("a", "b", EdgeAttributes::new("informs").with_weight(2.5).with_extra("folio", 12))
            .unwrap();

        let json = serde_json::to_value(store.snapshot()).unwrap();
        let edge = json["edges"][0].as_object().unwrap();
        assert_eq!(edge.len(), 5);
        assert!(!edge.contains_key("attributes"));
        assert_eq!(edge["weight"], 2.5);
        assert_eq!(edge["extra"]["folio"], 12);
    }

    #[test]
    fn test_store_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GraphStore>();
    }
}
