//! Core type definitions for the knowledge graph

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique key of a node: an integer or a string.
///
/// Integer and string keys never compare equal (`1` and `"1"` are distinct nodes).
/// Integers order before strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(untagged)]
pub enum NodeKey {
    Int(i64),
    Str(String),
}

impl NodeKey {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            NodeKey::Int(i) => Some(*i),
            NodeKey::Str(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            NodeKey::Int(_) => None,
            NodeKey::Str(s) => Some(s),
        }
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKey::Int(i) => write!(f, "{}", i),
            NodeKey::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for NodeKey {
    fn from(i: i64) -> Self {
        NodeKey::Int(i)
    }
}

impl From<i32> for NodeKey {
    fn from(i: i32) -> Self {
        NodeKey::Int(i as i64)
    }
}

impl From<String> for NodeKey {
    fn from(s: String) -> Self {
        NodeKey::Str(s)
    }
}

impl From<&str> for NodeKey {
    fn from(s: &str) -> Self {
        NodeKey::Str(s.to_string())
    }
}

impl From<&NodeKey> for NodeKey {
    fn from(key: &NodeKey) -> Self {
        key.clone()
    }
}

/// What `add_edge` does with endpoints that are not yet nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeMode {
    /// Create missing endpoints as bare nodes
    #[default]
    Permissive,
    /// Reject the edge
    Strict,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_key() {
        let id = NodeKey::from(42);
        assert_eq!(id.as_int(), Some(42));
        assert_eq!(format!("{}", id), "42");

        let name: NodeKey = "mona_lisa".into();
        assert_eq!(name.as_str(), Some("mona_lisa"));
        assert_eq!(name.as_int(), None);
    }

    #[test]
    fn test_int_and_str_keys_differ() {
        assert_ne!(NodeKey::from(1), NodeKey::from("1"));
    }

    #[test]
    fn test_key_ordering() {
        let mut keys = vec![NodeKey::from("b"), NodeKey::from(2), NodeKey::from("a"), NodeKey::from(1)];
        keys.sort();
        assert_eq!(
            keys,
            vec![NodeKey::from(1), NodeKey::from(2), NodeKey::from("a"), NodeKey::from("b")]
        );
    }

    #[test]
    fn test_key_serde_untagged() {
        let keys: Vec<NodeKey> = serde_json::from_str(r#"[7, "flight"]"#).unwrap();
        assert_eq!(keys, vec![NodeKey::Int(7), NodeKey::Str("flight".into())]);
        assert_eq!(serde_json::to_string(&keys).unwrap(), r#"[7,"flight"]"#);
    }

    #[test]
    fn test_edge_mode_default() {
        assert_eq!(EdgeMode::default(), EdgeMode::Permissive);
    }
}
