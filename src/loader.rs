//! Record loader
//!
//! Commits concept (node) and relationship (edge) rows into a [`GraphStore`].
//! Rows come from an external tabular reader as `Result<Record, E>`; they are
//! committed one at a time and the first failing row stops the load. Rows
//! committed before the failure stay in the store.
//!
//! Row numbers in errors are 1-based positions in the row sequence.

use crate::graph::{EdgeAttributes, GraphError, GraphStore, NodeAttributes, NodeKey, PropertyMap};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Source unavailable: {0}")]
    SourceUnavailable(#[from] std::io::Error),

    #[error("Malformed record at row {row}: {message}")]
    MalformedRecord { row: usize, message: String },

    #[error("Record at row {row} rejected: {source}")]
    Rejected {
        row: usize,
        #[source]
        source: GraphError,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type LoadResult<T> = Result<T, LoadError>;

/// One concept row: `id, name, category, description`
///
/// Any further columns are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeKey,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: PropertyMap,
}

impl NodeRecord {
    pub fn new(id: impl Into<NodeKey>, name: impl Into<String>, category: impl Into<String>) -> Self {
        NodeRecord {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            description: None,
            extra: PropertyMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn attributes(&self) -> NodeAttributes {
        NodeAttributes {
            name: Some(self.name.clone()),
            category: Some(self.category.clone()),
            description: self.description.clone(),
            extra: self.extra.clone(),
        }
    }
}

/// One relationship row: `source, target, relationship, weight`
///
/// Any further columns are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: NodeKey,
    pub target: NodeKey,
    #[serde(default)]
    pub relationship: Option<String>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(flatten)]
    pub extra: PropertyMap,
}

impl EdgeRecord {
    pub fn new(source: impl Into<NodeKey>, target: impl Into<NodeKey>) -> Self {
        EdgeRecord {
            source: source.into(),
            target: target.into(),
            relationship: None,
            weight: None,
            extra: PropertyMap::new(),
        }
    }

    pub fn with_relationship(mut self, relationship: impl Into<String>) -> Self {
        self.relationship = Some(relationship.into());
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    fn attributes(&self) -> EdgeAttributes {
        EdgeAttributes {
            relationship: self.relationship.clone(),
            weight: self.weight,
            extra: self.extra.clone(),
        }
    }
}

/// Rows committed by a successful load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LoadSummary {
    pub rows: usize,
}

/// Commit concept rows as nodes.
///
/// A repeated id replaces the node's attributes, so loading the same rows
/// twice leaves the store unchanged.
pub fn load_nodes<I, E>(store: &mut GraphStore, rows: I) -> LoadResult<LoadSummary>
where
    I: IntoIterator<Item = Result<NodeRecord, E>>,
    E: fmt::Display,
{
    let mut summary = LoadSummary::default();
    for (i, row) in rows.into_iter().enumerate() {
        let record = row.map_err(|e| LoadError::MalformedRecord {
            row: i + 1,
            message: e.to_string(),
        })?;
        let attributes = record.attributes();
        store.add_node(record.id, attributes);
        summary.rows += 1;
    }
    info!(rows = summary.rows, nodes = store.node_count(), "Loaded concepts");
    Ok(summary)
}

/// Commit relationship rows as edges.
///
/// In strict mode an edge naming an unknown node fails with [`LoadError::Rejected`].
pub fn load_edges<I, E>(store: &mut GraphStore, rows: I) -> LoadResult<LoadSummary>
where
    I: IntoIterator<Item = Result<EdgeRecord, E>>,
    E: fmt::Display,
{
    let mut summary = LoadSummary::default();
    for (i, row) in rows.into_iter().enumerate() {
        let row_number = i + 1;
        let record = row.map_err(|e| LoadError::MalformedRecord {
            row: row_number,
            message: e.to_string(),
        })?;
        let attributes = record.attributes();
        store
            .add_edge(record.source, record.target, attributes)
            .map_err(|source| LoadError::Rejected {
                row: row_number,
                source,
            })?;
        summary.rows += 1;
    }
    info!(rows = summary.rows, edges = store.edge_count(), "Loaded relationships");
    Ok(summary)
}

/// A JSON array of records, decoded row by row
#[derive(Debug, Clone)]
pub struct JsonRecords {
    rows: Vec<serde_json::Value>,
}

impl JsonRecords {
    pub fn from_path(path: impl AsRef<Path>) -> LoadResult<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let records = Self::from_reader(std::io::BufReader::new(file))?;
        debug!(path = %path.display(), rows = records.len(), "Read record file");
        Ok(records)
    }

    /// Fails with [`LoadError::Parse`] unless the input is one JSON array
    pub fn from_reader(reader: impl Read) -> LoadResult<Self> {
        let rows: Vec<serde_json::Value> = serde_json::from_reader(reader)?;
        Ok(JsonRecords { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Decode each row as `R`; a row of the wrong shape yields its error in place
    pub fn records<R: DeserializeOwned>(&self) -> impl Iterator<Item = Result<R, serde_json::Error>> + '_ {
        self.rows.iter().map(|row| R::deserialize(row))
    }
}
