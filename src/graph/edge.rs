//! Edge attributes for directed relationships

use super::property::{PropertyMap, PropertyValue};
use serde::{Deserialize, Serialize};

/// Weight used when an edge carries none
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Attributes of a directed edge
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeAttributes {
    /// Relationship label (e.g. "influences")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,

    /// Stored weight; see [`EdgeAttributes::weight`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,

    /// Any other attributes
    #[serde(default, skip_serializing_if = "PropertyMap::is_empty")]
    pub extra: PropertyMap,
}

impl EdgeAttributes {
    pub fn new(relationship: impl Into<String>) -> Self {
        EdgeAttributes {
            relationship: Some(relationship.into()),
            ..Default::default()
        }
    }

    pub fn weighted(weight: f64) -> Self {
        EdgeAttributes {
            weight: Some(weight),
            ..Default::default()
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Effective weight: the stored one, or 1.0
    pub fn weight(&self) -> f64 {
        self.weight.unwrap_or(DEFAULT_WEIGHT)
    }
}
