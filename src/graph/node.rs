//! Node attributes
//!
//! Known concept attributes are typed fields; unknown ones go to `extra`.

use super::property::{PropertyMap, PropertyValue};
use serde::{Deserialize, Serialize};

/// Attributes of a concept node
///
/// Nodes created implicitly by an edge carry the default (empty) attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeAttributes {
    /// Display label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Grouping label (e.g. discipline); not restricted to a fixed set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Free text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Any other attributes
    #[serde(default, skip_serializing_if = "PropertyMap::is_empty")]
    pub extra: PropertyMap,
}

impl NodeAttributes {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        NodeAttributes {
            name: Some(name.into()),
            category: Some(category.into()),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set an extension attribute
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// True for the bare attributes of an auto-created node
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.category.is_none() && self.description.is_none() && self.extra.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let attrs = NodeAttributes::new("Vitruvian Man", "Art")
            .with_description("Proportions of the human body")
            .with_extra("year", 1490i64);

        assert_eq!(attrs.name.as_deref(), Some("Vitruvian Man"));
        assert_eq!(attrs.category.as_deref(), Some("Art"));
        assert_eq!(attrs.extra["year"], PropertyValue::Integer(1490));
        assert!(!attrs.is_empty());
        assert!(NodeAttributes::default().is_empty());
    }

    #[test]
    fn test_serde_skips_missing() {
        let attrs = NodeAttributes::new("Flight", "Engineering");
        let json = serde_json::to_string(&attrs).unwrap();
        assert_eq!(json, r#"{"name":"Flight","category":"Engineering"}"#);
    }
}
