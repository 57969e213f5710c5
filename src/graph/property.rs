//! Property value types for the attribute extension maps
//!
//! Known attributes (`name`, `category`, ...) are typed struct fields; anything else a
//! loader supplies lands in an extension map of these values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A JSON-shaped attribute value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Array(Vec<PropertyValue>),
    Map(BTreeMap<String, PropertyValue>),
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::String(s)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::String(s.to_string())
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        PropertyValue::Integer(i)
    }
}

impl From<i32> for PropertyValue {
    fn from(i: i32) -> Self {
        PropertyValue::Integer(i as i64)
    }
}

impl From<f64> for PropertyValue {
    fn from(f: f64) -> Self {
        PropertyValue::Float(f)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Boolean(b)
    }
}

/// Extension map for attributes without a dedicated field; ordered by key
pub type PropertyMap = BTreeMap<String, PropertyValue>;
