//! Instance and attribute selectors, the two halves of a condition.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::path::InstancePath;
use super::value::Value;

/// Path-based selection of concrete resource instances.
///
/// One selector may carry multiple alternative paths; they are OR-combined.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct InstanceSelector {
    /// Declared leaf resource type of the selector.
    #[serde(rename = "type")]
    pub kind: String,
    /// Display name from the console; never used in compilation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Alternative root-to-leaf paths.
    #[serde(rename = "path", default)]
    pub paths: Vec<InstancePath>,
}

impl InstanceSelector {
    pub fn new(kind: impl Into<String>, paths: Vec<InstancePath>) -> Self {
        Self {
            kind: kind.into(),
            name: None,
            paths,
        }
    }
}

/// One selectable value of an attribute, as sent by the console.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AttributeValue {
    pub id: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl AttributeValue {
    pub fn new(id: impl Into<Value>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }
}

/// Key/value-set selection over a resource attribute.
///
/// The value set must be non-empty and homogeneous in kind; that is enforced
/// at translation time, not here.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AttributeSelector {
    /// Attribute key; the console payload calls this `id`.
    #[serde(rename = "id")]
    pub key: String,
    /// Display name from the console; never used in compilation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub values: Vec<AttributeValue>,
}

impl AttributeSelector {
    pub fn new(key: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            key: key.into(),
            name: None,
            values: values.into_iter().map(AttributeValue::new).collect(),
        }
    }
}
