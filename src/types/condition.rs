//! Conditions and the per-resource condition set.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::selector::{AttributeSelector, InstanceSelector};

/// One OR-branch of a resource's scoping rule.
///
/// Instance selectors and attribute selectors of the same condition are
/// AND-combined; at least one side must translate to something.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Condition {
    /// Console-assigned condition id; never used in compilation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub instances: Vec<InstanceSelector>,
    #[serde(default)]
    pub attributes: Vec<AttributeSelector>,
}

impl Condition {
    pub fn new(instances: Vec<InstanceSelector>, attributes: Vec<AttributeSelector>) -> Self {
        Self {
            id: None,
            instances,
            attributes,
        }
    }
}

/// The scoping rule for one resource type within one permission.
///
/// Conditions are OR-combined; an empty list means "any instance".
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ResourceConditionSet {
    pub system_id: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(rename = "condition", default)]
    pub conditions: Vec<Condition>,
}

impl ResourceConditionSet {
    pub fn new(
        system_id: impl Into<String>,
        resource_type: impl Into<String>,
        conditions: Vec<Condition>,
    ) -> Self {
        Self {
            system_id: system_id.into(),
            resource_type: resource_type.into(),
            conditions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_condition_set_from_payload() {
        let set: ResourceConditionSet = serde_json::from_str(
            r#"{
                "system_id": "cmdb",
                "type": "host",
                "condition": [
                    {
                        "id": "c1",
                        "instances": [
                            {"type": "host", "path": [[{"type": "host", "id": "h1"}]]}
                        ],
                        "attributes": [
                            {"id": "os", "values": [{"id": "linux"}]}
                        ]
                    }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(set.system_id, "cmdb");
        assert_eq!(set.resource_type, "host");
        assert_eq!(set.conditions.len(), 1);
        assert_eq!(set.conditions[0].id.as_deref(), Some("c1"));
        assert_eq!(set.conditions[0].instances.len(), 1);
        assert_eq!(set.conditions[0].attributes.len(), 1);
    }

    #[test]
    fn test_condition_sides_default_to_empty() {
        let condition: Condition = serde_json::from_str(r#"{"id": "c1"}"#).unwrap();
        assert!(condition.instances.is_empty());
        assert!(condition.attributes.is_empty());
    }
}
