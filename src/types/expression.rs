//! The boolean expression DSL consumed by the policy-evaluation engine.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Number;

use crate::consts::{ID_FIELD, PATH_FIELD};

/// A compiled resource-scope expression.
///
/// Wire form is a single-key tagged object per node, e.g.
/// `{"StringEquals":{"id":["h1"]}}`, `{"StringPrefix":{"_path_":["/biz,1/"]}}`
/// or `{"AND":{"content":[...]}}`. The spelling of the tags and the inner
/// field names are part of the engine contract.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Matches any instance. Serializes as `{"Any":{"id":[]}}`.
    Any,
    StringEquals { field: String, values: Vec<String> },
    StringPrefix { field: String, values: Vec<String> },
    NumericEquals { field: String, values: Vec<Number> },
    Bool { field: String, values: Vec<bool> },
    And(Vec<Expression>),
    Or(Vec<Expression>),
}

impl Expression {
    /// Equality match against the resource-id pseudo-field.
    pub fn id_equals(values: Vec<String>) -> Self {
        Expression::StringEquals {
            field: ID_FIELD.to_string(),
            values,
        }
    }

    /// Prefix match against the hierarchical-path pseudo-field.
    pub fn path_prefix(values: Vec<String>) -> Self {
        Expression::StringPrefix {
            field: PATH_FIELD.to_string(),
            values,
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Expression::Any)
    }
}

/// The inner `{field: values}` object of a leaf node.
struct FieldValues<'a, T: Serialize> {
    field: &'a str,
    values: &'a [T],
}

impl<T: Serialize> Serialize for FieldValues<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.field, self.values)?;
        map.end()
    }
}

/// The inner `{"content": [...]}` object of a combinator node.
#[derive(Serialize)]
struct Content<'a> {
    content: &'a [Expression],
}

impl Serialize for Expression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Expression::Any => {
                let empty: &[String] = &[];
                map.serialize_entry(
                    "Any",
                    &FieldValues {
                        field: ID_FIELD,
                        values: empty,
                    },
                )?;
            }
            Expression::StringEquals { field, values } => {
                map.serialize_entry("StringEquals", &FieldValues { field, values })?;
            }
            Expression::StringPrefix { field, values } => {
                map.serialize_entry("StringPrefix", &FieldValues { field, values })?;
            }
            Expression::NumericEquals { field, values } => {
                map.serialize_entry("NumericEquals", &FieldValues { field, values })?;
            }
            Expression::Bool { field, values } => {
                map.serialize_entry("Bool", &FieldValues { field, values })?;
            }
            Expression::And(children) => {
                map.serialize_entry("AND", &Content { content: children })?;
            }
            Expression::Or(children) => {
                map.serialize_entry("OR", &Content { content: children })?;
            }
        }
        map.end()
    }
}

impl Display for Expression {
    /// Renders the compact wire JSON.
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let rendered = serde_json::to_string(self).map_err(|_| std::fmt::Error)?;
        f.write_str(&rendered)
    }
}

/// One compiled resource scope in the wire envelope.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResourceExpression {
    pub system: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub expression: Expression,
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_any_wire_form() {
        assert_snapshot!(Expression::Any.to_string(), @r#"{"Any":{"id":[]}}"#);
    }

    #[test]
    fn test_leaf_wire_forms() {
        assert_snapshot!(
            Expression::id_equals(strings(&["h1", "h2"])).to_string(),
            @r#"{"StringEquals":{"id":["h1","h2"]}}"#
        );
        assert_snapshot!(
            Expression::path_prefix(strings(&["/biz,1/"])).to_string(),
            @r#"{"StringPrefix":{"_path_":["/biz,1/"]}}"#
        );
        assert_snapshot!(
            Expression::Bool {
                field: "confidential".to_string(),
                values: vec![true],
            }
            .to_string(),
            @r#"{"Bool":{"confidential":[true]}}"#
        );
        assert_snapshot!(
            Expression::NumericEquals {
                field: "port".to_string(),
                values: vec![80.into(), 443.into()],
            }
            .to_string(),
            @r#"{"NumericEquals":{"port":[80,443]}}"#
        );
    }

    #[test]
    fn test_combinator_wire_forms() {
        let and = Expression::And(vec![
            Expression::id_equals(strings(&["h1"])),
            Expression::path_prefix(strings(&["/biz,1/"])),
        ]);
        assert_snapshot!(
            and.to_string(),
            @r#"{"AND":{"content":[{"StringEquals":{"id":["h1"]}},{"StringPrefix":{"_path_":["/biz,1/"]}}]}}"#
        );

        let or = Expression::Or(vec![Expression::Any, Expression::id_equals(strings(&["h1"]))]);
        assert_snapshot!(
            or.to_string(),
            @r#"{"OR":{"content":[{"Any":{"id":[]}},{"StringEquals":{"id":["h1"]}}]}}"#
        );
    }

    #[test]
    fn test_resource_expression_envelope() {
        let envelope = ResourceExpression {
            system: "cmdb".to_string(),
            resource_type: "host".to_string(),
            expression: Expression::Any,
        };
        assert_snapshot!(
            serde_json::to_string(&envelope).unwrap(),
            @r#"{"system":"cmdb","type":"host","expression":{"Any":{"id":[]}}}"#
        );
    }

    #[test]
    fn test_is_any() {
        assert!(Expression::Any.is_any());
        assert!(!Expression::id_equals(strings(&["h1"])).is_any());
    }
}
