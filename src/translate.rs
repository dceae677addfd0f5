//! Compilation of resource condition sets into policy-engine expressions.
//!
//! The pipeline is pure and all-or-nothing: the first invalid selector aborts
//! the whole request with [`TranslateError::InvalidArgument`], and identical
//! input always yields byte-identical wire output.

use std::collections::BTreeMap;

use itertools::Itertools;
use tracing::debug;

use crate::consts::ANY_ID;
use crate::error::TranslateError;
use crate::types::{
    AttributeSelector, Condition, Expression, InstanceSelector, ResourceConditionSet,
    ResourceExpression, Value, ValueKind, encode_path,
};

/// Compile every resource condition set and render the canonical wire string
/// consumed by the policy-evaluation engine.
///
/// Example:
/// ```rust
/// use perimeter_core::{Condition, InstanceSelector, PathNode, ResourceConditionSet, translate};
///
/// let set = ResourceConditionSet::new(
///     "cmdb",
///     "host",
///     vec![Condition::new(
///         vec![InstanceSelector::new(
///             "host",
///             vec![vec![PathNode::new("host", "h1")].into()],
///         )],
///         vec![],
///     )],
/// );
/// let wire = translate(&[set]).unwrap();
/// assert_eq!(
///     wire,
///     r#"[{"system":"cmdb","type":"host","expression":{"StringEquals":{"id":["h1"]}}}]"#
/// );
/// ```
pub fn translate(resources: &[ResourceConditionSet]) -> Result<String, TranslateError> {
    let compiled = resources
        .iter()
        .map(|resource| {
            Ok(ResourceExpression {
                system: resource.system_id.clone(),
                resource_type: resource.resource_type.clone(),
                expression: compile(resource)?,
            })
        })
        .collect::<Result<Vec<_>, TranslateError>>()?;

    serialize_expressions(&compiled)
}

/// Render already-compiled expressions to the wire string.
///
/// The output is compact (no insignificant whitespace) with stable key
/// order, so callers may compare or cache it byte for byte.
pub fn serialize_expressions(
    expressions: &[ResourceExpression],
) -> Result<String, TranslateError> {
    Ok(serde_json::to_string(expressions)?)
}

/// Compile one resource condition set.
///
/// An empty condition list means "any instance"; multiple conditions are
/// OR-combined in input order.
pub fn compile(resource: &ResourceConditionSet) -> Result<Expression, TranslateError> {
    debug!(
        event = "Compile",
        system = resource.system_id,
        resource_type = resource.resource_type,
        conditions = resource.conditions.len(),
    );

    if resource.conditions.is_empty() {
        return Ok(Expression::Any);
    }

    let mut content = Vec::with_capacity(resource.conditions.len());
    for condition in &resource.conditions {
        content.push(translate_condition(&resource.resource_type, condition)?);
    }

    if content.len() == 1 {
        Ok(content.remove(0))
    } else {
        Ok(Expression::Or(content))
    }
}

/// Combine one condition's instance side and attribute side with AND
/// semantics.
fn translate_condition(
    resource_type: &str,
    condition: &Condition,
) -> Result<Expression, TranslateError> {
    let instance_content = condition
        .instances
        .iter()
        .map(|instance| translate_instance(resource_type, instance))
        .collect::<Result<Vec<_>, _>>()?;
    let instance = join(instance_content, Expression::Or);

    let attribute_content = condition
        .attributes
        .iter()
        .map(translate_attribute)
        .collect::<Result<Vec<_>, _>>()?;
    let attribute = join(attribute_content, Expression::And);

    match (instance, attribute) {
        (Some(instance), Some(attribute)) => Ok(Expression::And(vec![instance, attribute])),
        (Some(instance), None) => Ok(instance),
        (None, Some(attribute)) => Ok(attribute),
        (None, None) => Err(TranslateError::InvalidArgument(
            "instance and attribute must not both be empty".to_string(),
        )),
    }
}

/// Translate one instance selector, merging redundant paths.
///
/// Paths are classified into three buckets:
/// - bare leaf ids (single-node complete paths),
/// - wildcard prefixes (paths ending above the leaf type, or at a wildcard
///   leaf), matched by prefix,
/// - per-prefix ids (complete paths with a concrete leaf under an ancestor
///   chain), which stay scoped to their own prefix.
///
/// Ids and prefixes are sorted and deduplicated, and the per-prefix buckets
/// are emitted in prefix order, so the result is canonical.
fn translate_instance(
    leaf_type: &str,
    instance: &InstanceSelector,
) -> Result<Expression, TranslateError> {
    let mut ids: Vec<String> = Vec::new();
    let mut prefixes: Vec<String> = Vec::new();
    let mut scoped_ids: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for path in &instance.paths {
        let Some((leaf, ancestors)) = path.nodes().split_last() else {
            return Err(TranslateError::InvalidArgument(format!(
                "instance selector {} contains an empty path",
                instance.kind
            )));
        };

        if leaf.kind == leaf_type {
            if ancestors.is_empty() {
                ids.push(leaf.id.clone());
            } else if leaf.id == ANY_ID {
                // Wildcard leaf: any descendant of the ancestor chain.
                prefixes.push(encode_path(ancestors));
            } else {
                scoped_ids
                    .entry(encode_path(ancestors))
                    .or_default()
                    .push(leaf.id.clone());
            }
        } else {
            // Path stops above the leaf type: any descendant of the full path.
            prefixes.push(encode_path(path.nodes()));
        }
    }

    let mut content = Vec::new();
    if !ids.is_empty() {
        content.push(Expression::id_equals(sorted_unique(ids)));
    }
    if !prefixes.is_empty() {
        content.push(Expression::path_prefix(sorted_unique(prefixes)));
    }
    for (prefix, ids) in scoped_ids {
        content.push(Expression::And(vec![
            Expression::id_equals(sorted_unique(ids)),
            Expression::path_prefix(vec![prefix]),
        ]));
    }

    match content.len() {
        0 => Err(TranslateError::InvalidArgument(format!(
            "instance selector {} carries no paths",
            instance.kind
        ))),
        1 => Ok(content.remove(0)),
        _ => Ok(Expression::Or(content)),
    }
}

/// Translate one attribute selector into an equality expression.
///
/// The value set must be non-empty and homogeneous in kind, and a bool
/// attribute must carry exactly one value (requiring both `true` and `false`
/// under AND semantics can never match).
fn translate_attribute(attribute: &AttributeSelector) -> Result<Expression, TranslateError> {
    let values: Vec<&Value> = attribute.values.iter().map(|value| &value.id).collect();

    let Some(first) = values.first() else {
        return Err(TranslateError::InvalidArgument(format!(
            "attribute {} has no values",
            attribute.key
        )));
    };

    let kind = first.kind();
    if let Some(odd) = values.iter().find(|value| value.kind() != kind) {
        return Err(TranslateError::InvalidArgument(format!(
            "attribute {} mixes {} and {} values",
            attribute.key,
            kind,
            odd.kind()
        )));
    }

    let field = attribute.key.clone();
    match kind {
        ValueKind::Bool => {
            if values.len() != 1 {
                return Err(TranslateError::InvalidArgument(format!(
                    "bool attribute {} must carry exactly one value",
                    attribute.key
                )));
            }
            let bools = values
                .iter()
                .filter_map(|value| match value {
                    Value::Bool(b) => Some(*b),
                    _ => None,
                })
                .collect();
            Ok(Expression::Bool {
                field,
                values: bools,
            })
        }
        ValueKind::Number => {
            let numbers = values
                .iter()
                .filter_map(|value| match value {
                    Value::Number(n) => Some(n.clone()),
                    _ => None,
                })
                .collect();
            Ok(Expression::NumericEquals {
                field,
                values: numbers,
            })
        }
        ValueKind::String => {
            let strings = values
                .iter()
                .filter_map(|value| match value {
                    Value::String(s) => Some(s.clone()),
                    _ => None,
                })
                .collect();
            Ok(Expression::StringEquals {
                field,
                values: strings,
            })
        }
    }
}

/// Collapse 0/1/N expressions into nothing, the expression itself, or the
/// given combinator over all of them.
fn join(
    mut content: Vec<Expression>,
    combinator: fn(Vec<Expression>) -> Expression,
) -> Option<Expression> {
    match content.len() {
        0 => None,
        1 => Some(content.remove(0)),
        _ => Some(combinator(content)),
    }
}

fn sorted_unique(values: Vec<String>) -> Vec<String> {
    values.into_iter().sorted().dedup().collect()
}

#[cfg(test)]
mod tests;
