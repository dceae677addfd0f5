//! Core expression compiler for Perimeter, a centralized permission
//! management console.
//!
//! The compiler turns the console's tree-shaped description of which resource
//! instances and attribute values a permission applies to into the canonical
//! boolean expression consumed by the external policy-evaluation engine. It
//! is pure and deterministic: identical input always yields a byte-identical
//! wire string, so callers may diff or cache compiled expressions.

pub use consts::{ANY_ID, ID_FIELD, PATH_FIELD};
pub use error::TranslateError;
pub use translate::{compile, serialize_expressions, translate};
pub use types::{
    AttributeSelector, AttributeValue, Condition, Expression, InstancePath, InstanceSelector,
    PathNode, ResourceConditionSet, ResourceExpression, Value, ValueKind, encode_path,
};

mod consts;
mod error;
mod translate;
mod types;
