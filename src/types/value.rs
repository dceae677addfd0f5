//! Attribute values carried in the request payload.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumDiscriminants};
use utoipa::ToSchema;

/// A single attribute value.
///
/// The payload carries raw JSON scalars, so the variant is decided by the
/// scalar kind at parse time. Anything else (null, array, object) fails
/// deserialization outright.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, EnumDiscriminants)]
#[strum_discriminants(name(ValueKind), derive(Display))]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    #[schema(value_type = f64)]
    Number(serde_json::Number),
    String(String),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        ValueKind::from(self)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value.into())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}
