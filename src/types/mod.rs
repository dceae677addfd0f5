//! Data model: request payload types and the compiled expression DSL.
//!
//! The payload types deserialize directly from the console's validated
//! request body (see the field renames on each struct for the wire names).
//! Display-only payload fields (`name` on selectors and values, `id` on
//! conditions) are carried so a payload round-trips, but never influence
//! compilation.

mod condition;
mod expression;
mod path;
mod selector;
mod value;

pub use condition::{Condition, ResourceConditionSet};
pub use expression::{Expression, ResourceExpression};
pub use path::{InstancePath, PathNode, encode_path};
pub use selector::{AttributeSelector, AttributeValue, InstanceSelector};
pub use value::{Value, ValueKind};
