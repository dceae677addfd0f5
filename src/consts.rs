//! Wire-format constants shared with the external policy-evaluation engine.
//!
//! These values are part of the engine's data contract and must match the
//! evaluator byte for byte.

/// Reserved instance id meaning "any instance of this type".
pub const ANY_ID: &str = "*";

/// Pseudo-field that expressions match against a resource's own id.
pub const ID_FIELD: &str = "id";

/// Pseudo-field that expressions match against a resource's hierarchical path.
pub const PATH_FIELD: &str = "_path_";
