//! Hierarchical instance paths and their canonical string encoding.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One node in a hierarchical instance path.
///
/// The payload also carries display fields (`name`, `system_id`) on each
/// node; those are ignored on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub struct PathNode {
    /// Resource type of this node, e.g. "biz" or "host".
    #[serde(rename = "type")]
    pub kind: String,
    /// Instance id; may be the wildcard sentinel.
    pub id: String,
}

impl PathNode {
    pub fn new(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
        }
    }
}

/// An ordered root-to-leaf chain of path nodes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct InstancePath(pub Vec<PathNode>);

impl InstancePath {
    pub fn nodes(&self) -> &[PathNode] {
        &self.0
    }
}

impl From<Vec<PathNode>> for InstancePath {
    fn from(nodes: Vec<PathNode>) -> Self {
        InstancePath(nodes)
    }
}

/// Encode a node chain into the canonical prefix key: `/type,id/type,id/`.
///
/// The encoded form is what `StringPrefix` expressions match against, and it
/// is the grouping key that lets ids under the same ancestor collapse into a
/// single expression. Empty input is a caller bug.
pub fn encode_path(nodes: &[PathNode]) -> String {
    assert!(!nodes.is_empty(), "cannot encode an empty path");

    let mut path = String::from("/");
    for node in nodes {
        path.push_str(&node.kind);
        path.push(',');
        path.push_str(&node.id);
        path.push('/');
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    #[parameterized(
        single_node = { vec![("biz", "1")], "/biz,1/" },
        two_nodes = { vec![("biz", "1"), ("set", "5")], "/biz,1/set,5/" },
        three_nodes = { vec![("biz", "1"), ("set", "5"), ("module", "9")], "/biz,1/set,5/module,9/" },
        wildcard_leaf = { vec![("biz", "1"), ("host", "*")], "/biz,1/host,*/" },
    )]
    fn test_encode_path(nodes: Vec<(&str, &str)>, expected: &str) {
        let nodes: Vec<PathNode> = nodes
            .into_iter()
            .map(|(kind, id)| PathNode::new(kind, id))
            .collect();
        assert_eq!(encode_path(&nodes), expected);
    }

    #[test]
    #[should_panic(expected = "cannot encode an empty path")]
    fn test_encode_path_rejects_empty_input() {
        encode_path(&[]);
    }

    #[test]
    fn test_path_node_ignores_display_fields() {
        let node: PathNode = serde_json::from_str(
            r#"{"type": "biz", "id": "1", "name": "Payments", "system_id": "cmdb"}"#,
        )
        .unwrap();
        assert_eq!(node, PathNode::new("biz", "1"));
    }

    #[test]
    fn test_instance_path_is_transparent() {
        let path: InstancePath =
            serde_json::from_str(r#"[{"type": "biz", "id": "1"}, {"type": "host", "id": "h1"}]"#)
                .unwrap();
        assert_eq!(path.nodes().len(), 2);
        assert_eq!(path.nodes()[1].id, "h1");
    }
}
