use super::*;
use crate::types::{InstancePath, PathNode};


fn node(kind: &str, id: &str) -> PathNode {
    PathNode::new(kind, id)
}

fn path(nodes: Vec<PathNode>) -> InstancePath {
    nodes.into()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn host_selector(paths: Vec<InstancePath>) -> InstanceSelector {
    InstanceSelector::new("host", paths)
}
