use flowcore::{Node, NodeTypes};
use serde::Serialize;
use std::collections::BTreeMap;

/// Instance count of a node type that declares a limit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeTypeMaxCount {
    pub exist: usize,
    pub max: usize,
    pub node_names: Vec<String>,
}

pub type NodeTypesMaxCount = BTreeMap<String, NodeTypeMaxCount>;

/// Count nodes per type, for every registered type that declares `maxNodes`.
///
/// Limited types without any instance are reported with `exist = 0`.
/// `node_types` must list its schemas, so pass the registry itself rather
/// than a lookup-only adapter.
pub fn node_types_max_count(nodes: &[Node], node_types: &dyn NodeTypes) -> NodeTypesMaxCount {
    let mut counts: NodeTypesMaxCount = node_types
        .all()
        .into_iter()
        .filter_map(|schema| {
            let max = schema.max_nodes?;
            Some((
                schema.name.clone(),
                NodeTypeMaxCount {
                    exist: 0,
                    max,
                    node_names: Vec::new(),
                },
            ))
        })
        .collect();

    for node in nodes {
        if let Some(count) = counts.get_mut(&node.node_type) {
            count.exist += 1;
            count.node_names.push(node.name.clone());
        }
    }

    counts
}

/// How many nodes of the given type exist
pub fn node_type_count(nodes: &[Node], node_type: &str) -> usize {
    nodes.iter().filter(|node| node.node_type == node_type).count()
}

/// Whether one more node of `node_type` stays within its declared limit
pub fn can_add_node(nodes: &[Node], node_types: &dyn NodeTypes, node_type: &str) -> bool {
    match node_types.get_by_name(node_type).and_then(|schema| schema.max_nodes) {
        Some(max) => node_type_count(nodes, node_type) < max,
        None => true,
    }
}
