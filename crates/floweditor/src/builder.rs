use crate::EditorConfig;
use flowcore::{Connection, GraphError, Node, NodeTypes, Workflow};
use std::sync::Arc;

/// Build a [`Workflow`] from the editor's current nodes and connections.
///
/// By default the nodes are shallow copies: every node gets its own
/// top-level record, but parameter maps are shared with `nodes`. With
/// `deep_copy` nothing is shared, so later edits to `nodes` can never be
/// observed through the returned workflow.
///
/// A `tracked_id` equal to the configured placeholder yields a workflow
/// without an id.
pub fn build_workflow(
    nodes: &[Node],
    connections: &[Connection],
    node_types: Arc<dyn NodeTypes>,
    tracked_id: Option<&str>,
    config: &EditorConfig,
    deep_copy: bool,
) -> Result<Workflow, GraphError> {
    let nodes: Vec<Node> = if deep_copy {
        nodes.iter().map(Node::deep_clone).collect()
    } else {
        nodes.to_vec()
    };

    let id = config.persisted_id(tracked_id).map(str::to_string);

    tracing::debug!(
        "Building workflow {:?} with {} nodes and {} connections (deep copy: {})",
        id,
        nodes.len(),
        connections.len(),
        deep_copy
    );

    Workflow::new(id, nodes, connections.to_vec(), node_types)
}
