// crates/flowcore/tests/workflow_test.rs

use flowcore::{Connection, GraphError, Node, NodeTypeSchema, NodeTypes, Workflow, MAIN_CONNECTION};
use std::sync::Arc;

struct NoTypes;

impl NodeTypes for NoTypes {
    fn all(&self) -> Vec<Arc<NodeTypeSchema>> {
        Vec::new()
    }

    fn get_by_name(&self, _name: &str) -> Option<Arc<NodeTypeSchema>> {
        None
    }
}

fn workflow(names: &[&str], connections: Vec<Connection>) -> Result<Workflow, GraphError> {
    let nodes = names.iter().map(|name| Node::new(*name, "noOp")).collect();
    Workflow::new(None, nodes, connections, Arc::new(NoTypes))
}

#[test]
fn test_duplicate_node_names_are_rejected() {
    let result = workflow(&["A", "A"], vec![]);
    assert_eq!(result.unwrap_err(), GraphError::DuplicateNode("A".to_string()));
}

#[test]
fn test_connection_to_missing_node_is_rejected() {
    let result = workflow(&["A"], vec![Connection::main("A", "Missing")]);
    assert_eq!(result.unwrap_err(), GraphError::NodeNotFound("Missing".to_string()));
}

#[test]
fn test_node_lookup_keeps_order() {
    let wf = workflow(&["C", "A", "B"], vec![]).unwrap();

    let names: Vec<_> = wf.nodes().iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, vec!["C", "A", "B"]);
    assert_eq!(wf.node("A").map(|n| n.name.as_str()), Some("A"));
    assert!(wf.node("Z").is_none());
    assert!(wf.id().is_none());
}

#[test]
fn test_parent_nodes_nearest_first() {
    // A -> B -> D, C -> D
    let wf = workflow(
        &["A", "B", "C", "D"],
        vec![
            Connection::main("A", "B"),
            Connection::main("B", "D"),
            Connection::main("C", "D").with_input_index(1),
        ],
    )
    .unwrap();

    assert_eq!(wf.parent_nodes("D", MAIN_CONNECTION, Some(1)), vec!["B", "C"]);
    assert_eq!(wf.parent_nodes("D", MAIN_CONNECTION, None), vec!["B", "C", "A"]);
    assert!(wf.parent_nodes("A", MAIN_CONNECTION, None).is_empty());
}

#[test]
fn test_parent_nodes_sorted_by_input_slot() {
    let wf = workflow(
        &["A", "B", "Merge"],
        vec![
            Connection::main("A", "Merge").with_input_index(1),
            Connection::main("B", "Merge"),
        ],
    )
    .unwrap();

    assert_eq!(wf.parent_nodes("Merge", MAIN_CONNECTION, Some(1)), vec!["B", "A"]);
}

#[test]
fn test_parent_nodes_filters_connection_type() {
    let mut other = Connection::main("B", "C");
    other.from_port = "ai".to_string();
    other.to_port = "ai".to_string();

    let wf = workflow(&["A", "B", "C"], vec![Connection::main("A", "C"), other]).unwrap();

    assert_eq!(wf.parent_nodes("C", MAIN_CONNECTION, None), vec!["A"]);
    assert_eq!(wf.parent_nodes("C", "ai", None), vec!["B"]);
}

#[test]
fn test_child_nodes_handle_cycles() {
    let wf = workflow(
        &["A", "B", "C"],
        vec![
            Connection::main("A", "B"),
            Connection::main("B", "C"),
            Connection::main("C", "A"),
        ],
    )
    .unwrap();

    assert_eq!(wf.child_nodes("A", MAIN_CONNECTION, None), vec!["B", "C"]);
    assert_eq!(wf.child_nodes("A", MAIN_CONNECTION, Some(1)), vec!["B"]);
    assert!(wf.child_nodes("Unknown", MAIN_CONNECTION, None).is_empty());
}

#[test]
fn test_unknown_node_type_has_no_schema() {
    let wf = workflow(&["A"], vec![]).unwrap();
    let node = wf.node("A").unwrap();
    assert!(wf.node_type_of(node).is_none());
    assert!(wf.node_types().init().is_ok());
}
