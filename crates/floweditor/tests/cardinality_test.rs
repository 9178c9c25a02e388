// crates/floweditor/tests/cardinality_test.rs

mod common;

use common::{http_node, registry, HTTP, START};
use flowcore::{Node, NodeTypes};
use floweditor::{can_add_node, node_type_count, node_types_max_count, RegistryAdapter};

#[test]
fn test_count_reports_exceeded_limit() {
    let nodes = vec![
        Node::new("Start", START),
        http_node("Fetch", "https://example.com"),
        Node::new("Start1", START),
    ];

    let counts = node_types_max_count(&nodes, registry().as_ref());

    let start = &counts[START];
    assert_eq!(start.exist, 2);
    assert_eq!(start.max, 1);
    assert_eq!(start.node_names, vec!["Start", "Start1"]);
    assert!(!counts.contains_key(HTTP), "types without a limit are not reported");
}

#[test]
fn test_count_reports_unused_limited_types() {
    let counts = node_types_max_count(&[http_node("Fetch", "https://example.com")], registry().as_ref());

    assert_eq!(counts[START].exist, 0);
    assert!(counts[START].node_names.is_empty());
}

#[test]
fn test_count_needs_a_listing_registry() {
    let adapter = RegistryAdapter::new(registry());
    assert!(adapter.init().is_ok());
    assert!(adapter.all().is_empty());
    assert!(adapter.get_by_name(START).is_some());

    let counts = node_types_max_count(&[Node::new("Start", START)], &adapter);
    assert!(counts.is_empty());
}

#[test]
fn test_can_add_node_respects_limit() {
    let registry = registry();
    let mut nodes = vec![http_node("Fetch", "https://example.com")];

    assert!(can_add_node(&nodes, registry.as_ref(), START));
    nodes.push(Node::new("Start", START));
    assert!(!can_add_node(&nodes, registry.as_ref(), START));

    assert!(can_add_node(&nodes, registry.as_ref(), HTTP));
    assert!(can_add_node(&nodes, registry.as_ref(), "unknownType"));
}

#[test]
fn test_node_type_count() {
    let nodes = vec![
        http_node("A", "https://a.example.com"),
        http_node("B", "https://b.example.com"),
        Node::new("Start", START),
    ];

    assert_eq!(node_type_count(&nodes, HTTP), 2);
    assert_eq!(node_type_count(&nodes, START), 1);
    assert_eq!(node_type_count(&nodes, "unknownType"), 0);
}

#[test]
fn test_count_serializes_camel_case() {
    let counts = node_types_max_count(&[Node::new("Start", START)], registry().as_ref());
    let value = serde_json::to_value(&counts).unwrap();

    assert_eq!(
        value,
        serde_json::json!({ "start": { "exist": 1, "max": 1, "nodeNames": ["Start"] } })
    );
}
