// crates/floweditor/tests/builder_test.rs

mod common;

use common::{http_node, registry, START};
use flowcore::{Connection, GraphError, Node, MAIN_CONNECTION};
use floweditor::{build_workflow, EditorConfig, RegistryAdapter, PLACEHOLDER_EMPTY_WORKFLOW_ID};
use serde_json::json;
use std::sync::Arc;

fn nodes() -> Vec<Node> {
    vec![Node::new("Start", START), http_node("Fetch", "https://example.com")]
}

fn connections() -> Vec<Connection> {
    vec![Connection::main("Start", "Fetch")]
}

fn adapter() -> Arc<RegistryAdapter> {
    Arc::new(RegistryAdapter::new(registry()))
}

#[test]
fn test_shallow_copy_shares_parameters() {
    let nodes = nodes();
    let config = EditorConfig::default();

    let wf = build_workflow(&nodes, &connections(), adapter(), None, &config, false).unwrap();

    let built = wf.node("Fetch").unwrap();
    assert!(built.shares_parameters_with(&nodes[1]));
    assert_eq!(wf.parent_nodes("Fetch", MAIN_CONNECTION, None), vec!["Start"]);
    assert_eq!(wf.node_type_of(built).map(|schema| schema.name.clone()), Some("httpRequest".to_string()));
}

#[test]
fn test_deep_copy_is_independent() {
    let mut nodes = nodes();
    let config = EditorConfig::default();

    let wf = build_workflow(&nodes, &connections(), adapter(), None, &config, true).unwrap();
    assert!(!wf.node("Fetch").unwrap().shares_parameters_with(&nodes[1]));

    nodes[1].parameters_mut().insert("url".to_string(), json!("https://changed.example.com"));
    assert_eq!(
        wf.node("Fetch").unwrap().parameters.get("url"),
        Some(&json!("https://example.com"))
    );
}

#[test]
fn test_placeholder_id_is_dropped() {
    let config = EditorConfig::default();

    let wf = build_workflow(&nodes(), &[], adapter(), Some(PLACEHOLDER_EMPTY_WORKFLOW_ID), &config, false).unwrap();
    assert_eq!(wf.id(), None);

    let wf = build_workflow(&nodes(), &[], adapter(), Some("42"), &config, false).unwrap();
    assert_eq!(wf.id(), Some("42"));

    let wf = build_workflow(&nodes(), &[], adapter(), None, &config, false).unwrap();
    assert_eq!(wf.id(), None);
}

#[test]
fn test_configured_placeholder() {
    let config: EditorConfig = serde_json::from_value(json!({ "placeholderWorkflowId": "new" })).unwrap();
    assert_eq!(config.primary_input, "main");

    let wf = build_workflow(&nodes(), &[], adapter(), Some("new"), &config, false).unwrap();
    assert_eq!(wf.id(), None);

    let wf = build_workflow(&nodes(), &[], adapter(), Some(PLACEHOLDER_EMPTY_WORKFLOW_ID), &config, false).unwrap();
    assert_eq!(wf.id(), Some(PLACEHOLDER_EMPTY_WORKFLOW_ID));
}

#[test]
fn test_invalid_graph_is_rejected() {
    let config = EditorConfig::default();

    let err = build_workflow(&nodes(), &[Connection::main("Start", "Nowhere")], adapter(), None, &config, false)
        .unwrap_err();
    assert_eq!(err, GraphError::NodeNotFound("Nowhere".to_string()));
}

#[test]
fn test_config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("editor.json");
    std::fs::write(&path, r#"{ "expressionRunIndex": 2 }"#).unwrap();

    let config = EditorConfig::from_json_file(&path).unwrap();
    assert_eq!(config.expression_run_index, 2);
    assert_eq!(config.placeholder_workflow_id, PLACEHOLDER_EMPTY_WORKFLOW_ID);

    assert!(EditorConfig::from_json_file(dir.path().join("missing.json")).is_err());
}
