// crates/flowcore/tests/node_test.rs

use flowcore::{
    display_parameter, is_empty_value, DisplayOptions, Item, Node, NodeIssues, NodeParameters,
    NodeProperty, PropertyType, RunRecord,
};
use serde_json::json;

fn params(value: serde_json::Value) -> NodeParameters {
    match value {
        serde_json::Value::Object(map) => map,
        _ => panic!("parameters must be an object"),
    }
}

#[test]
fn test_display_without_conditions() {
    assert!(display_parameter(&NodeParameters::new(), None));
}

#[test]
fn test_display_show_requires_listed_value() {
    let options = DisplayOptions::new().show("operation", ["insert", "update"]);

    assert!(options.matches(&params(json!({ "operation": "insert" }))));
    assert!(!options.matches(&params(json!({ "operation": "executeQuery" }))));
    assert!(!options.matches(&NodeParameters::new()), "unset sibling never matches show");
}

#[test]
fn test_display_hide_wins() {
    let options = DisplayOptions::new()
        .show("jsonParameters", [true])
        .hide("requestMethod", ["GET"]);

    assert!(options.matches(&params(json!({ "jsonParameters": true, "requestMethod": "POST" }))));
    assert!(!options.matches(&params(json!({ "jsonParameters": true, "requestMethod": "GET" }))));
    assert!(options.matches(&params(json!({ "jsonParameters": true }))));
}

#[test]
fn test_node_serde_keeps_unknown_fields() {
    let node: Node = serde_json::from_value(json!({
        "name": "Fetch",
        "type": "httpRequest",
        "position": [100.0, 200.0],
        "parameters": { "url": "https://example.com" },
        "typeVersion": 1,
        "_hover": true
    }))
    .unwrap();

    assert_eq!(node.node_type, "httpRequest");
    assert_eq!(node.position, Some([100.0, 200.0]));
    assert_eq!(node.parameters.get("url"), Some(&json!("https://example.com")));
    assert_eq!(node.extra.get("typeVersion"), Some(&json!(1)));
    assert!(!node.disabled);

    let back = serde_json::to_value(&node).unwrap();
    assert!(back.get("disabled").is_none());
    assert!(back.get("issues").is_none());
    assert_eq!(back["_hover"], json!(true));
}

#[test]
fn test_clone_shares_parameters_until_written() {
    let original = Node::new("A", "noOp").with_parameter("value", 1);

    let shallow = original.clone();
    assert!(shallow.shares_parameters_with(&original));

    let deep = original.deep_clone();
    assert!(!deep.shares_parameters_with(&original));
    assert_eq!(deep, original);

    let mut edited = original.clone();
    edited.parameters_mut().insert("value".to_string(), json!(2));
    assert!(!edited.shares_parameters_with(&original));
    assert_eq!(original.parameters.get("value"), Some(&json!(1)));
}

#[test]
fn test_node_issues_collect_messages() {
    let mut issues = NodeIssues::default();
    assert!(issues.clone().into_option().is_none());

    issues.add_parameter_issue("url", "first");
    issues.add_parameter_issue("url", "second");
    issues.add_credential_issue("httpBasicAuth", "missing");

    assert_eq!(issues.parameters["url"], vec!["first", "second"]);
    assert!(issues.into_option().is_some());

    let unknown = serde_json::to_value(NodeIssues::type_unknown()).unwrap();
    assert_eq!(unknown, json!({ "typeUnknown": true }));
}

#[test]
fn test_empty_values() {
    assert!(is_empty_value(&json!(null)));
    assert!(is_empty_value(&json!("")));
    assert!(is_empty_value(&json!([])));
    assert!(!is_empty_value(&json!(false)));
    assert!(!is_empty_value(&json!(0)));
}

#[test]
fn test_run_record_batches() {
    let record = RunRecord::new()
        .with_batch("main", vec![Item::from_value(json!({ "a": 1 }))])
        .with_batch("main", vec![]);

    assert_eq!(record.batch("main", 0).map(Vec::len), Some(1));
    assert_eq!(record.batch("main", 1).map(Vec::len), Some(0));
    assert!(record.batch("main", 2).is_none());
    assert!(record.batch("other", 0).is_none());

    let wrapped = Item::from_value(json!(5));
    assert_eq!(wrapped.get("data"), Some(&json!(5)));
}

#[test]
fn test_property_schema_from_json() {
    let property: NodeProperty = serde_json::from_value(json!({
        "displayName": "Operation",
        "name": "operation",
        "type": "options",
        "options": [
            { "name": "Insert", "value": "insert" },
            { "name": "Update", "value": "update" }
        ],
        "default": "insert"
    }))
    .unwrap();

    assert_eq!(property.kind, PropertyType::Options);
    assert_eq!(property.option_values().len(), 2);
    assert!(property.child_properties().is_empty());

    let unknown: NodeProperty = serde_json::from_value(json!({
        "displayName": "Notice",
        "name": "notice",
        "type": "notice"
    }))
    .unwrap();
    assert_eq!(unknown.kind, PropertyType::Other);
    assert_eq!(unknown.default, json!(null));
}
