// crates/floweditor/tests/loader_test.rs

use flowcore::{FlowError, PropertyType};
use floweditor::{NodeTypeRegistry, SchemaLoader};

const GREETER: &str = r##"{
    "name": "greeter",
    "displayName": "Greeter",
    "defaults": { "name": "Greeter", "color": "#00aa00" },
    "inputs": ["main"],
    "outputs": ["main"],
    "maxNodes": 2,
    "properties": [
        { "displayName": "Greeting", "name": "greeting", "type": "string", "default": "Hello" }
    ]
}"##;

#[test]
fn test_loads_json_schemas() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("greeter.json"), GREETER).unwrap();
    std::fs::write(dir.path().join("README.md"), "not a schema").unwrap();

    let mut registry = NodeTypeRegistry::new();
    let loaded = SchemaLoader::new(dir.path()).load_into(&mut registry).unwrap();

    assert_eq!(loaded, 1);
    let schema = registry.get("greeter").expect("registered");
    assert_eq!(schema.max_nodes, Some(2));
    assert_eq!(schema.version, 1);
    assert_eq!(schema.defaults.color.as_deref(), Some("#00aa00"));
    assert_eq!(schema.properties[0].kind, PropertyType::String);
    assert_eq!(registry.list_node_types(), vec!["greeter"]);
}

#[test]
fn test_schema_without_name_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("anonymous.json"), r#"{ "name": "" }"#).unwrap();

    let mut registry = NodeTypeRegistry::new();
    let err = SchemaLoader::new(dir.path()).load_into(&mut registry).unwrap_err();

    assert!(matches!(err, FlowError::Registry(_)));
    assert!(registry.is_empty());
}

#[test]
fn test_invalid_files_fail() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("broken.json"), "{ not json").unwrap();

    let mut registry = NodeTypeRegistry::new();
    let err = SchemaLoader::new(dir.path()).load_into(&mut registry).unwrap_err();
    assert!(matches!(err, FlowError::Serialization(_)));

    let err = SchemaLoader::new(dir.path().join("missing"))
        .load_into(&mut registry)
        .unwrap_err();
    assert!(matches!(err, FlowError::Io(_)));
}

#[test]
fn test_later_registration_replaces_earlier() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("greeter.json"), GREETER).unwrap();

    let mut registry = NodeTypeRegistry::new();
    registry.register(flowcore::NodeTypeSchema::new("greeter"));
    SchemaLoader::new(dir.path()).load_into(&mut registry).unwrap();

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get("greeter").unwrap().display_name, "Greeter");
}
