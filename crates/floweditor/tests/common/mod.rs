// crates/floweditor/tests/common/mod.rs
#![allow(dead_code)]

use flowcore::{
    CredentialDescription, DisplayOptions, Item, Node, NodeParameters, NodeProperty,
    NodeTypeSchema, PropertyType, RunData, RunRecord,
};
use floweditor::NodeTypeRegistry;
use serde_json::Value;
use std::sync::Arc;

pub const START: &str = "start";
pub const HTTP: &str = "httpRequest";
pub const MESSENGER: &str = "messenger";

pub fn start_type() -> NodeTypeSchema {
    NodeTypeSchema::new(START)
        .with_default_color("#553399")
        .with_max_nodes(1)
}

pub fn http_type() -> NodeTypeSchema {
    NodeTypeSchema::new(HTTP)
        .with_default_color("#ffffff")
        .with_credential(
            CredentialDescription::new("httpBasicAuth")
                .required()
                .with_display_options(DisplayOptions::new().show("authentication", ["basicAuth"])),
        )
        .with_credential(
            CredentialDescription::new("httpHeaderAuth")
                .required()
                .with_display_options(DisplayOptions::new().show("authentication", ["headerAuth"])),
        )
        .with_property(NodeProperty::options(
            "authentication",
            ["none", "basicAuth", "headerAuth"],
            "none",
        ))
        .with_property(NodeProperty::string("url").with_display_name("URL").required())
        .with_property(NodeProperty::options("requestMethod", ["GET", "POST"], "GET"))
        .with_property(
            NodeProperty::string("body")
                .with_display_options(DisplayOptions::new().show("requestMethod", ["POST"])),
        )
        .with_property(NodeProperty::collection(
            "options",
            vec![NodeProperty::new("timeout", PropertyType::Number, 10000)],
        ))
}

/// Declares `operation` once per resource
pub fn messenger_type() -> NodeTypeSchema {
    NodeTypeSchema::new(MESSENGER)
        .with_property(NodeProperty::options("resource", ["sms", "voice"], "sms"))
        .with_property(
            NodeProperty::options("operation", ["send"], "send")
                .with_display_options(DisplayOptions::new().show("resource", ["sms"])),
        )
        .with_property(
            NodeProperty::options("operation", ["call"], "call")
                .with_display_options(DisplayOptions::new().show("resource", ["voice"])),
        )
        .with_property(NodeProperty::string("to").required())
        .with_property(
            NodeProperty::string("message")
                .required()
                .with_display_options(DisplayOptions::new().show("operation", ["send"])),
        )
}

pub fn registry() -> Arc<NodeTypeRegistry> {
    let mut registry = NodeTypeRegistry::new();
    registry.register(start_type());
    registry.register(http_type());
    registry.register(messenger_type());
    Arc::new(registry)
}

pub fn params(value: Value) -> NodeParameters {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {}", other),
    }
}

pub fn http_node(name: &str, url: &str) -> Node {
    Node::new(name, HTTP).with_parameter("url", url)
}

pub fn items(values: Vec<Value>) -> Vec<Item> {
    values.into_iter().map(Item::from_value).collect()
}

/// Run data with a single run of `node` producing `values` on main output 0
pub fn run_data_for(node: &str, values: Vec<Value>) -> RunData {
    let mut run_data = RunData::new();
    run_data.insert(
        node.to_string(),
        vec![RunRecord::new().with_batch("main", items(values))],
    );
    run_data
}
