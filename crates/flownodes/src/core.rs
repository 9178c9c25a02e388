use flowcore::NodeTypeSchema;

pub const START: &str = "start";
pub const NO_OP: &str = "noOp";

/// Entry point of a manually started workflow; at most one per workflow
pub fn start() -> NodeTypeSchema {
    let mut schema = NodeTypeSchema::new(START)
        .with_default_color("#553399")
        .with_max_nodes(1);
    schema.display_name = "Start".to_string();
    schema.description = "Starts the workflow execution from this node".to_string();
    schema.defaults.name = "Start".to_string();
    schema.inputs = Vec::new();
    schema
}

/// Passes its input through unchanged
pub fn no_op() -> NodeTypeSchema {
    let mut schema = NodeTypeSchema::new(NO_OP).with_default_color("#b0b0b0");
    schema.display_name = "No Operation".to_string();
    schema.description = "No operation, just passes the data through".to_string();
    schema.defaults.name = "NoOp".to_string();
    schema
}
