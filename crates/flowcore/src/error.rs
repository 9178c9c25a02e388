use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlowError {
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Expression error: {0}")]
    Expression(#[from] ExpressionError),

    #[error("Node type registry error: {0}")]
    Registry(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Integrity problems in the node/connection description of a workflow.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Duplicate node name: {0}")]
    DuplicateNode(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    #[error("Invalid expression '{expression}': {message}")]
    Syntax {
        expression: String,
        message: String,
    },

    #[error("Unknown variable: {0}")]
    UnknownVariable(String),

    #[error("No node is active")]
    NoActiveNode,

    #[error("Referenced node is unknown: {0}")]
    UnknownNode(String),

    #[error("No data found for node '{0}'")]
    NoNodeData(String),

    #[error("Cannot access '{key}' on {actual}")]
    InvalidAccess {
        key: String,
        actual: String,
    },
}
