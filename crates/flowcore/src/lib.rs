//! Core data model for the workflow editor
//!
//! Nodes, connections, the workflow graph, node type schemas and recorded
//! run data. Everything here is plain data plus read-only queries; the
//! resolution and serialization logic lives in `floweditor`.

mod display;
mod error;
mod node;
mod run_data;
mod schema;
mod value;
mod workflow;

pub use display::{display_parameter, DisplayOptions};
pub use error::{ExpressionError, FlowError, GraphError};
pub use node::{Node, NodeCredentials, NodeIssues, NodeParameters, WorkflowIssues, INTERNAL_KEY_PREFIX};
pub use run_data::{
    ExecutionSnapshot, ResultData, RunData, RunError, RunExecutionData, RunRecord,
    TaskDataConnections,
};
pub use schema::{
    CredentialDescription, NodeProperty, NodeTypeDefaults, NodeTypeSchema, NodeTypes,
    OptionValue, PropertyOptions, PropertyType,
};
pub use value::{is_empty_value, type_name, Item, ItemBatch};
pub use workflow::{Connection, Workflow, MAIN_CONNECTION};

/// Result type for flow operations
pub type Result<T> = std::result::Result<T, FlowError>;
