use crate::serializer::{node_data_to_save, PersistableNode};
use crate::{EditorConfig, EditorState};
use async_trait::async_trait;
use flowcore::{Connection, NodeTypes};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// A workflow as stored by the persistence backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub nodes: Vec<PersistableNode>,
    #[serde(default)]
    pub connections: Vec<Connection>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub settings: Map<String, Value>,
}

/// Failure reported by a [`WorkflowStore`]; the message is kept verbatim
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Workflow not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Rejected(String),

    #[error("Storage IO failed: {0}")]
    Io(String),

    #[error("Invalid stored workflow: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SaveError {
    #[error("No name for the workflow was entered, so it could not be saved")]
    NameMissing,

    #[error("The workflow is already being saved")]
    AlreadySaving,

    #[error("There was a problem saving the workflow: {0}")]
    Store(#[from] StoreError),
}

/// Persistence backend for workflows
#[async_trait]
pub trait WorkflowStore: Send + Sync {
    /// Store a new workflow and return it with its assigned id
    async fn create(&self, data: WorkflowData) -> Result<WorkflowData, StoreError>;

    /// Replace the stored workflow `id`
    async fn update(&self, id: &str, data: WorkflowData) -> Result<(), StoreError>;
}

/// Assemble the document to persist from the editor's current state.
///
/// The id is only set for workflows that were saved before.
pub fn workflow_data_to_save(
    state: &EditorState,
    node_types: &dyn NodeTypes,
    config: &EditorConfig,
) -> WorkflowData {
    WorkflowData {
        id: config.persisted_id(state.workflow_id.as_deref()).map(str::to_string),
        name: state.name.clone(),
        nodes: state
            .nodes
            .iter()
            .map(|node| node_data_to_save(node, node_types))
            .collect(),
        connections: state.connections.clone(),
        active: state.active,
        settings: state.settings.clone(),
    }
}
