use flowcore::{FlowError, MAIN_CONNECTION};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Identifier the editor tracks for a workflow that was never saved
pub const PLACEHOLDER_EMPTY_WORKFLOW_ID: &str = "__EMPTY__";

/// Configuration for the editor core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Tracked workflow id meaning "new / unsaved"
    pub placeholder_workflow_id: String,
    /// Connection type used when resolving expression input
    pub primary_input: String,
    pub expression_run_index: usize,
    pub expression_item_index: usize,
    pub expression_input_index: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            placeholder_workflow_id: PLACEHOLDER_EMPTY_WORKFLOW_ID.to_string(),
            primary_input: MAIN_CONNECTION.to_string(),
            expression_run_index: 0,
            expression_item_index: 0,
            expression_input_index: 0,
        }
    }
}

impl EditorConfig {
    /// Load from a JSON file; missing fields keep their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, FlowError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// The tracked id as it may be persisted: `None` for the placeholder
    pub fn persisted_id<'a>(&self, tracked: Option<&'a str>) -> Option<&'a str> {
        tracked.filter(|id| *id != self.placeholder_workflow_id)
    }
}
