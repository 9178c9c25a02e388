//! Recorded results of a workflow run.
//!
//! These types are produced by the execution engine and only ever read by
//! the editor core.

use crate::ItemBatch;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Connection type name -> one batch per connection index
pub type TaskDataConnections = HashMap<String, Vec<ItemBatch>>;

/// Node name -> one record per run of that node
pub type RunData = HashMap<String, Vec<RunRecord>>;

/// Error recorded for a failed node run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunError {
    pub message: String,
}

/// One node's recorded data for one run index
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRecord {
    #[serde(default)]
    pub start_time: i64,

    #[serde(default)]
    pub execution_time: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<TaskDataConnections>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RunError>,
}

impl RunRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a batch to the given connection type
    pub fn with_batch(mut self, connection_type: impl Into<String>, batch: ItemBatch) -> Self {
        self.data
            .get_or_insert_with(HashMap::new)
            .entry(connection_type.into())
            .or_default()
            .push(batch);
        self
    }

    pub fn batch(&self, connection_type: &str, index: usize) -> Option<&ItemBatch> {
        self.data.as_ref()?.get(connection_type)?.get(index)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultData {
    #[serde(default)]
    pub run_data: RunData,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_node_executed: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RunError>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunExecutionData {
    #[serde(default)]
    pub result_data: ResultData,
}

impl RunExecutionData {
    /// Execution data of a run that has not produced anything yet
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn run_data(&self) -> &RunData {
        &self.result_data.run_data
    }
}

/// A completed or in-progress workflow run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub finished: bool,

    #[serde(default = "default_mode")]
    pub mode: String,

    #[serde(default)]
    pub data: RunExecutionData,
}

fn default_mode() -> String {
    "manual".to_string()
}

impl ExecutionSnapshot {
    pub fn new(run_data: RunData) -> Self {
        Self {
            id: None,
            finished: false,
            mode: default_mode(),
            data: RunExecutionData {
                result_data: ResultData {
                    run_data,
                    ..ResultData::default()
                },
            },
        }
    }

    pub fn run_data(&self) -> &RunData {
        self.data.run_data()
    }
}
