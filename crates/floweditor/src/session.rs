use crate::builder::build_workflow;
use crate::cardinality::{node_types_max_count, NodeTypesMaxCount};
use crate::expression::{resolve_expression, ExpressionEngine, TemplateEngine};
use crate::persistence::{workflow_data_to_save, SaveError, WorkflowData, WorkflowStore};
use crate::readiness::check_ready_for_execution;
use crate::registry::{NodeTypeRegistry, RegistryAdapter};
use crate::validator::{NodeValidator, ParameterValidator};
use crate::EditorConfig;
use flowcore::{
    Connection, ExecutionSnapshot, ExpressionError, FlowError, GraphError, Node, Workflow,
    WorkflowIssues,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Everything the editor currently holds for one workflow
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorState {
    /// Tracked id; `None` or the placeholder for unsaved workflows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_id: Option<String>,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub active: bool,

    #[serde(default)]
    pub settings: Map<String, Value>,

    #[serde(default)]
    pub nodes: Vec<Node>,

    #[serde(default)]
    pub connections: Vec<Connection>,

    /// Last run, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution: Option<ExecutionSnapshot>,

    /// Node whose parameters are open in the editor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_node: Option<String>,
}

/// Clears the in-progress flag when a save ends, including when its future
/// is dropped before completion.
struct SavingGuard<'a>(&'a AtomicBool);

impl Drop for SavingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// An editing session over one workflow.
///
/// Every query works on a snapshot of the state taken when it starts, so a
/// concurrent edit never shows up halfway through a resolution.
pub struct EditorSession {
    registry: Arc<NodeTypeRegistry>,
    validator: Arc<dyn NodeValidator>,
    engine: Arc<dyn ExpressionEngine>,
    config: EditorConfig,
    state: RwLock<EditorState>,
    saving: AtomicBool,
}

impl EditorSession {
    /// Create a session with the default validator, engine and configuration
    pub fn new(registry: Arc<NodeTypeRegistry>, state: EditorState) -> Self {
        Self::with_config(registry, state, EditorConfig::default())
    }

    pub fn with_config(registry: Arc<NodeTypeRegistry>, state: EditorState, config: EditorConfig) -> Self {
        Self {
            registry,
            validator: Arc::new(ParameterValidator),
            engine: Arc::new(TemplateEngine),
            config,
            state: RwLock::new(state),
            saving: AtomicBool::new(false),
        }
    }

    pub fn with_validator(mut self, validator: Arc<dyn NodeValidator>) -> Self {
        self.validator = validator;
        self
    }

    pub fn with_engine(mut self, engine: Arc<dyn ExpressionEngine>) -> Self {
        self.engine = engine;
        self
    }

    pub fn registry(&self) -> &Arc<NodeTypeRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Copy of the current state
    pub async fn snapshot(&self) -> EditorState {
        self.state.read().await.clone()
    }

    /// Apply an edit to the state
    pub async fn update<F>(&self, edit: F)
    where
        F: FnOnce(&mut EditorState),
    {
        let mut state = self.state.write().await;
        edit(&mut state);
    }

    pub fn is_saving(&self) -> bool {
        self.saving.load(Ordering::SeqCst)
    }

    fn workflow_from(&self, state: &EditorState, deep_copy: bool) -> Result<Workflow, GraphError> {
        build_workflow(
            &state.nodes,
            &state.connections,
            Arc::new(RegistryAdapter::new(self.registry.clone())),
            state.workflow_id.as_deref(),
            &self.config,
            deep_copy,
        )
    }

    /// Workflow graph of the current state
    pub async fn workflow(&self, deep_copy: bool) -> Result<Workflow, GraphError> {
        let state = self.state.read().await;
        self.workflow_from(&state, deep_copy)
    }

    /// `None` when the workflow can be executed, otherwise the issues per node
    pub async fn check_ready_for_execution(&self) -> Result<Option<WorkflowIssues>, GraphError> {
        let workflow = self.workflow(false).await?;
        Ok(check_ready_for_execution(&workflow, self.validator.as_ref()))
    }

    pub async fn node_types_max_count(&self) -> NodeTypesMaxCount {
        let state = self.state.read().await;
        node_types_max_count(&state.nodes, self.registry.as_ref())
    }

    /// Evaluate an expression as seen from the active node
    pub async fn resolve_expression(&self, expression: &str) -> Result<Value, FlowError> {
        let state = self.snapshot().await;
        let active_node = state.active_node.as_deref().ok_or(ExpressionError::NoActiveNode)?;
        let workflow = self.workflow_from(&state, false)?;

        Ok(resolve_expression(
            expression,
            active_node,
            &workflow,
            state.execution.as_ref(),
            self.engine.as_ref(),
            &self.config,
        )?)
    }

    pub async fn workflow_data_to_save(&self) -> WorkflowData {
        let state = self.state.read().await;
        workflow_data_to_save(&state, self.registry.as_ref(), &self.config)
    }

    /// Save the workflow.
    ///
    /// A workflow that was never saved, or a save under `new_name`, creates a
    /// new stored workflow named `new_name` (or the current name). Its id and
    /// name are adopted only once the store confirms. Anything else updates
    /// the stored workflow in place. Only one save runs at a time; a second
    /// concurrent call fails with [`SaveError::AlreadySaving`].
    pub async fn save(&self, store: &dyn WorkflowStore, new_name: Option<&str>) -> Result<WorkflowData, SaveError> {
        if self
            .saving
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::warn!("Save requested while another save is in progress");
            return Err(SaveError::AlreadySaving);
        }

        let _guard = SavingGuard(&self.saving);
        let result = self.save_inner(store, new_name).await;

        match &result {
            Ok(data) => tracing::info!("Workflow \"{}\" saved as {:?}", data.name, data.id),
            Err(e) => tracing::error!("Saving workflow failed: {}", e),
        }
        result
    }

    async fn save_inner(&self, store: &dyn WorkflowStore, new_name: Option<&str>) -> Result<WorkflowData, SaveError> {
        let state = self.snapshot().await;
        let existing_id = self
            .config
            .persisted_id(state.workflow_id.as_deref())
            .map(str::to_string);

        let mut data = workflow_data_to_save(&state, self.registry.as_ref(), &self.config);

        match (existing_id, new_name) {
            (Some(id), None) => {
                store.update(&id, data.clone()).await?;
                data.id = Some(id);
                Ok(data)
            }
            (_, name) => {
                let name = name.unwrap_or(state.name.as_str());
                if name.is_empty() {
                    return Err(SaveError::NameMissing);
                }
                data.id = None;
                data.name = name.to_string();

                let created = store.create(data).await?;
                self.update(|current| {
                    current.name = created.name.clone();
                    current.workflow_id = created.id.clone();
                })
                .await;
                Ok(created)
            }
        }
    }
}
