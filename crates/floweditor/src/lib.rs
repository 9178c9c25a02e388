//! Editor-side workflow logic
//!
//! Builds workflow graphs from the editor state, resolves which upstream
//! items a node sees, checks readiness for execution, reduces nodes to their
//! persisted form, evaluates expressions and drives saving.

mod builder;
mod cardinality;
mod config;
pub mod expression;
mod loader;
mod parameters;
mod persistence;
mod readiness;
mod registry;
mod resolver;
mod serializer;
mod session;
mod store;
mod validator;

pub use builder::build_workflow;
pub use cardinality::{can_add_node, node_type_count, node_types_max_count, NodeTypeMaxCount, NodeTypesMaxCount};
pub use config::{EditorConfig, PLACEHOLDER_EMPTY_WORKFLOW_ID};
pub use expression::{resolve_expression, ExpressionContext, ExpressionEngine, TemplateEngine};
pub use parameters::{get_node_parameters, persistable_parameters, resolve_parameters, ResolvedParameters};
pub use loader::SchemaLoader;
pub use persistence::{workflow_data_to_save, SaveError, StoreError, WorkflowData, WorkflowStore};
pub use readiness::check_ready_for_execution;
pub use registry::{NodeTypeRegistry, RegistryAdapter};
pub use resolver::connection_input_data;
pub use serializer::{node_data_to_save, PersistableNode};
pub use session::{EditorSession, EditorState};
pub use store::{FileStore, MemoryStore, StoredWorkflow};
pub use validator::{IssueConcern, NodeValidator, ParameterValidator};
