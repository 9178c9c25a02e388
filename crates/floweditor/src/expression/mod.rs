//! Expression resolution in the context of the editor's active node.

mod template;

pub use template::TemplateEngine;

use crate::resolver::connection_input_data;
use crate::EditorConfig;
use flowcore::{ExecutionSnapshot, ExpressionError, Item, RunExecutionData, Workflow};
use serde_json::Value;

/// Everything an expression may refer to
#[derive(Debug, Clone, Copy)]
pub struct ExpressionContext<'a> {
    pub workflow: &'a Workflow,
    pub run_execution_data: &'a RunExecutionData,
    pub run_index: usize,
    pub item_index: usize,
    pub active_node: &'a str,
    pub connection_input_data: &'a [Item],
}

/// Evaluates expression text against a context
pub trait ExpressionEngine: Send + Sync {
    fn evaluate(&self, expression: &str, ctx: &ExpressionContext<'_>) -> Result<Value, ExpressionError>;
}

/// Evaluate `expression` as seen from `active_node`.
///
/// The context is fixed to the configured run, item and input index on the
/// primary input, with the single nearest parent as the data source. A
/// missing parent or a missing run yields an empty item batch, and a
/// missing snapshot is replaced by empty execution data, so expressions
/// against unexecuted nodes see "no data" instead of failing here.
pub fn resolve_expression(
    expression: &str,
    active_node: &str,
    workflow: &Workflow,
    execution: Option<&ExecutionSnapshot>,
    engine: &dyn ExpressionEngine,
    config: &EditorConfig,
) -> Result<Value, ExpressionError> {
    if workflow.node(active_node).is_none() {
        return Err(ExpressionError::UnknownNode(active_node.to_string()));
    }

    let parent_nodes = workflow.parent_nodes(active_node, &config.primary_input, Some(1));
    let input = connection_input_data(
        &parent_nodes,
        &config.primary_input,
        config.expression_run_index,
        config.expression_input_index,
        execution.map(ExecutionSnapshot::run_data),
    )
    .unwrap_or(&[]);

    let empty = RunExecutionData::empty();
    let run_execution_data = execution.map_or(&empty, |snapshot| &snapshot.data);

    tracing::debug!(
        "Resolving expression for {} with {} input item(s) from {:?}",
        active_node,
        input.len(),
        parent_nodes.first()
    );

    let ctx = ExpressionContext {
        workflow,
        run_execution_data,
        run_index: config.expression_run_index,
        item_index: config.expression_item_index,
        active_node,
        connection_input_data: input,
    };

    engine.evaluate(expression, &ctx)
}
