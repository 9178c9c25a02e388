use crate::validator::{IssueConcern, NodeValidator};
use flowcore::{NodeIssues, Workflow, WorkflowIssues};

/// Check that every enabled node of `workflow` can be executed.
///
/// Disabled nodes are skipped. A node whose type the registry does not know
/// is flagged with `typeUnknown` and not validated further; every other node
/// is handed to `validator` for the execution concern. Returns `None` when
/// no node has issues, otherwise the issues of every affected node.
pub fn check_ready_for_execution(workflow: &Workflow, validator: &dyn NodeValidator) -> Option<WorkflowIssues> {
    let mut workflow_issues = WorkflowIssues::new();

    for node in workflow.nodes() {
        if node.disabled {
            continue;
        }

        let node_issues = match workflow.node_type_of(node) {
            None => {
                tracing::debug!("Node {} has unknown type {}", node.name, node.node_type);
                Some(NodeIssues::type_unknown())
            }
            Some(schema) => validator.validate(&schema, node, &[IssueConcern::Execution]),
        };

        if let Some(issues) = node_issues {
            workflow_issues.insert(node.name.clone(), issues);
        }
    }

    if workflow_issues.is_empty() {
        tracing::debug!("Workflow is ready for execution");
        return None;
    }

    tracing::info!("Workflow has issues on {} node(s)", workflow_issues.len());
    Some(workflow_issues)
}
