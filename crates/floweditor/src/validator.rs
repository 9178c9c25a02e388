use crate::parameters::resolve_parameters;
use flowcore::{display_parameter, is_empty_value, Node, NodeIssues, NodeTypeSchema, PropertyType};
use serde_json::Value;

/// What a validation pass should look at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueConcern {
    Parameters,
    Credentials,
    /// Everything that blocks execution; implies the other concerns
    Execution,
}

/// Per-type validation of a node's current state
pub trait NodeValidator: Send + Sync {
    fn validate(&self, schema: &NodeTypeSchema, node: &Node, concerns: &[IssueConcern]) -> Option<NodeIssues>;
}

/// Validates displayed parameters and credentials against the schema.
///
/// Reports required parameters left empty, `options` parameters holding a
/// value the type does not offer, and required credentials that are not
/// set.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParameterValidator;

impl ParameterValidator {
    fn check_parameters(&self, schema: &NodeTypeSchema, node: &Node, issues: &mut NodeIssues) {
        let resolved = resolve_parameters(&schema.properties, &node.parameters);

        for property in &resolved.displayed {
            let value = resolved.value(&property.name).unwrap_or(&Value::Null);

            if property.required && is_empty_value(value) {
                issues.add_parameter_issue(
                    &property.name,
                    format!("Parameter \"{}\" is required.", property.display_name),
                );
                continue;
            }

            let options = property.option_values();
            if property.kind == PropertyType::Options
                && !options.is_empty()
                && !options.iter().any(|option| &option.value == value)
            {
                issues.add_parameter_issue(
                    &property.name,
                    format!(
                        "The value {} is not supported for \"{}\".",
                        value, property.display_name
                    ),
                );
            }
        }
    }

    fn check_credentials(&self, schema: &NodeTypeSchema, node: &Node, issues: &mut NodeIssues) {
        let Some(credentials) = &schema.credentials else {
            return;
        };
        let resolved = resolve_parameters(&schema.properties, &node.parameters);

        for credential in credentials {
            if !credential.required {
                continue;
            }
            if !display_parameter(&resolved.values, credential.display_options.as_ref()) {
                continue;
            }
            let is_set = node
                .credentials
                .as_ref()
                .and_then(|set| set.get(&credential.name))
                .is_some_and(|name| !name.is_empty());
            if !is_set {
                issues.add_credential_issue(
                    &credential.name,
                    format!("Credentials for \"{}\" are not set.", credential.name),
                );
            }
        }
    }
}

impl NodeValidator for ParameterValidator {
    fn validate(&self, schema: &NodeTypeSchema, node: &Node, concerns: &[IssueConcern]) -> Option<NodeIssues> {
        let wants = |concern: IssueConcern| {
            concerns.contains(&concern) || concerns.contains(&IssueConcern::Execution)
        };

        let mut issues = NodeIssues::default();
        if wants(IssueConcern::Parameters) {
            self.check_parameters(schema, node, &mut issues);
        }
        if wants(IssueConcern::Credentials) {
            self.check_credentials(schema, node, &mut issues);
        }

        issues.into_option()
    }
}
