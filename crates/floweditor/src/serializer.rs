use crate::parameters::{persistable_parameters, resolve_parameters};
use flowcore::{
    display_parameter, Node, NodeCredentials, NodeParameters, NodeTypes, INTERNAL_KEY_PREFIX,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Fields that are never copied as-is; the persisted ones are re-added below
const SKIP_KEYS: [&str; 8] = [
    "color",
    "continueOnFail",
    "credentials",
    "disabled",
    "issues",
    "notes",
    "parameters",
    "status",
];

fn is_false(value: &bool) -> bool {
    !*value
}

/// Minimal, schema-normalised form of a node for storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistableNode {
    pub name: String,

    #[serde(rename = "type")]
    pub node_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<[f64; 2]>,

    #[serde(default)]
    pub parameters: NodeParameters,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<NodeCredentials>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub disabled: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub continue_on_fail: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PersistableNode {
    fn base(node: &Node) -> Self {
        let extra = node
            .extra
            .iter()
            .filter(|(key, _)| {
                !key.starts_with(INTERNAL_KEY_PREFIX) && !SKIP_KEYS.contains(&key.as_str())
            })
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Self {
            name: node.name.clone(),
            node_type: node.node_type.clone(),
            position: node.position,
            parameters: NodeParameters::new(),
            credentials: None,
            color: None,
            disabled: false,
            continue_on_fail: false,
            notes: None,
            extra,
        }
    }

    /// Load a persisted node back into the editor
    pub fn into_node(self) -> Node {
        Node {
            name: self.name,
            node_type: self.node_type,
            position: self.position,
            parameters: Arc::new(self.parameters),
            credentials: self.credentials,
            color: self.color,
            disabled: self.disabled,
            continue_on_fail: self.continue_on_fail,
            notes: self.notes,
            issues: None,
            status: None,
            extra: self.extra,
        }
    }
}

/// Convert an editor node into its persisted form.
///
/// Runtime-only fields (`issues`, `status`, `_`-prefixed keys) are dropped.
/// When the node's type is known, parameters are reduced to the displayed,
/// non-default values, credentials to the declared and displayed ones, and
/// the color is kept only when it differs from the type's default. When the
/// type is unknown, parameters and credentials are kept verbatim.
///
/// Credential display conditions are checked against the effective
/// parameter values (stored values over defaults), not the raw stored map.
/// A condition on a parameter left at its default therefore sees the
/// default, which keeps persisting a node twice stable.
/// `disabled`, `continueOnFail` and `notes` are only written when set.
pub fn node_data_to_save(node: &Node, node_types: &dyn NodeTypes) -> PersistableNode {
    let mut data = PersistableNode::base(node);

    match node_types.get_by_name(&node.node_type) {
        Some(schema) => {
            let resolved = resolve_parameters(&schema.properties, &node.parameters);
            data.parameters = persistable_parameters(&resolved);

            if let (Some(credentials), Some(_)) = (&node.credentials, &schema.credentials) {
                let saved: NodeCredentials = credentials
                    .iter()
                    .filter(|(credential_type, _)| {
                        schema.credential(credential_type).is_some_and(|description| {
                            display_parameter(&resolved.values, description.display_options.as_ref())
                        })
                    })
                    .map(|(credential_type, name)| (credential_type.clone(), name.clone()))
                    .collect();

                if !saved.is_empty() {
                    data.credentials = Some(saved);
                }
            }

            if let Some(color) = node.color.as_ref().filter(|color| !color.is_empty()) {
                if schema.defaults.color.as_ref() != Some(color) {
                    data.color = Some(color.clone());
                }
            }
        }
        None => {
            tracing::debug!(
                "Node type {} of {} is unknown, saving parameters as they are",
                node.node_type,
                node.name
            );
            data.credentials = node.credentials.clone();
            data.parameters = node.parameters.as_ref().clone();
            // Color is only carried over onto an already present field, and
            // the base record never has one.
            if data.color.is_some() {
                data.color = node.color.clone();
            }
        }
    }

    if node.disabled {
        data.disabled = true;
    }
    if node.continue_on_fail {
        data.continue_on_fail = true;
    }
    if let Some(notes) = node.notes.as_ref().filter(|notes| !notes.is_empty()) {
        data.notes = Some(notes.clone());
    }

    data
}
