use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Parameter name -> value, shaped by the node type's schema
pub type NodeParameters = Map<String, Value>;

/// Credential type name -> name of the stored credential
pub type NodeCredentials = BTreeMap<String, String>;

/// Issues per node name; a workflow without issues has no map at all
pub type WorkflowIssues = BTreeMap<String, NodeIssues>;

/// Keys with this prefix are editor-internal and never persisted
pub const INTERNAL_KEY_PREFIX: char = '_';

pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}

/// A node as held by the editor.
///
/// `parameters` sits behind an `Arc` so that cloning a node copies its
/// top-level fields while the parameter map stays shared. Use
/// [`Node::deep_clone`] when the copy must be fully independent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub name: String,

    #[serde(rename = "type")]
    pub node_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<[f64; 2]>,

    #[serde(default)]
    pub parameters: Arc<NodeParameters>,

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

    /// Cached validation result, runtime only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issues: Option<NodeIssues>,

    /// Cached execution status, runtime only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Any further top-level fields (typeVersion, webhookId, `_`-prefixed
    /// editor state, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Node {
    pub fn new(name: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            node_type: node_type.into(),
            position: None,
            parameters: Arc::new(NodeParameters::new()),
            credentials: None,
            color: None,
            disabled: false,
            continue_on_fail: false,
            notes: None,
            issues: None,
            status: None,
            extra: Map::new(),
        }
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        Arc::make_mut(&mut self.parameters).insert(key.into(), value.into());
        self
    }

    pub fn with_credential(
        mut self,
        credential_type: impl Into<String>,
        credential_name: impl Into<String>,
    ) -> Self {
        self.credentials
            .get_or_insert_with(NodeCredentials::new)
            .insert(credential_type.into(), credential_name.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = Some([x, y]);
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn continue_on_fail(mut self) -> Self {
        self.continue_on_fail = true;
        self
    }

    /// Mutable access to the parameters, detaching them from any shallow copies
    pub fn parameters_mut(&mut self) -> &mut NodeParameters {
        Arc::make_mut(&mut self.parameters)
    }

    /// Clone that shares nothing with `self`
    pub fn deep_clone(&self) -> Self {
        Self {
            parameters: Arc::new(self.parameters.as_ref().clone()),
            ..self.clone()
        }
    }

    /// True when both nodes point at the same parameter map
    pub fn shares_parameters_with(&self, other: &Node) -> bool {
        Arc::ptr_eq(&self.parameters, &other.parameters)
    }
}

/// Structured problems found on a single node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeIssues {
    #[serde(default, skip_serializing_if = "is_false")]
    pub type_unknown: bool,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, Vec<String>>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub credentials: BTreeMap<String, Vec<String>>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub execution: bool,
}

impl NodeIssues {
    pub fn type_unknown() -> Self {
        Self {
            type_unknown: true,
            ..Self::default()
        }
    }

    pub fn add_parameter_issue(&mut self, parameter: impl Into<String>, message: impl Into<String>) {
        self.parameters
            .entry(parameter.into())
            .or_default()
            .push(message.into());
    }

    pub fn add_credential_issue(&mut self, credential_type: impl Into<String>, message: impl Into<String>) {
        self.credentials
            .entry(credential_type.into())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        !self.type_unknown
            && !self.execution
            && self.parameters.is_empty()
            && self.credentials.is_empty()
    }

    /// `None` when nothing was recorded
    pub fn into_option(self) -> Option<Self> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}
