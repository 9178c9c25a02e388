use crate::{DisplayOptions, FlowError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Description of a node type: its parameters, credentials and limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeTypeSchema {
    pub name: String,

    #[serde(default)]
    pub display_name: String,

    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub defaults: NodeTypeDefaults,

    #[serde(default)]
    pub inputs: Vec<String>,

    #[serde(default)]
    pub outputs: Vec<String>,

    #[serde(default)]
    pub properties: Vec<NodeProperty>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Vec<CredentialDescription>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_nodes: Option<usize>,
}

fn default_version() -> u32 {
    1
}

impl NodeTypeSchema {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            name,
            version: default_version(),
            description: String::new(),
            defaults: NodeTypeDefaults::default(),
            inputs: vec!["main".to_string()],
            outputs: vec!["main".to_string()],
            properties: Vec::new(),
            credentials: None,
            max_nodes: None,
        }
    }

    pub fn with_property(mut self, property: NodeProperty) -> Self {
        self.properties.push(property);
        self
    }

    pub fn with_credential(mut self, credential: CredentialDescription) -> Self {
        self.credentials.get_or_insert_with(Vec::new).push(credential);
        self
    }

    pub fn with_default_color(mut self, color: impl Into<String>) -> Self {
        self.defaults.color = Some(color.into());
        self
    }

    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    pub fn credential(&self, name: &str) -> Option<&CredentialDescription> {
        self.credentials.as_ref()?.iter().find(|c| c.name == name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeTypeDefaults {
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyType {
    String,
    Number,
    Boolean,
    Options,
    MultiOptions,
    Json,
    Color,
    DateTime,
    Collection,
    #[serde(other)]
    Other,
}

/// One selectable value of an `options` parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionValue {
    pub name: String,
    pub value: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// `options` holds either selectable values or, for collections, child
/// parameter definitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyOptions {
    Properties(Vec<NodeProperty>),
    Values(Vec<OptionValue>),
}

/// A parameter definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeProperty {
    pub display_name: String,
    pub name: String,

    #[serde(rename = "type")]
    pub kind: PropertyType,

    #[serde(default)]
    pub default: Value,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<PropertyOptions>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_options: Option<DisplayOptions>,
}

impl NodeProperty {
    pub fn new(name: impl Into<String>, kind: PropertyType, default: impl Into<Value>) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            name,
            kind,
            default: default.into(),
            required: false,
            description: None,
            options: None,
            display_options: None,
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, PropertyType::String, "")
    }

    pub fn boolean(name: impl Into<String>, default: bool) -> Self {
        Self::new(name, PropertyType::Boolean, default)
    }

    pub fn options<V: Into<Value>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = V>,
        default: impl Into<Value>,
    ) -> Self {
        let values = values
            .into_iter()
            .map(|v| {
                let value = v.into();
                OptionValue {
                    name: value.as_str().map(str::to_string).unwrap_or_else(|| value.to_string()),
                    value,
                    description: None,
                }
            })
            .collect();
        let mut property = Self::new(name, PropertyType::Options, default);
        property.options = Some(PropertyOptions::Values(values));
        property
    }

    pub fn collection(name: impl Into<String>, children: Vec<NodeProperty>) -> Self {
        let mut property = Self::new(name, PropertyType::Collection, Value::Object(Default::default()));
        property.options = Some(PropertyOptions::Properties(children));
        property
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn with_display_options(mut self, display_options: DisplayOptions) -> Self {
        self.display_options = Some(display_options);
        self
    }

    /// Selectable values, empty unless this is an `options` parameter
    pub fn option_values(&self) -> &[OptionValue] {
        match &self.options {
            Some(PropertyOptions::Values(values)) => values,
            _ => &[],
        }
    }

    /// Child definitions, empty unless this is a collection
    pub fn child_properties(&self) -> &[NodeProperty] {
        match &self.options {
            Some(PropertyOptions::Properties(children)) => children,
            _ => &[],
        }
    }
}

/// A credential type a node type may use
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialDescription {
    pub name: String,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_options: Option<DisplayOptions>,
}

impl CredentialDescription {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: false,
            display_options: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_display_options(mut self, display_options: DisplayOptions) -> Self {
        self.display_options = Some(display_options);
        self
    }
}

/// Read access to node type schemas.
///
/// Lookups of unknown names return `None`; they never fail.
pub trait NodeTypes: Send + Sync {
    /// Load schemas up front; nothing to do for in-memory sources
    fn init(&self) -> Result<(), FlowError> {
        Ok(())
    }

    /// All known schemas
    fn all(&self) -> Vec<Arc<NodeTypeSchema>>;

    /// Schema for a type name, if known
    fn get_by_name(&self, name: &str) -> Option<Arc<NodeTypeSchema>>;
}
