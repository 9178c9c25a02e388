use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single data record flowing along a connection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub json: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binary: Option<Map<String, Value>>,
}

impl Item {
    pub fn new(json: Map<String, Value>) -> Self {
        Self { json, binary: None }
    }

    /// Build an item from any JSON value; non-objects are wrapped under `data`
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(json) => Self::new(json),
            other => {
                let mut json = Map::new();
                json.insert("data".to_string(), other);
                Self::new(json)
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.json.get(key)
    }
}

/// Ordered sequence of items, one per connection slot
pub type ItemBatch = Vec<Item>;

/// True for values an editor treats as "not filled in"
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Short human label for a JSON value's kind
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
