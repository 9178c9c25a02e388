use crate::NodeParameters;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Condition deciding whether a parameter or credential is shown, given the
/// values of its sibling parameters.
///
/// A `show` entry matches when the sibling is set and its value is one of
/// the listed values. A `hide` entry matches when the sibling is set and its
/// value is listed. The target is displayed when every `show` entry matches
/// and no `hide` entry does.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show: Option<BTreeMap<String, Vec<Value>>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide: Option<BTreeMap<String, Vec<Value>>>,
}

impl DisplayOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show<V: Into<Value>>(
        mut self,
        parameter: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.show
            .get_or_insert_with(BTreeMap::new)
            .insert(parameter.into(), values.into_iter().map(Into::into).collect());
        self
    }

    pub fn hide<V: Into<Value>>(
        mut self,
        parameter: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.hide
            .get_or_insert_with(BTreeMap::new)
            .insert(parameter.into(), values.into_iter().map(Into::into).collect());
        self
    }

    pub fn matches(&self, values: &NodeParameters) -> bool {
        if let Some(show) = &self.show {
            for (parameter, allowed) in show {
                match values.get(parameter) {
                    Some(value) if allowed.contains(value) => {}
                    _ => return false,
                }
            }
        }

        if let Some(hide) = &self.hide {
            for (parameter, hidden) in hide {
                if let Some(value) = values.get(parameter) {
                    if hidden.contains(value) {
                        return false;
                    }
                }
            }
        }

        true
    }
}

/// Whether a target with the given condition is currently displayed.
/// Targets without a condition are always displayed.
pub fn display_parameter(values: &NodeParameters, display_options: Option<&DisplayOptions>) -> bool {
    display_options.map_or(true, |options| options.matches(values))
}
