//! Schema-driven parameter normalisation.
//!
//! A node's raw parameters are interpreted against the ordered parameter
//! definitions of its type. Display conditions are evaluated against the
//! *effective* values: raw values laid over the declared defaults, with
//! every parameter that is not currently displayed reset to its default.
//! Because hiding one parameter can change what another condition sees, the
//! effective values are iterated to a fixed point.

use flowcore::{display_parameter, NodeParameters, NodeProperty, PropertyType};
use serde_json::Value;
use std::collections::HashSet;

/// Effective parameter values and the definitions currently displayed
#[derive(Debug, Clone)]
pub struct ResolvedParameters<'a> {
    pub values: NodeParameters,
    pub displayed: Vec<&'a NodeProperty>,
}

impl ResolvedParameters<'_> {
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }
}

/// Resolve `raw` against the definitions in `properties`.
///
/// A name declared more than once (e.g. once per resource) takes the first
/// definition that is displayed.
pub fn resolve_parameters<'a>(properties: &'a [NodeProperty], raw: &NodeParameters) -> ResolvedParameters<'a> {
    let mut context = NodeParameters::new();
    for property in properties {
        if !context.contains_key(&property.name) {
            let value = raw
                .get(&property.name)
                .and_then(|v| normalise(property, v))
                .unwrap_or_else(|| property.default.clone());
            context.insert(property.name.clone(), value);
        }
    }

    // Each round either settles or flips at least one visibility decision
    for _ in 0..=properties.len() {
        let next = resolve_pass(properties, raw, &context);
        if next.values == context {
            return next;
        }
        context = next.values;
    }

    tracing::warn!("Parameter display conditions did not settle, using last pass");
    resolve_pass(properties, raw, &context)
}

fn resolve_pass<'a>(properties: &'a [NodeProperty], raw: &NodeParameters, context: &NodeParameters) -> ResolvedParameters<'a> {
    let mut values = NodeParameters::new();
    let mut displayed = Vec::new();
    let mut assigned = HashSet::new();

    for property in properties {
        if assigned.contains(property.name.as_str()) {
            continue;
        }
        if !display_parameter(context, property.display_options.as_ref()) {
            continue;
        }

        assigned.insert(property.name.as_str());
        displayed.push(property);

        let value = raw
            .get(&property.name)
            .and_then(|v| normalise(property, v))
            .unwrap_or_else(|| property.default.clone());
        values.insert(property.name.clone(), value);
    }

    for property in properties {
        if !values.contains_key(&property.name) {
            values.insert(property.name.clone(), property.default.clone());
        }
    }

    ResolvedParameters { values, displayed }
}

/// Shape a raw value to its definition; `None` falls back to the default
fn normalise(property: &NodeProperty, value: &Value) -> Option<Value> {
    match property.kind {
        PropertyType::Collection => {
            let Value::Object(entries) = value else {
                return None;
            };
            let children = property.child_properties();
            let kept = entries
                .iter()
                .filter(|(key, _)| children.iter().any(|child| &child.name == *key))
                .map(|(key, v)| (key.clone(), v.clone()))
                .collect();
            Some(Value::Object(kept))
        }
        _ => Some(value.clone()),
    }
}

/// Parameters worth persisting: every displayed parameter whose effective
/// value differs from its declared default.
pub fn get_node_parameters(properties: &[NodeProperty], raw: &NodeParameters) -> NodeParameters {
    persistable_parameters(&resolve_parameters(properties, raw))
}

pub fn persistable_parameters(resolved: &ResolvedParameters<'_>) -> NodeParameters {
    resolved
        .displayed
        .iter()
        .filter_map(|property| {
            let value = resolved.values.get(&property.name)?;
            (value != &property.default).then(|| (property.name.clone(), value.clone()))
        })
        .collect()
}
