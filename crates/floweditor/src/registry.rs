use flowcore::{NodeTypeSchema, NodeTypes};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Registry of known node type schemas
#[derive(Debug, Clone, Default)]
pub struct NodeTypeRegistry {
    schemas: BTreeMap<String, Arc<NodeTypeSchema>>,
}

impl NodeTypeRegistry {
    pub fn new() -> Self {
        Self {
            schemas: BTreeMap::new(),
        }
    }

    /// Register a schema, replacing any schema with the same name
    pub fn register(&mut self, schema: NodeTypeSchema) {
        tracing::info!("Registering node type: {}", schema.name);
        if self.schemas.contains_key(&schema.name) {
            tracing::warn!("Node type {} registered twice, keeping the latest", schema.name);
        }
        self.schemas.insert(schema.name.clone(), Arc::new(schema));
    }

    pub fn get(&self, node_type: &str) -> Option<Arc<NodeTypeSchema>> {
        self.schemas.get(node_type).cloned()
    }

    /// Get all registered node type names, sorted
    pub fn list_node_types(&self) -> Vec<String> {
        self.schemas.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl NodeTypes for NodeTypeRegistry {
    fn all(&self) -> Vec<Arc<NodeTypeSchema>> {
        self.schemas.values().cloned().collect()
    }

    fn get_by_name(&self, name: &str) -> Option<Arc<NodeTypeSchema>> {
        self.get(name)
    }
}

/// The registry view handed to a [`flowcore::Workflow`].
///
/// A workflow only ever looks types up by name, so bulk loading is a no-op
/// and the bulk listing is always empty.
#[derive(Debug, Clone)]
pub struct RegistryAdapter {
    registry: Arc<NodeTypeRegistry>,
}

impl RegistryAdapter {
    pub fn new(registry: Arc<NodeTypeRegistry>) -> Self {
        Self { registry }
    }
}

impl NodeTypes for RegistryAdapter {
    fn all(&self) -> Vec<Arc<NodeTypeSchema>> {
        Vec::new()
    }

    fn get_by_name(&self, name: &str) -> Option<Arc<NodeTypeSchema>> {
        self.registry.get(name)
    }
}
