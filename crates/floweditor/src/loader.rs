use crate::NodeTypeRegistry;
use flowcore::{FlowError, NodeTypeSchema};
use std::path::{Path, PathBuf};

/// Loads additional node type schemas from `*.json` files in a directory
#[derive(Debug, Clone)]
pub struct SchemaLoader {
    dir: PathBuf,
}

impl SchemaLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Register every schema in the directory, in file name order.
    /// Returns how many were loaded.
    pub fn load_into(&self, registry: &mut NodeTypeRegistry) -> Result<usize, FlowError> {
        let mut paths = std::fs::read_dir(&self.dir)?
            .map(|entry| entry.map(|entry| entry.path()))
            .collect::<Result<Vec<_>, _>>()?;
        paths.sort();

        let mut loaded = 0;
        for path in paths {
            if path.extension() != Some("json".as_ref()) {
                continue;
            }

            let schema: NodeTypeSchema = serde_json::from_reader(std::fs::File::open(&path)?)?;
            if schema.name.is_empty() {
                return Err(FlowError::Registry(format!(
                    "{} describes a node type without a name",
                    path.display()
                )));
            }

            registry.register(schema);
            loaded += 1;
        }

        tracing::info!("Loaded {} node type(s) from {}", loaded, self.dir.display());
        Ok(loaded)
    }
}
