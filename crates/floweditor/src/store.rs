use crate::persistence::{StoreError, WorkflowData, WorkflowStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use uuid::Uuid;

/// A stored workflow with bookkeeping timestamps
#[derive(Debug, Clone)]
pub struct StoredWorkflow {
    pub data: WorkflowData,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// In-process store, mainly for tests and previews
#[derive(Debug, Default)]
pub struct MemoryStore {
    workflows: RwLock<HashMap<String, StoredWorkflow>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, id: &str) -> Option<StoredWorkflow> {
        self.workflows.read().await.get(id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.workflows.read().await.len()
    }
}

#[async_trait]
impl WorkflowStore for MemoryStore {
    async fn create(&self, mut data: WorkflowData) -> Result<WorkflowData, StoreError> {
        let id = Uuid::new_v4().to_string();
        data.id = Some(id.clone());

        let now = Utc::now();
        self.workflows.write().await.insert(
            id,
            StoredWorkflow {
                data: data.clone(),
                created_at: now,
                updated_at: now,
            },
        );

        Ok(data)
    }

    async fn update(&self, id: &str, mut data: WorkflowData) -> Result<(), StoreError> {
        let mut workflows = self.workflows.write().await;
        let stored = workflows
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        data.id = Some(id.to_string());
        stored.data = data;
        stored.updated_at = Utc::now();
        Ok(())
    }
}

/// Store keeping one pretty-printed JSON document per workflow in a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    pub async fn load(&self, id: &str) -> Result<WorkflowData, StoreError> {
        let path = self.path_for(id);
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(id.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&raw)?)
    }

    async fn write(&self, id: &str, data: &WorkflowData) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let json = serde_json::to_string_pretty(data)?;
        tokio::fs::write(self.path_for(id), json).await?;
        tracing::debug!("Wrote workflow {} to {}", id, self.dir.display());
        Ok(())
    }
}

#[async_trait]
impl WorkflowStore for FileStore {
    async fn create(&self, mut data: WorkflowData) -> Result<WorkflowData, StoreError> {
        let id = Uuid::new_v4().to_string();
        data.id = Some(id.clone());
        self.write(&id, &data).await?;
        Ok(data)
    }

    async fn update(&self, id: &str, mut data: WorkflowData) -> Result<(), StoreError> {
        if !tokio::fs::try_exists(self.path_for(id)).await? {
            return Err(StoreError::NotFound(id.to_string()));
        }
        data.id = Some(id.to_string());
        self.write(id, &data).await
    }
}
