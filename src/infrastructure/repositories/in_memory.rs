use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{
    models::{DispatchRecord, DispatchStatus},
    repositories::DispatchLogRepository,
};
#[cfg(test)]
use crate::domain::{models::Settings, repositories::SettingsRepository};

#[cfg(test)]
#[derive(Default)]
pub struct InMemorySettingsRepository {
    settings: Arc<RwLock<Option<Settings>>>,
}

#[cfg(test)]
impl InMemorySettingsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings: Arc::new(RwLock::new(Some(settings))),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl SettingsRepository for InMemorySettingsRepository {
    async fn load(&self) -> anyhow::Result<Option<Settings>> {
        Ok(self.settings.read().await.clone())
    }

    async fn save(&self, settings: &Settings) -> anyhow::Result<()> {
        *self.settings.write().await = Some(settings.clone());
        Ok(())
    }

    async fn clear(&self) -> anyhow::Result<()> {
        *self.settings.write().await = None;
        Ok(())
    }
}

pub struct InMemoryDispatchLogRepository {
    records: Arc<RwLock<VecDeque<DispatchRecord>>>,
    capacity: usize,
}

impl InMemoryDispatchLogRepository {
    pub fn new(capacity: usize) -> Self {
        Self {
            records: Arc::new(RwLock::new(VecDeque::with_capacity(capacity))),
            capacity: capacity.max(1),
        }
    }

    #[cfg(test)]
    pub async fn get(&self, record_id: Uuid) -> Option<DispatchRecord> {
        let records = self.records.read().await;
        records.iter().find(|r| r.id == record_id).cloned()
    }
}

#[async_trait]
impl DispatchLogRepository for InMemoryDispatchLogRepository {
    async fn insert(&self, record: DispatchRecord) -> anyhow::Result<()> {
        let mut records = self.records.write().await;
        records.push_front(record);
        records.truncate(self.capacity);
        Ok(())
    }

    async fn update_status(
        &self,
        record_id: Uuid,
        status: DispatchStatus,
        error: Option<String>,
    ) -> anyhow::Result<()> {
        let mut records = self.records.write().await;
        // evicted records are silently ignored
        if let Some(record) = records.iter_mut().find(|r| r.id == record_id) {
            record.status = status;
            record.error = error;
            record.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn list(&self, limit: Option<usize>) -> anyhow::Result<Vec<DispatchRecord>> {
        let records = self.records.read().await;
        let limit = limit.unwrap_or(records.len());
        Ok(records.iter().take(limit).cloned().collect())
    }

    async fn clear(&self) -> anyhow::Result<()> {
        self.records.write().await.clear();
        Ok(())
    }
}
