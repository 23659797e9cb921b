use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::models::{DispatchRecord, DispatchStatus, Settings};

/// Durable home of the single settings record.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn load(&self) -> anyhow::Result<Option<Settings>>;
    async fn save(&self, settings: &Settings) -> anyhow::Result<()>;
    async fn clear(&self) -> anyhow::Result<()>;
}

/// Bounded, most-recent-first record of dispatch attempts.
#[async_trait]
pub trait DispatchLogRepository: Send + Sync {
    async fn insert(&self, record: DispatchRecord) -> anyhow::Result<()>;

    async fn update_status(
        &self,
        record_id: Uuid,
        status: DispatchStatus,
        error: Option<String>,
    ) -> anyhow::Result<()>;

    async fn list(&self, limit: Option<usize>) -> anyhow::Result<Vec<DispatchRecord>>;

    async fn clear(&self) -> anyhow::Result<()>;
}
