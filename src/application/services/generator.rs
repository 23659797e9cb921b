use async_trait::async_trait;

use crate::domain::models::MessageTheme;

/// Produces ready-to-send message text. May return fewer items than requested.
#[async_trait]
pub trait MessageGenerator: Send + Sync {
    async fn generate(&self, theme: MessageTheme, count: usize) -> anyhow::Result<Vec<String>>;
}
