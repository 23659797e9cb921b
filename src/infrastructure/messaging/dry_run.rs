use async_trait::async_trait;
use tracing::info;

use crate::{
    application::services::submitter::MessageSubmitter, domain::models::RecipientHandle,
};

/// Logs each dispatch instead of delivering it.
pub struct DryRunSubmitter;

#[async_trait]
impl MessageSubmitter for DryRunSubmitter {
    async fn submit(&self, recipient: &RecipientHandle, text: &str) -> anyhow::Result<()> {
        info!(recipient = %recipient, text, "[dry-run] dispatching");
        Ok(())
    }
}
