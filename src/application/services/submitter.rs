use async_trait::async_trait;

use crate::domain::models::RecipientHandle;

/// Hands a message to the delivery endpoint.
///
/// `Ok(())` only means the request left without a local error. The remote
/// side's acceptance is not observable through this interface.
#[async_trait]
pub trait MessageSubmitter: Send + Sync {
    async fn submit(&self, recipient: &RecipientHandle, text: &str) -> anyhow::Result<()>;
}
