use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    application::services::{
        queue::MessageQueue, rotation::TargetRotation, settings::SettingsStore,
        submitter::MessageSubmitter,
    },
    domain::{
        models::{DispatchRecord, DispatchStatus},
        repositories::DispatchLogRepository,
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    Sent { record_id: Uuid },
    Failed { record_id: Uuid, reason: String },
    NoRecipients,
    QueueEmpty,
}

/// One send attempt: next recipient, next queued text, submit, record.
pub struct DispatchCycleHandler {
    settings: Arc<SettingsStore>,
    rotation: Arc<TargetRotation>,
    queue: Arc<MessageQueue>,
    log: Arc<dyn DispatchLogRepository>,
    submitter: Arc<dyn MessageSubmitter>,
}

impl DispatchCycleHandler {
    pub fn new(
        settings: Arc<SettingsStore>,
        rotation: Arc<TargetRotation>,
        queue: Arc<MessageQueue>,
        log: Arc<dyn DispatchLogRepository>,
        submitter: Arc<dyn MessageSubmitter>,
    ) -> Self {
        Self {
            settings,
            rotation,
            queue,
            log,
            submitter,
        }
    }

    pub async fn handle(&self) -> CycleOutcome {
        let recipients = self.settings.recipients().await;
        let Some(recipient) = self.rotation.next(&recipients).cloned() else {
            return CycleOutcome::NoRecipients;
        };

        let Some(text) = self.queue.next_for_cycle().await else {
            warn!(recipient = %recipient, "no message available this tick");
            return CycleOutcome::QueueEmpty;
        };

        let record = DispatchRecord::sending(recipient.clone(), text.clone());
        let record_id = record.id;
        if let Err(err) = self.log.insert(record).await {
            warn!(error = %err, "failed to log dispatch");
        }

        debug!(%record_id, recipient = %recipient, "submitting");
        match self.submitter.submit(&recipient, &text).await {
            Ok(()) => {
                match self.settings.record_success().await {
                    Ok(total) => info!(%record_id, recipient = %recipient, total, "message sent"),
                    Err(err) => warn!(error = %err, "failed to persist sent counter"),
                }
                self.finish(record_id, DispatchStatus::Sent, None).await;
                CycleOutcome::Sent { record_id }
            }
            Err(err) => {
                let reason = err.to_string();
                warn!(%record_id, recipient = %recipient, reason = %reason, "message failed");
                self.finish(record_id, DispatchStatus::Failed, Some(reason.clone()))
                    .await;
                CycleOutcome::Failed { record_id, reason }
            }
        }
    }

    async fn finish(&self, record_id: Uuid, status: DispatchStatus, error: Option<String>) {
        if let Err(err) = self.log.update_status(record_id, status, error).await {
            warn!(%record_id, error = %err, "failed to update dispatch record");
        }
    }
}
