use std::sync::Arc;

use crate::{
    application::services::{
        queue::MessageQueue,
        scheduler::{DispatchScheduler, RunState},
        settings::SettingsStore,
    },
    domain::models::MessageTheme,
};

pub struct Dashboard {
    pub state: RunState,
    pub scheduling_available: bool,
    pub interval_ms: u64,
    pub theme: MessageTheme,
    pub total_sent: u64,
    pub recipient_count: usize,
    pub queue_length: usize,
    pub generating: bool,
}

pub struct GetDashboardUseCase {
    settings: Arc<SettingsStore>,
    scheduler: Arc<DispatchScheduler>,
    queue: Arc<MessageQueue>,
}

impl GetDashboardUseCase {
    pub fn new(
        settings: Arc<SettingsStore>,
        scheduler: Arc<DispatchScheduler>,
        queue: Arc<MessageQueue>,
    ) -> Self {
        Self {
            settings,
            scheduler,
            queue,
        }
    }

    pub async fn execute(&self) -> Dashboard {
        let settings = self.settings.snapshot().await;
        Dashboard {
            state: self.scheduler.state(),
            scheduling_available: self.scheduler.is_scheduling_available().await,
            interval_ms: settings.interval.as_millis(),
            theme: settings.theme,
            total_sent: settings.total_sent,
            recipient_count: settings.recipients.len(),
            queue_length: self.queue.len(),
            generating: self.queue.is_replenishing(),
        }
    }
}
