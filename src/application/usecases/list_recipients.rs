use std::sync::Arc;

use crate::{application::services::settings::SettingsStore, domain::models::RecipientHandle};

pub struct ListRecipientsUseCase {
    settings: Arc<SettingsStore>,
}

impl ListRecipientsUseCase {
    pub fn new(settings: Arc<SettingsStore>) -> Self {
        Self { settings }
    }

    pub async fn execute(&self) -> Vec<RecipientHandle> {
        self.settings.recipients().await
    }
}
