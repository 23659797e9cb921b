use std::sync::Arc;

use crate::{application::services::settings::SettingsStore, domain::models::Settings};

pub struct GetSettingsUseCase {
    settings: Arc<SettingsStore>,
}

impl GetSettingsUseCase {
    pub fn new(settings: Arc<SettingsStore>) -> Self {
        Self { settings }
    }

    pub async fn execute(&self) -> Settings {
        self.settings.snapshot().await
    }
}
