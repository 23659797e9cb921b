use std::sync::Arc;

use tracing::info;

use crate::{
    application::services::settings::SettingsStore,
    domain::{
        errors::DomainError,
        models::{MessageTheme, RunInterval, Settings},
    },
};

pub struct UpdateRunConfigUseCase {
    settings: Arc<SettingsStore>,
}

#[derive(Debug, Default)]
pub struct UpdateRunConfigRequest {
    pub theme: Option<MessageTheme>,
    pub hours: Option<u32>,
    pub minutes: Option<u32>,
    pub seconds: Option<u32>,
}

impl UpdateRunConfigUseCase {
    pub fn new(settings: Arc<SettingsStore>) -> Self {
        Self { settings }
    }

    /// Interval changes take effect on the next start.
    pub async fn execute(&self, request: UpdateRunConfigRequest) -> Result<Settings, DomainError> {
        if let Some(theme) = request.theme {
            self.settings.set_theme(theme).await?;
            info!(theme = theme.as_str(), "theme updated");
        }

        if request.hours.is_some() || request.minutes.is_some() || request.seconds.is_some() {
            let current = self.settings.interval().await;
            let interval = RunInterval {
                hours: request.hours.unwrap_or(current.hours),
                minutes: request.minutes.unwrap_or(current.minutes),
                seconds: request.seconds.unwrap_or(current.seconds),
            };
            self.settings.set_interval(interval).await?;
            info!(interval_ms = interval.as_millis(), "interval updated");
        }

        Ok(self.settings.snapshot().await)
    }
}
