use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::domain::{
    errors::DomainError,
    models::{MAX_RECIPIENTS, MessageTheme, RecipientHandle, RunInterval, Settings},
    repositories::SettingsRepository,
};

/// In-memory view of the settings record, written through to the repository
/// on every mutation. Loaded once at startup.
pub struct SettingsStore {
    repo: Arc<dyn SettingsRepository>,
    current: RwLock<Settings>,
}

impl SettingsStore {
    pub async fn load(repo: Arc<dyn SettingsRepository>) -> Result<Self, DomainError> {
        let settings = repo.load().await?.unwrap_or_default();
        info!(
            recipients = settings.recipients.len(),
            total_sent = settings.total_sent,
            is_active = settings.is_active,
            "settings loaded"
        );
        Ok(Self::new(repo, settings))
    }

    pub fn new(repo: Arc<dyn SettingsRepository>, settings: Settings) -> Self {
        Self {
            repo,
            current: RwLock::new(settings),
        }
    }

    pub async fn snapshot(&self) -> Settings {
        self.current.read().await.clone()
    }

    pub async fn recipients(&self) -> Vec<RecipientHandle> {
        self.current.read().await.recipients.clone()
    }

    pub async fn theme(&self) -> MessageTheme {
        self.current.read().await.theme
    }

    pub async fn interval(&self) -> RunInterval {
        self.current.read().await.interval
    }

    pub async fn add_recipient(
        &self,
        handle: RecipientHandle,
    ) -> Result<Vec<RecipientHandle>, DomainError> {
        self.mutate(|settings| {
            if settings.recipients.len() >= MAX_RECIPIENTS {
                return Err(DomainError::Validation("max recipients reached".to_string()));
            }
            if settings.recipients.contains(&handle) {
                return Err(DomainError::Validation("already in list".to_string()));
            }
            settings.recipients.push(handle);
            Ok(settings.recipients.clone())
        })
        .await
    }

    pub async fn remove_recipient(
        &self,
        handle: &RecipientHandle,
    ) -> Result<Vec<RecipientHandle>, DomainError> {
        self.mutate(|settings| {
            let before = settings.recipients.len();
            settings.recipients.retain(|existing| existing != handle);
            if settings.recipients.len() == before {
                return Err(DomainError::NotFound(format!("recipient {handle}")));
            }
            Ok(settings.recipients.clone())
        })
        .await
    }

    pub async fn set_theme(&self, theme: MessageTheme) -> Result<(), DomainError> {
        self.mutate(|settings| {
            settings.theme = theme;
            Ok(())
        })
        .await
    }

    pub async fn set_interval(&self, interval: RunInterval) -> Result<(), DomainError> {
        self.mutate(|settings| {
            settings.interval = interval;
            Ok(())
        })
        .await
    }

    pub async fn set_active(&self, is_active: bool) -> Result<(), DomainError> {
        self.mutate(|settings| {
            settings.is_active = is_active;
            Ok(())
        })
        .await
    }

    /// Bumps the lifetime counter and returns the new total.
    pub async fn record_success(&self) -> Result<u64, DomainError> {
        self.mutate(|settings| {
            settings.total_sent += 1;
            Ok(settings.total_sent)
        })
        .await
    }

    /// Wipes the persisted record and returns to defaults.
    pub async fn reset(&self) -> Result<(), DomainError> {
        let mut current = self.current.write().await;
        self.repo.clear().await?;
        *current = Settings::default();
        Ok(())
    }

    async fn mutate<T, F>(&self, apply: F) -> Result<T, DomainError>
    where
        F: FnOnce(&mut Settings) -> Result<T, DomainError>,
    {
        let mut current = self.current.write().await;
        let mut next = current.clone();
        let output = apply(&mut next)?;
        self.repo.save(&next).await?;
        *current = next;
        Ok(output)
    }
}
