use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;
use tracing::warn;

use crate::domain::{
    models::{SETTINGS_VERSION, Settings},
    repositories::SettingsRepository,
};

/// Keeps the settings record as a JSON document on local disk.
pub struct JsonFileSettingsRepository {
    path: PathBuf,
}

impl JsonFileSettingsRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl SettingsRepository for JsonFileSettingsRepository {
    async fn load(&self) -> anyhow::Result<Option<Settings>> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to read {}", self.path.display()));
            }
        };

        match serde_json::from_slice::<Settings>(&raw) {
            Ok(mut settings) => {
                if settings.version != SETTINGS_VERSION {
                    warn!(
                        found = settings.version,
                        expected = SETTINGS_VERSION,
                        "settings record version differs, upgrading"
                    );
                    settings.version = SETTINGS_VERSION;
                }
                Ok(Some(settings))
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "failed to load state, using defaults");
                Ok(None)
            }
        }
    }

    async fn save(&self, settings: &Settings) -> anyhow::Result<()> {
        let payload = serde_json::to_vec_pretty(settings)?;
        let temp = self.temp_path();
        tokio::fs::write(&temp, payload)
            .await
            .with_context(|| format!("failed to write {}", temp.display()))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .with_context(|| format!("failed to replace {}", self.path.display()))?;
        Ok(())
    }

    async fn clear(&self) -> anyhow::Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).with_context(|| format!("failed to remove {}", self.path.display())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{MessageTheme, RecipientHandle};

    #[tokio::test]
    async fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileSettingsRepository::new(dir.path().join("state.json"));
        assert!(repo.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn saved_settings_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let settings = Settings {
            recipients: vec![RecipientHandle::parse("alex").unwrap()],
            total_sent: 7,
            theme: MessageTheme::Mystery,
            is_active: true,
            ..Settings::default()
        };
        JsonFileSettingsRepository::new(&path)
            .save(&settings)
            .await
            .unwrap();

        let loaded = JsonFileSettingsRepository::new(&path).load().await.unwrap();
        assert_eq!(loaded, Some(settings));
        assert!(!dir.path().join("state.json.tmp").exists());
    }

    #[tokio::test]
    async fn corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        tokio::fs::write(&path, b"{not json").await.unwrap();

        let repo = JsonFileSettingsRepository::new(&path);
        assert!(repo.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn older_version_is_upgraded_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        tokio::fs::write(&path, br#"{"version":0,"total_sent":3}"#)
            .await
            .unwrap();

        let loaded = JsonFileSettingsRepository::new(&path)
            .load()
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.version, SETTINGS_VERSION);
        assert_eq!(loaded.total_sent, 3);
        assert!(loaded.recipients.is_empty());
    }

    #[tokio::test]
    async fn clear_removes_file_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let repo = JsonFileSettingsRepository::new(&path);
        repo.save(&Settings::default()).await.unwrap();

        repo.clear().await.unwrap();
        assert!(!path.exists());
        repo.clear().await.unwrap();
    }
}
