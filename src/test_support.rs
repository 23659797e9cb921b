//! Scripted providers shared by unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::application::services::{
    generator::MessageGenerator, settings::SettingsStore, submitter::MessageSubmitter,
};
use crate::domain::models::{MessageTheme, RecipientHandle, Settings};
use crate::infrastructure::repositories::in_memory::InMemorySettingsRepository;

pub fn settings_store() -> Arc<SettingsStore> {
    settings_store_with(Settings::default())
}

pub fn settings_store_with(settings: Settings) -> Arc<SettingsStore> {
    Arc::new(SettingsStore::new(
        Arc::new(InMemorySettingsRepository::with_settings(settings.clone())),
        settings,
    ))
}

pub fn handles(raw: &[&str]) -> Vec<RecipientHandle> {
    raw.iter()
        .map(|h| RecipientHandle::parse(h).unwrap())
        .collect()
}

/// Returns pre-scripted batches in order; an exhausted script yields empty batches.
#[derive(Default)]
pub struct ScriptedGenerator {
    script: Mutex<VecDeque<Result<Vec<String>, String>>>,
    requests: Mutex<Vec<(MessageTheme, usize)>>,
    delay: Option<Duration>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn push_batch(&self, batch: Vec<String>) {
        self.script.lock().unwrap().push_back(Ok(batch));
    }

    pub fn push_failure(&self, reason: &str) {
        self.script
            .lock()
            .unwrap()
            .push_back(Err(reason.to_string()));
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requested_counts(&self) -> Vec<usize> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(_, count)| *count)
            .collect()
    }
}

#[async_trait]
impl MessageGenerator for ScriptedGenerator {
    async fn generate(&self, theme: MessageTheme, count: usize) -> anyhow::Result<Vec<String>> {
        self.requests.lock().unwrap().push((theme, count));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Ok(batch)) => Ok(batch),
            Some(Err(reason)) => anyhow::bail!(reason),
            None => Ok(Vec::new()),
        }
    }
}

/// Records every submission; fails all of them when built with `failing`.
#[derive(Default)]
pub struct RecordingSubmitter {
    sent: Mutex<Vec<(String, String)>>,
    failure: Option<String>,
    delay: Option<Duration>,
}

impl RecordingSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            failure: Some(reason.to_string()),
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageSubmitter for RecordingSubmitter {
    async fn submit(&self, recipient: &RecipientHandle, text: &str) -> anyhow::Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((recipient.to_string(), text.to_string()));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.failure {
            Some(reason) => anyhow::bail!("{reason}"),
            None => Ok(()),
        }
    }
}
