use std::sync::Arc;

use crate::{
    application::services::{scheduler::DispatchScheduler, settings::SettingsStore},
    domain::{errors::DomainError, models::RecipientHandle},
};

pub struct RemoveRecipientUseCase {
    settings: Arc<SettingsStore>,
    scheduler: Arc<DispatchScheduler>,
}

impl RemoveRecipientUseCase {
    pub fn new(settings: Arc<SettingsStore>, scheduler: Arc<DispatchScheduler>) -> Self {
        Self {
            settings,
            scheduler,
        }
    }

    /// Removing the last recipient of an active run stops it.
    pub async fn execute(&self, handle: &str) -> Result<Vec<RecipientHandle>, DomainError> {
        let handle = RecipientHandle::parse(handle)?;
        let remaining = self.settings.remove_recipient(&handle).await?;
        self.scheduler.stop_if_no_recipients().await?;
        Ok(remaining)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::application::{
        handlers::dispatch_cycle::DispatchCycleHandler,
        services::{
            queue::{MessageQueue, QueuePolicy},
            rotation::TargetRotation,
            scheduler::RunState,
        },
    };
    use crate::domain::models::Settings;
    use crate::infrastructure::repositories::in_memory::InMemoryDispatchLogRepository;
    use crate::test_support::{
        RecordingSubmitter, ScriptedGenerator, handles, settings_store_with,
    };

    fn usecase(
        recipients: &[&str],
    ) -> (
        RemoveRecipientUseCase,
        Arc<SettingsStore>,
        Arc<DispatchScheduler>,
    ) {
        let settings = settings_store_with(Settings {
            recipients: handles(recipients),
            ..Settings::default()
        });
        let queue = Arc::new(MessageQueue::new(
            Arc::new(ScriptedGenerator::new()),
            settings.clone(),
            QueuePolicy::default(),
        ));
        queue.push_back_all(["a", "b", "c"].map(String::from));
        let rotation = Arc::new(TargetRotation::new());
        let log = Arc::new(InMemoryDispatchLogRepository::new(10));
        let cycle = Arc::new(DispatchCycleHandler::new(
            settings.clone(),
            rotation.clone(),
            queue.clone(),
            log.clone(),
            Arc::new(RecordingSubmitter::new()),
        ));
        let scheduler = Arc::new(DispatchScheduler::new(
            settings.clone(),
            queue,
            rotation,
            log,
            cycle,
        ));
        (
            RemoveRecipientUseCase::new(settings.clone(), scheduler.clone()),
            settings,
            scheduler,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn removing_last_recipient_stops_run_immediately() {
        let (usecase, settings, scheduler) = usecase(&["alex"]);
        scheduler
            .start_with_interval(Duration::from_secs(60))
            .await
            .unwrap();

        let remaining = usecase.execute("@Alex").await.unwrap();

        assert!(remaining.is_empty());
        assert_eq!(scheduler.state(), RunState::Idle);
        assert!(!settings.snapshot().await.is_active);
    }

    #[tokio::test(start_paused = true)]
    async fn removing_one_of_several_keeps_running() {
        let (usecase, settings, scheduler) = usecase(&["alex", "sam"]);
        scheduler
            .start_with_interval(Duration::from_secs(60))
            .await
            .unwrap();

        let remaining = usecase.execute("alex").await.unwrap();

        assert_eq!(remaining, handles(&["sam"]));
        assert_eq!(scheduler.state(), RunState::Running);
        assert!(settings.snapshot().await.is_active);
    }

    #[tokio::test]
    async fn removing_unknown_handle_is_not_found() {
        let (usecase, _, _) = usecase(&["alex"]);
        let err = usecase.execute("ghost").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }
}
