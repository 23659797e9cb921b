use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{error, info, warn};

use crate::{
    application::{
        handlers::dispatch_cycle::DispatchCycleHandler,
        services::{
            queue::{MessageQueue, ReplenishOutcome},
            rotation::TargetRotation,
            settings::SettingsStore,
            timer::{BackgroundTimer, TimerControl, TimerEvent},
        },
    },
    domain::{errors::DomainError, repositories::DispatchLogRepository},
};

pub const MIN_INTERVAL: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
}

struct TimerSlot {
    timer: BackgroundTimer,
    pump: JoinHandle<()>,
}

/// Drives dispatch cycles from the background timer.
///
/// Every tick observed while running spawns one cycle. Cycles are not
/// serialized, so a slow cycle may overlap the next one. Stopping only
/// prevents future ticks; reset tears the timer down and rebuilds it.
///
/// An emptied recipient list stops the run at the next tick.
pub struct DispatchScheduler {
    settings: Arc<SettingsStore>,
    queue: Arc<MessageQueue>,
    rotation: Arc<TargetRotation>,
    log: Arc<dyn DispatchLogRepository>,
    cycle: Arc<DispatchCycleHandler>,
    running: Arc<AtomicBool>,
    timer: Mutex<Option<TimerSlot>>,
}

impl DispatchScheduler {
    pub fn new(
        settings: Arc<SettingsStore>,
        queue: Arc<MessageQueue>,
        rotation: Arc<TargetRotation>,
        log: Arc<dyn DispatchLogRepository>,
        cycle: Arc<DispatchCycleHandler>,
    ) -> Self {
        let running = Arc::new(AtomicBool::new(false));
        let timer = attach_timer(running.clone(), cycle.clone(), settings.clone());
        Self {
            settings,
            queue,
            rotation,
            log,
            cycle,
            running,
            timer: Mutex::new(timer),
        }
    }

    pub fn state(&self) -> RunState {
        if self.running.load(Ordering::Acquire) {
            RunState::Running
        } else {
            RunState::Idle
        }
    }

    pub async fn is_scheduling_available(&self) -> bool {
        self.timer.lock().await.is_some()
    }

    /// Starts with the persisted interval.
    pub async fn start(&self) -> Result<(), DomainError> {
        let interval = self.settings.interval().await.as_duration();
        self.start_with_interval(interval).await
    }

    /// Idle to Running only; a second start while running is rejected.
    pub async fn start_with_interval(&self, interval: Duration) -> Result<(), DomainError> {
        if interval < MIN_INTERVAL {
            return Err(DomainError::State("minimum interval is 1 second".to_string()));
        }
        if self.settings.recipients().await.is_empty() {
            return Err(DomainError::State(
                "add at least one recipient before starting".to_string(),
            ));
        }
        let control = self.control().await.ok_or_else(|| {
            DomainError::State("scheduling is unavailable in this session".to_string())
        })?;

        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(DomainError::State("already running".to_string()));
        }
        if let Err(err) = self.settings.set_active(true).await {
            self.running.store(false, Ordering::Release);
            return Err(err);
        }

        if let ReplenishOutcome::Failed = self.queue.ensure_seeded().await {
            warn!("initial batch could not be generated, starting with an empty queue");
        }

        // a stop or reset may have landed while seeding
        if !self.running.load(Ordering::Acquire) {
            return Err(DomainError::State("run stopped while starting".to_string()));
        }

        if let Err(err) = control.arm(interval) {
            self.running.store(false, Ordering::Release);
            self.settings.set_active(false).await?;
            return Err(err);
        }

        info!(interval_ms = interval.as_millis() as u64, "run started");
        Ok(())
    }

    /// Prevents future ticks. A cycle already submitting is left to finish.
    pub async fn stop(&self) -> Result<(), DomainError> {
        let was_running = self.running.swap(false, Ordering::AcqRel);
        if let Some(control) = self.control().await {
            if let Err(err) = control.cancel() {
                warn!(error = %err, "failed to cancel timer");
            }
        }
        self.settings.set_active(false).await?;
        if was_running {
            info!("run stopped");
        }
        Ok(())
    }

    /// Stops the run when the recipient list has been emptied.
    pub async fn stop_if_no_recipients(&self) -> Result<bool, DomainError> {
        if self.state() == RunState::Running && self.settings.recipients().await.is_empty() {
            warn!("recipient list emptied during run, stopping");
            self.stop().await?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Restarts a run that was active when the process last exited.
    pub async fn resume(&self) -> Result<(), DomainError> {
        if !self.settings.snapshot().await.is_active {
            return Ok(());
        }
        if let Err(err) = self.start().await {
            warn!(error = %err, "could not resume previous run");
            self.settings.set_active(false).await?;
        }
        Ok(())
    }

    /// Hard stop: tears down the timer and every in-flight cycle, wipes the
    /// persisted record, the log and the queue, then rebuilds the timer.
    pub async fn reset(&self) -> Result<(), DomainError> {
        let mut slot = self.timer.lock().await;
        self.running.store(false, Ordering::Release);
        if let Some(previous) = slot.take() {
            previous.timer.shutdown();
            // aborting the pump drops its JoinSet, which aborts running cycles
            previous.pump.abort();
        }

        self.settings.reset().await?;
        self.log.clear().await?;
        self.queue.clear();
        self.rotation.reset();

        *slot = attach_timer(
            self.running.clone(),
            self.cycle.clone(),
            self.settings.clone(),
        );
        info!("state reset");
        Ok(())
    }

    async fn control(&self) -> Option<TimerControl> {
        self.timer.lock().await.as_ref().map(|slot| slot.timer.control())
    }
}

fn attach_timer(
    running: Arc<AtomicBool>,
    cycle: Arc<DispatchCycleHandler>,
    settings: Arc<SettingsStore>,
) -> Option<TimerSlot> {
    match BackgroundTimer::spawn() {
        Ok((timer, ticks)) => {
            let pump = tokio::spawn(pump_ticks(
                ticks,
                TickContext {
                    running,
                    cycle,
                    settings,
                    control: timer.control(),
                },
            ));
            Some(TimerSlot { timer, pump })
        }
        Err(err) => {
            error!(error = %err, "background timer unavailable, scheduling disabled");
            None
        }
    }
}

struct TickContext {
    running: Arc<AtomicBool>,
    cycle: Arc<DispatchCycleHandler>,
    settings: Arc<SettingsStore>,
    control: TimerControl,
}

impl TickContext {
    async fn on_tick(&self, cycles: &mut JoinSet<()>) {
        if !self.running.load(Ordering::Acquire) {
            return;
        }

        if self.settings.recipients().await.is_empty() {
            if self.running.swap(false, Ordering::AcqRel) {
                warn!("no recipients left, stopping run");
                if let Err(err) = self.control.cancel() {
                    warn!(error = %err, "failed to cancel timer");
                }
                if let Err(err) = self.settings.set_active(false).await {
                    warn!(error = %err, "failed to persist stopped state");
                }
            }
            return;
        }

        let cycle = self.cycle.clone();
        cycles.spawn(async move {
            cycle.handle().await;
        });
    }
}

async fn pump_ticks(mut ticks: UnboundedReceiver<TimerEvent>, context: TickContext) {
    let mut cycles = JoinSet::new();
    loop {
        tokio::select! {
            event = ticks.recv() => match event {
                Some(TimerEvent::Tick) => context.on_tick(&mut cycles).await,
                None => break,
            },
            Some(result) = cycles.join_next(), if !cycles.is_empty() => {
                if let Err(err) = result {
                    if err.is_panic() {
                        error!(error = %err, "dispatch cycle panicked");
                    }
                }
            }
        }
    }
    // in-flight cycles still run to completion once ticks stop
    while cycles.join_next().await.is_some() {}
}
