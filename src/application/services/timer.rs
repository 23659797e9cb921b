use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_stream::{StreamExt, wrappers::IntervalStream};
use tracing::{debug, info};

use crate::domain::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    Arm { interval: Duration },
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Tick,
}

/// Command side of the background timer; cheap to clone.
#[derive(Debug, Clone)]
pub struct TimerControl {
    commands: UnboundedSender<TimerCommand>,
}

impl TimerControl {
    pub fn arm(&self, interval: Duration) -> Result<(), DomainError> {
        self.send(TimerCommand::Arm { interval })
    }

    pub fn cancel(&self) -> Result<(), DomainError> {
        self.send(TimerCommand::Cancel)
    }

    fn send(&self, command: TimerCommand) -> Result<(), DomainError> {
        self.commands
            .send(command)
            .map_err(|_| DomainError::State("background timer is not running".to_string()))
    }
}

/// Periodic timer running on its own task. Talks to the rest of the service
/// only through the command and tick channels.
pub struct BackgroundTimer {
    control: TimerControl,
    task: JoinHandle<()>,
}

impl BackgroundTimer {
    /// Fails when no tokio runtime is available to host the timer task.
    pub fn spawn() -> Result<(Self, UnboundedReceiver<TimerEvent>), DomainError> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|err| {
            DomainError::State(format!("scheduling unavailable: {err}"))
        })?;

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        let task = runtime.spawn(run_timer(command_rx, tick_tx));

        Ok((
            Self {
                control: TimerControl {
                    commands: command_tx,
                },
                task,
            },
            tick_rx,
        ))
    }

    pub fn control(&self) -> TimerControl {
        self.control.clone()
    }

    pub fn shutdown(self) {
        self.task.abort();
    }
}

async fn run_timer(
    mut commands: UnboundedReceiver<TimerCommand>,
    ticks: UnboundedSender<TimerEvent>,
) {
    let mut ticker: Option<IntervalStream> = None;

    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(TimerCommand::Arm { interval }) => {
                    info!(interval_ms = interval.as_millis() as u64, "timer armed");
                    // first tick completes immediately
                    let mut schedule = tokio::time::interval(interval);
                    schedule.set_missed_tick_behavior(MissedTickBehavior::Delay);
                    ticker = Some(IntervalStream::new(schedule));
                }
                Some(TimerCommand::Cancel) => {
                    if ticker.take().is_some() {
                        info!("timer cancelled");
                    }
                }
                None => break,
            },
            Some(_) = next_tick(&mut ticker) => {
                debug!("tick");
                if ticks.send(TimerEvent::Tick).is_err() {
                    break;
                }
            }
        }
    }
}

async fn next_tick(ticker: &mut Option<IntervalStream>) -> Option<Instant> {
    match ticker {
        Some(stream) => stream.next().await,
        None => std::future::pending().await,
    }
}
