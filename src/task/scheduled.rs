//! Cancellable periodic task
//!
//! Runs a job immediately, then once per period until cancelled, dropped, or
//! the job asks to stop. Missed ticks are skipped. A run in flight when the
//! task is cancelled is abandoned at its next await point.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Task status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Running,
    /// The job returned [`Flow::Stop`]
    Completed,
    Cancelled,
}

/// What a job run wants next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// Handle of a spawned periodic job; cancelling or dropping it stops the job
pub struct ScheduledTask {
    name: String,
    token: CancellationToken,
    trigger: Arc<Notify>,
    status: watch::Receiver<TaskStatus>,
    handle: Option<JoinHandle<()>>,
}

impl ScheduledTask {
    /// Spawn `job` on the runtime, first run immediately
    pub fn spawn<F, Fut>(name: impl Into<String>, period: Duration, mut job: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Flow> + Send + 'static,
    {
        let name = name.into();
        let token = CancellationToken::new();
        let trigger = Arc::new(Notify::new());
        let (status_tx, status_rx) = watch::channel(TaskStatus::Running);

        let task_name = name.clone();
        let task_token = token.clone();
        let task_trigger = trigger.clone();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            let status = loop {
                tokio::select! {
                    biased;
                    _ = task_token.cancelled() => break TaskStatus::Cancelled,
                    _ = interval.tick() => {}
                    _ = task_trigger.notified() => interval.reset(),
                }

                let flow = tokio::select! {
                    biased;
                    _ = task_token.cancelled() => break TaskStatus::Cancelled,
                    flow = job() => flow,
                };
                if flow == Flow::Stop {
                    break TaskStatus::Completed;
                }
            };

            tracing::debug!("Scheduled task {} finished: {:?}", task_name, status);
            let _ = status_tx.send(status);
        });

        tracing::debug!("Scheduled task {} started, period {:?}", name, period);
        Self {
            name,
            token,
            trigger,
            status: status_rx,
            handle: Some(handle),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the job now and restart the period
    pub fn trigger(&self) {
        self.trigger.notify_one();
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn status(&self) -> TaskStatus {
        *self.status.borrow()
    }

    /// Wait for the job loop to end
    pub async fn join(mut self) -> TaskStatus {
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                tracing::warn!("Scheduled task {} aborted: {}", self.name, e);
            }
        }
        let status = *self.status.borrow();
        status
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
