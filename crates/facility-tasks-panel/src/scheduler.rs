/*
[INPUT]:  PollingConfig, Store, shared TaskResource, CancellationToken
[OUTPUT]: Tokio task refreshing the task list on a fixed interval
[POS]:    Scheduling layer - drives the poller until shutdown
[UPDATE]: When changing tick behavior or shutdown semantics
*/

use std::sync::Arc;
use std::time::Duration;

use facility_tasks_adapter::TaskResource;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::{PollMode, PollingConfig};
use crate::poller::{PollOutcome, poll_tasks, refresh_task_list};
use crate::store::Store;

/// Recurring poll driver.
///
/// Shutdown also drops a fetch that is still in flight, so nothing is
/// written to the store after the token is cancelled.
#[derive(Debug, Clone)]
pub struct PollScheduler {
    interval: Duration,
    mode: PollMode,
}

impl PollScheduler {
    pub fn new(interval: Duration, mode: PollMode) -> Self {
        Self { interval, mode }
    }

    pub fn from_config(config: &PollingConfig) -> Self {
        Self::new(config.interval(), config.mode)
    }

    pub fn spawn<R>(
        self,
        store: Store,
        resource: Arc<R>,
        shutdown: CancellationToken,
    ) -> JoinHandle<()>
    where
        R: TaskResource + ?Sized + 'static,
    {
        tokio::spawn(async move { self.run(store, resource, shutdown).await })
    }

    pub async fn run<R>(self, store: Store, resource: Arc<R>, shutdown: CancellationToken)
    where
        R: TaskResource + ?Sized,
    {
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(interval_ms = self.interval.as_millis() as u64, mode = ?self.mode, "poll scheduler started");

        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                _ = interval.tick() => {}
            }

            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                _ = self.tick(&store, resource.as_ref()) => {}
            }
        }

        info!("poll scheduler stopped");
    }

    async fn tick<R>(&self, store: &Store, resource: &R)
    where
        R: TaskResource + ?Sized,
    {
        match self.mode {
            PollMode::Guarded => match poll_tasks(store, resource).await {
                PollOutcome::Applied { count } => debug!(count, "task list polled"),
                PollOutcome::Discarded(reason) => debug!(?reason, "poll discarded"),
                PollOutcome::Failed => {}
            },
            PollMode::ChangeDetect => match refresh_task_list(store, resource).await {
                Ok(changed) => debug!(changed, "task list refreshed"),
                Err(err) => warn!(error = %format!("{err:#}"), "task list refresh failed"),
            },
        }
    }
}
