/*
[INPUT]:  Store + task resource, invoked on a timer or on demand
[OUTPUT]: Guarded or change-detected replacement of the task list
[POS]:    Task poller - background observation of the backend task queue
[UPDATE]: When changing staleness guards or change-detection rules
*/

use anyhow::{Context as _, Result};
use facility_tasks_adapter::{TaskResource, TaskStatus};
use tracing::{debug, error};

use crate::bridge::update_tasks_if;
use crate::store::{PanelState, Store};
use crate::transform::{Task, transform_tasks};

/// Why a poll result was not applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardReason {
    /// A page transition happened while the fetch was in flight
    NavigatedAway,
    /// A trigger is in flight and owns the task list until it resolves
    WizardBusy,
    /// A newer task-list write was applied first
    Superseded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Applied { count: usize },
    Discarded(DiscardReason),
    /// Fetch failed; already logged
    Failed,
}

/// Non-forced fetch of the current task collection, normalized.
pub async fn fetch_current_tasks<R>(resource: &R) -> facility_tasks_adapter::Result<Vec<Task>>
where
    R: TaskResource + ?Sized,
{
    let records = resource.fetch_tasks(false).await?;
    Ok(transform_tasks(records))
}

/// Forced fetch, applied only if the page, wizard and request sequence still
/// allow it when the response arrives.
pub async fn poll_tasks<R>(store: &Store, resource: &R) -> PollOutcome
where
    R: TaskResource + ?Sized,
{
    let page = store.page_token();
    let request = store.issue_request();

    let records = match resource.fetch_tasks(true).await {
        Ok(records) => records,
        Err(err) => {
            error!("poll error: {err}");
            return PollOutcome::Failed;
        }
    };
    let count = records.len();

    let verdict = update_tasks_if(store, request, records, |state| {
        if !page.is_current(state) {
            Err(DiscardReason::NavigatedAway)
        } else if state.page_state.wizard_state.busy {
            Err(DiscardReason::WizardBusy)
        } else if !request.is_newer_than_applied(state) {
            Err(DiscardReason::Superseded)
        } else {
            Ok(())
        }
    });

    match verdict {
        Ok(()) => PollOutcome::Applied { count },
        Err(reason) => {
            debug!(?reason, request = request.value(), "poll result discarded");
            PollOutcome::Discarded(reason)
        }
    }
}

/// Fields compared by `refresh_task_list`; an empty list projects to all-`None`.
#[derive(Debug, PartialEq)]
struct TaskSummary<'a> {
    id: Option<&'a str>,
    status: Option<TaskStatus>,
    percentage: Option<f64>,
}

impl<'a> TaskSummary<'a> {
    fn of_first(tasks: &'a [Task]) -> Self {
        let first = tasks.first();
        Self {
            id: first.map(|task| task.id.as_str()),
            status: first.map(|task| task.status),
            percentage: first.map(|task| task.percentage),
        }
    }
}

fn task_list_changed(stored: &[Task], fetched: &[Task]) -> bool {
    stored.len() != fetched.len() || TaskSummary::of_first(stored) != TaskSummary::of_first(fetched)
}

/// Forced fetch that replaces the task list only when its length or the
/// id/status/percentage of its first task changed. Returns whether the store
/// was updated; a result older than the last applied write is dropped.
pub async fn refresh_task_list<R>(store: &Store, resource: &R) -> Result<bool>
where
    R: TaskResource + ?Sized,
{
    let request = store.issue_request();
    let records = resource
        .fetch_tasks(true)
        .await
        .context("fetch task collection")?;
    let fetched = transform_tasks(records);

    let changed = update_tasks_if(store, request, fetched.clone(), |state: &PanelState| {
        if !request.is_newer_than_applied(state) {
            debug!(request = request.value(), "refresh result superseded");
            Err(())
        } else if task_list_changed(&state.page_state.task_list, &fetched) {
            Ok(())
        } else {
            Err(())
        }
    })
    .is_ok();

    Ok(changed)
}
