/*
[INPUT]:  Pending job submissions (import/export/delete) + Store
[OUTPUT]: Wizard busy/error lifecycle and a one-task task list on success
[POS]:    Task trigger - user-initiated job submission
[UPDATE]: When adding job kinds or changing how failures are worded
*/

use std::future::Future;

use facility_tasks_adapter::{FacilityError, TaskRecord, TaskResource};
use tracing::{info, warn};

use crate::bridge::update_tasks;
use crate::store::{Mutation, Store};
use crate::transform::Task;
use crate::wizard::close_import_export_wizard;

pub const NOT_FOUND_MESSAGE: &str = "That ID was not found on our server.";

/// Terminal result of a trigger. Failures are already reflected in the
/// wizard state; this value is informational.
#[derive(Debug, Clone, PartialEq)]
pub enum TriggerOutcome {
    Started(Task),
    Failed { error: String },
}

impl TriggerOutcome {
    pub fn is_started(&self) -> bool {
        matches!(self, TriggerOutcome::Started(_))
    }
}

/// Text shown in the wizard for a failed submission
pub fn trigger_error_text(err: &FacilityError) -> String {
    if err.is_not_found() {
        NOT_FOUND_MESSAGE.to_string()
    } else {
        err.status_text()
    }
}

/// Mark the wizard busy, await the submission, then record its outcome.
///
/// `busy` is set before `submission` is first polled. On success the task
/// list becomes exactly the submitted task and the wizard closes; on failure
/// the wizard shows the error and stops being busy.
pub async fn trigger_task<F>(store: &Store, submission: F) -> TriggerOutcome
where
    F: Future<Output = facility_tasks_adapter::Result<TaskRecord>>,
{
    store.dispatch(Mutation::SetContentPageWizardBusy(true));

    match submission.await {
        Ok(record) => {
            let task = Task::from(record);
            info!(task_id = %task.id, task_type = %task.task_type, "task submitted");
            update_tasks(store, [task.clone()]);
            close_import_export_wizard(store);
            TriggerOutcome::Started(task)
        }
        Err(err) => {
            warn!(error = %err, "task submission failed");
            let error = trigger_error_text(&err);
            store.dispatch(Mutation::SetContentPageWizardError(Some(error.clone())));
            store.dispatch(Mutation::SetContentPageWizardBusy(false));
            TriggerOutcome::Failed { error }
        }
    }
}

pub async fn trigger_local_content_import_task<R>(
    store: &Store,
    resource: &R,
    drive_id: &str,
) -> TriggerOutcome
where
    R: TaskResource + ?Sized,
{
    trigger_task(store, resource.local_import_content(drive_id)).await
}

pub async fn trigger_local_content_export_task<R>(
    store: &Store,
    resource: &R,
    drive_id: &str,
) -> TriggerOutcome
where
    R: TaskResource + ?Sized,
{
    trigger_task(store, resource.local_export_content(drive_id)).await
}

pub async fn trigger_remote_content_import_task<R>(
    store: &Store,
    resource: &R,
    channel_id: &str,
) -> TriggerOutcome
where
    R: TaskResource + ?Sized,
{
    trigger_task(store, resource.remote_import_content(channel_id)).await
}

pub async fn trigger_channel_delete_task<R>(
    store: &Store,
    resource: &R,
    channel_id: &str,
) -> TriggerOutcome
where
    R: TaskResource + ?Sized,
{
    trigger_task(store, resource.delete_channel(channel_id)).await
}
