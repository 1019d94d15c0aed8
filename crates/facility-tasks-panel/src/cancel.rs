/*
[INPUT]:  Task id selected for cancellation + Store
[OUTPUT]: Backend cancel request; cleared task list on success
[POS]:    Task cancellation - user-initiated stop of an in-flight task
[UPDATE]: When cancellation should re-fetch or keep sibling tasks
*/

use anyhow::{Context as _, Result};
use facility_tasks_adapter::TaskResource;
use tracing::{error, info};

use crate::bridge::update_tasks;
use crate::store::Store;
use crate::transform::Task;

/// Ask the backend to cancel `task_id`.
///
/// On success the local task list is cleared without re-fetching. On failure
/// the error is logged and returned; the task list is left as it was.
pub async fn cancel_task<R>(store: &Store, resource: &R, task_id: &str) -> Result<()>
where
    R: TaskResource + ?Sized,
{
    match resource.cancel_task(task_id).await {
        Ok(()) => {
            info!(task_id, "task cancelled");
            update_tasks(store, Vec::<Task>::new());
            Ok(())
        }
        Err(err) => {
            error!(task_id, error = %err, "cancel task failed");
            Err(err).with_context(|| format!("cancel task_id={task_id}"))
        }
    }
}
