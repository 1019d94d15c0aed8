/*
[INPUT]:  Task sequences from triggers, polls and cancellations
[OUTPUT]: SET_CONTENT_PAGE_TASKS mutations (whole-list replacement)
[POS]:    Task store bridge - the only writer of the task list
[UPDATE]: When task-list writes need new guards or metadata
*/

use crate::store::{Mutation, PanelState, RequestSeq, Store};
use crate::transform::{Task, transform_tasks};

/// Replace the task list unconditionally.
pub fn update_tasks<I, T>(store: &Store, tasks: I)
where
    I: IntoIterator<Item = T>,
    T: Into<Task>,
{
    store.dispatch(Mutation::SetContentPageTasks {
        tasks: transform_tasks(tasks),
        request: store.issue_request(),
    });
}

/// Replace the task list only if `guard` accepts the state at commit time.
///
/// `request` is the sequence number reserved when the fetch was issued.
pub fn update_tasks_if<I, T, E>(
    store: &Store,
    request: RequestSeq,
    tasks: I,
    guard: impl FnOnce(&PanelState) -> Result<(), E>,
) -> Result<(), E>
where
    I: IntoIterator<Item = T>,
    T: Into<Task>,
{
    store.dispatch_if(
        guard,
        Mutation::SetContentPageTasks {
            tasks: transform_tasks(tasks),
            request,
        },
    )
}
