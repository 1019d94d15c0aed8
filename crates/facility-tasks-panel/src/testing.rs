//! In-memory `TaskResource` used by the unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use facility_tasks_adapter::{FacilityError, Result, TaskRecord, TaskResource, TaskStatus, TaskType};
use tokio::sync::oneshot;

pub(crate) fn record(id: &str, status: TaskStatus, percentage: f64) -> TaskRecord {
    let mut record = TaskRecord::new(id, TaskType::LocalImport, status, percentage);
    record.cancellable = true;
    record
}

enum FetchReply {
    Ready(Result<Vec<TaskRecord>>),
    Gated(oneshot::Receiver<Result<Vec<TaskRecord>>>),
}

/// Scripted resource: fetch replies are consumed in order, an empty queue
/// yields an empty collection.
#[derive(Default)]
pub(crate) struct FakeResource {
    fetches: Mutex<VecDeque<FetchReply>>,
    submission: Mutex<Option<Result<TaskRecord>>>,
    cancel: Mutex<Option<Result<()>>>,
    calls: Mutex<Vec<String>>,
}

impl FakeResource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_fetch(&self, reply: Result<Vec<TaskRecord>>) {
        self.fetches
            .lock()
            .unwrap()
            .push_back(FetchReply::Ready(reply));
    }

    /// Queue a fetch that stays pending until the returned sender fires.
    pub(crate) fn push_gated_fetch(&self) -> oneshot::Sender<Result<Vec<TaskRecord>>> {
        let (tx, rx) = oneshot::channel();
        self.fetches
            .lock()
            .unwrap()
            .push_back(FetchReply::Gated(rx));
        tx
    }

    pub(crate) fn set_submission(&self, reply: Result<TaskRecord>) {
        *self.submission.lock().unwrap() = Some(reply);
    }

    pub(crate) fn set_cancel(&self, reply: Result<()>) {
        *self.cancel.lock().unwrap() = Some(reply);
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record_call(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn take_submission(&self) -> Result<TaskRecord> {
        self.submission
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Err(FacilityError::Config("no submission scripted".to_string())))
    }
}

#[async_trait]
impl TaskResource for FakeResource {
    async fn fetch_tasks(&self, force: bool) -> Result<Vec<TaskRecord>> {
        self.record_call(format!("fetch_tasks:{force}"));
        let reply = self.fetches.lock().unwrap().pop_front();
        match reply {
            None => Ok(Vec::new()),
            Some(FetchReply::Ready(reply)) => reply,
            Some(FetchReply::Gated(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(FacilityError::InvalidResponse("gate dropped".to_string()))),
        }
    }

    async fn cancel_task(&self, task_id: &str) -> Result<()> {
        self.record_call(format!("cancel_task:{task_id}"));
        self.cancel.lock().unwrap().take().unwrap_or(Ok(()))
    }

    async fn local_import_content(&self, drive_id: &str) -> Result<TaskRecord> {
        self.record_call(format!("local_import_content:{drive_id}"));
        self.take_submission()
    }

    async fn local_export_content(&self, drive_id: &str) -> Result<TaskRecord> {
        self.record_call(format!("local_export_content:{drive_id}"));
        self.take_submission()
    }

    async fn remote_import_content(&self, channel_id: &str) -> Result<TaskRecord> {
        self.record_call(format!("remote_import_content:{channel_id}"));
        self.take_submission()
    }

    async fn delete_channel(&self, channel_id: &str) -> Result<TaskRecord> {
        self.record_call(format!("delete_channel:{channel_id}"));
        self.take_submission()
    }
}
