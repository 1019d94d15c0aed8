/*
[INPUT]:  Task collection / submission / cancellation requests
[OUTPUT]: Backend-agnostic task resource abstraction
[POS]:    Resource layer - seam between the control layer and transport
[UPDATE]: When the task resource gains operations
*/

use async_trait::async_trait;

use crate::http::{FacilityClient, Result};
use crate::types::TaskRecord;

/// Operations the control layer needs from the backend task queue.
///
/// `FacilityClient` is the HTTP implementation; tests and embedders can
/// provide their own.
#[async_trait]
pub trait TaskResource: Send + Sync {
    /// Fetch the task collection; `force` bypasses any client-side cache.
    async fn fetch_tasks(&self, force: bool) -> Result<Vec<TaskRecord>>;

    async fn cancel_task(&self, task_id: &str) -> Result<()>;

    async fn local_import_content(&self, drive_id: &str) -> Result<TaskRecord>;

    async fn local_export_content(&self, drive_id: &str) -> Result<TaskRecord>;

    async fn remote_import_content(&self, channel_id: &str) -> Result<TaskRecord>;

    async fn delete_channel(&self, channel_id: &str) -> Result<TaskRecord>;
}

#[async_trait]
impl TaskResource for FacilityClient {
    async fn fetch_tasks(&self, force: bool) -> Result<Vec<TaskRecord>> {
        FacilityClient::fetch_tasks(self, force).await
    }

    async fn cancel_task(&self, task_id: &str) -> Result<()> {
        FacilityClient::cancel_task(self, task_id).await
    }

    async fn local_import_content(&self, drive_id: &str) -> Result<TaskRecord> {
        FacilityClient::local_import_content(self, drive_id).await
    }

    async fn local_export_content(&self, drive_id: &str) -> Result<TaskRecord> {
        FacilityClient::local_export_content(self, drive_id).await
    }

    async fn remote_import_content(&self, channel_id: &str) -> Result<TaskRecord> {
        FacilityClient::remote_import_content(self, channel_id).await
    }

    async fn delete_channel(&self, channel_id: &str) -> Result<TaskRecord> {
        FacilityClient::delete_channel(self, channel_id).await
    }
}
