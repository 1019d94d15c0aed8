/*
[INPUT]:  Drive/channel/task identifiers
[OUTPUT]: Task collection snapshots and newly created task records
[POS]:    HTTP layer - task queue endpoints (list, submit, cancel)
[UPDATE]: When adding new job kinds or changing endpoint paths
*/

use crate::http::{FacilityClient, Result};
use crate::types::{CancelTaskRequest, ChannelTaskRequest, DriveTaskRequest, TaskRecord};
use reqwest::Method;

const TASKS_ENDPOINT: &str = "api/tasks/";
const CANCEL_TASK_ENDPOINT: &str = "api/tasks/canceltask/";
const LOCAL_IMPORT_ENDPOINT: &str = "api/tasks/startlocalimport/";
const LOCAL_EXPORT_ENDPOINT: &str = "api/tasks/startlocalexport/";
const REMOTE_IMPORT_ENDPOINT: &str = "api/tasks/startremoteimport/";
const DELETE_CHANNEL_ENDPOINT: &str = "api/tasks/startdeletechannel/";

impl FacilityClient {
    /// Fetch the task collection
    ///
    /// GET /api/tasks/
    ///
    /// With `force == false` a previously fetched collection is served from
    /// the cache; a forced fetch always hits the server and refreshes it.
    pub async fn fetch_tasks(&self, force: bool) -> Result<Vec<TaskRecord>> {
        if !force {
            if let Some(cached) = self.task_cache.lock().await.as_ref() {
                return Ok(cached.clone());
            }
        }

        let builder = self.request(Method::GET, TASKS_ENDPOINT)?;
        let tasks: Vec<TaskRecord> = self.send_json(builder).await?;
        *self.task_cache.lock().await = Some(tasks.clone());
        Ok(tasks)
    }

    /// Request cancellation of a running task
    ///
    /// POST /api/tasks/canceltask/
    pub async fn cancel_task(&self, task_id: &str) -> Result<()> {
        let body = CancelTaskRequest {
            task_id: task_id.to_string(),
        };
        let builder = self.request(Method::POST, CANCEL_TASK_ENDPOINT)?.json(&body);
        self.send_empty(builder).await
    }

    /// Start importing content from an attached drive
    ///
    /// POST /api/tasks/startlocalimport/
    pub async fn local_import_content(&self, drive_id: &str) -> Result<TaskRecord> {
        self.submit_drive_task(LOCAL_IMPORT_ENDPOINT, drive_id).await
    }

    /// Start exporting content to an attached drive
    ///
    /// POST /api/tasks/startlocalexport/
    pub async fn local_export_content(&self, drive_id: &str) -> Result<TaskRecord> {
        self.submit_drive_task(LOCAL_EXPORT_ENDPOINT, drive_id).await
    }

    /// Start importing a channel from the remote content server
    ///
    /// POST /api/tasks/startremoteimport/
    pub async fn remote_import_content(&self, channel_id: &str) -> Result<TaskRecord> {
        self.submit_channel_task(REMOTE_IMPORT_ENDPOINT, channel_id).await
    }

    /// Start deleting a channel from the device
    ///
    /// POST /api/tasks/startdeletechannel/
    pub async fn delete_channel(&self, channel_id: &str) -> Result<TaskRecord> {
        self.submit_channel_task(DELETE_CHANNEL_ENDPOINT, channel_id).await
    }

    async fn submit_drive_task(&self, endpoint: &str, drive_id: &str) -> Result<TaskRecord> {
        let body = DriveTaskRequest {
            drive_id: drive_id.to_string(),
        };
        let builder = self.request(Method::POST, endpoint)?.json(&body);
        self.send_json(builder).await
    }

    async fn submit_channel_task(&self, endpoint: &str, channel_id: &str) -> Result<TaskRecord> {
        let body = ChannelTaskRequest {
            channel_id: channel_id.to_string(),
        };
        let builder = self.request(Method::POST, endpoint)?.json(&body);
        self.send_json(builder).await
    }
}

#[cfg(test)]
mod tests {
    use crate::http::{ClientConfig, FacilityClient, FacilityError};
    use crate::types::{TaskStatus, TaskType};
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> FacilityClient {
        FacilityClient::with_config(ClientConfig::default(), &server.uri()).expect("client init")
    }

    #[tokio::test]
    async fn test_fetch_tasks() {
        let server = MockServer::start().await;
        let mock_response = r#"[
            {
                "id": "9f1c",
                "type": "remoteimport",
                "status": "RUNNING",
                "metadata": {"channel_id": "c-1"},
                "percentage": 37,
                "cancellable": true,
                "exception": null
            }
        ]"#;

        Mock::given(method("GET"))
            .and(path("/api/tasks/"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(mock_response, "application/json"))
            .expect(1)
            .mount(&server)
            .await;

        let tasks = client_for(&server)
            .fetch_tasks(true)
            .await
            .expect("fetch_tasks failed");

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, "9f1c");
        assert_eq!(tasks[0].task_type, TaskType::RemoteImport);
        assert_eq!(tasks[0].status, TaskStatus::Running);
        assert_eq!(tasks[0].percentage, 37.0);
        assert!(tasks[0].cancellable);
        assert!(tasks[0].extra.contains_key("exception"));
    }

    #[tokio::test]
    async fn test_unforced_fetch_uses_cache() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tasks/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(2)
            .mount(&server)
            .await;

        let client = client_for(&server);
        // first unforced fetch has nothing cached and must hit the server
        client.fetch_tasks(false).await.expect("initial fetch");
        client.fetch_tasks(false).await.expect("cached fetch");
        client.fetch_tasks(true).await.expect("forced fetch");
    }

    #[tokio::test]
    async fn test_local_import_posts_drive_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/tasks/startlocalimport/"))
            .and(body_json(serde_json::json!({"drive_id": "usb-0"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "t-1",
                "type": "localimport",
                "status": "QUEUED",
                "metadata": {"drive_id": "usb-0"},
                "percentage": 0,
                "cancellable": false
            })))
            .expect(1)
            .mount(&server)
            .await;

        let task = client_for(&server)
            .local_import_content("usb-0")
            .await
            .expect("local_import_content failed");
        assert_eq!(task.id, "t-1");
        assert_eq!(task.status, TaskStatus::Queued);
    }

    #[tokio::test]
    async fn test_delete_channel_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/tasks/startdeletechannel/"))
            .respond_with(ResponseTemplate::new(404).set_body_string("missing"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .delete_channel("nope")
            .await
            .expect_err("delete_channel should fail");
        assert!(err.is_not_found());
        assert!(matches!(err, FacilityError::Api { code: 404, .. }));
    }

    #[tokio::test]
    async fn test_cancel_task_posts_task_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/tasks/canceltask/"))
            .and(body_json(serde_json::json!({"task_id": "t-9"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .cancel_task("t-9")
            .await
            .expect("cancel_task failed");
    }

    #[tokio::test]
    async fn test_garbage_body_is_serialization_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tasks/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_tasks(true).await.unwrap_err();
        assert!(matches!(err, FacilityError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_empty_submission_body_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/tasks/startlocalexport/"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .local_export_content("usb-1")
            .await
            .unwrap_err();
        assert!(matches!(err, FacilityError::InvalidResponse(_)));
    }
}
