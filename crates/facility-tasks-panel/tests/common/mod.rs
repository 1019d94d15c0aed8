/*
[INPUT]:  Mock task backend requirements
[OUTPUT]: Shared mock server, client and fixture helpers
[POS]:    Test infrastructure - shared across panel integration tests
[UPDATE]: When adding new backend endpoints or fixtures
*/

#![allow(dead_code)]

use std::time::Duration;

use facility_tasks_adapter::{ClientConfig, FacilityClient};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at the mock server with a short request timeout
pub fn client_for(server: &MockServer) -> FacilityClient {
    let config = ClientConfig {
        timeout: Duration::from_millis(300),
        connect_timeout: Duration::from_millis(300),
    };
    FacilityClient::with_config(config, &server.uri()).expect("client init")
}

pub fn task_json(id: &str, task_type: &str, status: &str, percentage: u32) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "type": task_type,
        "status": status,
        "metadata": {"started_by": "admin"},
        "percentage": percentage,
        "cancellable": true,
        "created": "2024-01-01T00:00:00Z"
    })
}

/// Serve `body` for every `GET /api/tasks/` until the server is reset
pub async fn mount_task_list(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/tasks/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}
