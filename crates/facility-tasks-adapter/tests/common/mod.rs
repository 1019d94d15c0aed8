/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for facility-tasks-adapter tests

use facility_tasks_adapter::{ClientConfig, FacilityClient};
use std::time::Duration;
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
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

/// JSON body of a single task record as the backend sends it
pub fn task_json(id: &str, task_type: &str, status: &str, percentage: u32) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "type": task_type,
        "status": status,
        "metadata": {},
        "percentage": percentage,
        "cancellable": true
    })
}
