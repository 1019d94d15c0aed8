/*
[INPUT]:  HTTP configuration (base URL, timeouts)
[OUTPUT]: Configured reqwest client ready for task API calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use crate::http::{FacilityError, Result};
use crate::types::TaskRecord;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::sync::Mutex;

/// Default backend location when none is configured
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080/";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// HTTP client for the device task resource
#[derive(Debug)]
pub struct FacilityClient {
    http_client: Client,
    base_url: Url,
    config: ClientConfig,
    /// Last successfully fetched task collection, served to non-forced fetches
    pub(crate) task_cache: Mutex<Option<Vec<TaskRecord>>>,
}

impl FacilityClient {
    /// Create a new client against the default base URL
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default(), DEFAULT_BASE_URL)
    }

    /// Create a new client with custom configuration and base URL
    pub fn with_config(config: ClientConfig, base_url: &str) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: normalize_base_url(base_url)?,
            config,
            task_cache: Mutex::new(None),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build request builder for an endpoint relative to the base URL
    pub(crate) fn request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder> {
        let url = self.base_url.join(endpoint.trim_start_matches('/'))?;
        Ok(self.http_client.request(method, url))
    }

    /// Send a request and decode a JSON body, mapping failure statuses to `Api`
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await.map_err(|err| self.map_send_error(err))?;
        let status = response.status();
        let body = response.text().await.map_err(|err| self.map_send_error(err))?;

        if !status.is_success() {
            tracing::debug!(status = %status, body = %body, "task api returned failure status");
            return Err(FacilityError::api_error(status, body));
        }

        if body.trim().is_empty() {
            return Err(FacilityError::InvalidResponse(format!(
                "empty body with status {status}"
            )));
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Send a request whose success body is irrelevant
    pub(crate) async fn send_empty(&self, builder: RequestBuilder) -> Result<()> {
        let response = builder.send().await.map_err(|err| self.map_send_error(err))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FacilityError::api_error(status, body));
        }
        Ok(())
    }

    fn map_send_error(&self, err: reqwest::Error) -> FacilityError {
        if err.is_timeout() {
            FacilityError::Timeout {
                duration: self.config.timeout.as_secs(),
            }
        } else {
            FacilityError::Http(err)
        }
    }
}

fn normalize_base_url(base_url: &str) -> Result<Url> {
    let mut url = Url::parse(base_url)?;
    if url.cannot_be_a_base() {
        return Err(FacilityError::Config(format!(
            "base url cannot carry paths: {base_url}"
        )));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
