//! Remote memory client — JSON/HTTP implementation of [`MemoryStore`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, warn};

use engram_core::config::StoreConfig;
use engram_core::types::{MemoryRecord, SearchHit};

use crate::error::StoreError;
use crate::types::{AddRequest, CreatedRecord, SearchRequest};
use crate::MemoryStore;

/// Response envelope the service wraps every collection result in.
#[derive(Debug, Deserialize)]
struct ResultsEnvelope<T> {
    results: Vec<T>,
}

/// HTTP client for the remote semantic-memory service.
///
/// Owns the timeout and retry policy for store calls: transient failures
/// (5xx, timeouts, connection refusals) are retried up to the configured
/// limit, client errors and credential rejections are not.
pub struct RemoteMemoryClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
    max_retries: u32,
}

impl RemoteMemoryClient {
    /// Create a client from store configuration.
    ///
    /// The API key comes from the config file or, failing that, the
    /// `ENGRAM_API_KEY` environment variable.
    #[must_use]
    pub fn from_config(config: &StoreConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.resolved_api_key(),
            timeout: Duration::from_millis(config.timeout_ms),
            max_retries: config.max_retries,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Send a request, retrying transient failures.
    ///
    /// Auth rejections and other 4xx responses return immediately; 5xx and
    /// transport errors burn an attempt each. After exhaustion the last
    /// transport condition wins (`Unavailable`/`Timeout`), otherwise the
    /// failure is reported as `RetriesExhausted`.
    async fn send_with_retry(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<reqwest::Response, StoreError> {
        let mut last_error = StoreError::Unavailable("no attempt made".to_string());

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                debug!(url, attempt = attempt + 1, total = self.max_retries + 1, "retrying store call");
            }

            let mut request = self
                .http
                .request(method.clone(), url)
                .timeout(self.timeout);
            if let Some(key) = &self.api_key {
                request = request.header("Authorization", format!("Bearer {key}"));
            }
            if let Some(body) = body {
                request = request.json(body);
            }

            match request.send().await {
                Ok(resp) => {
                    let status = resp.status();
                    if status.is_success() {
                        return Ok(resp);
                    }
                    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                        return Err(StoreError::Auth(format!("HTTP {status}")));
                    }
                    if status == StatusCode::NOT_FOUND {
                        return Err(StoreError::NotFound(url.to_string()));
                    }
                    if status.is_client_error() {
                        return Err(StoreError::RequestFailed(format!("HTTP {status}")));
                    }
                    warn!(url, %status, "store returned server error");
                    last_error = StoreError::RequestFailed(format!("HTTP {status}"));
                }
                Err(e) => {
                    if e.is_timeout() {
                        warn!(url, timeout_ms = self.timeout.as_millis() as u64, "store request timed out");
                        last_error = StoreError::Timeout(self.timeout.as_millis() as u64);
                    } else if e.is_connect() {
                        warn!(url, error = %e, "store unreachable");
                        last_error = StoreError::Unavailable(e.to_string());
                    } else {
                        warn!(url, error = %e, "store request failed");
                        last_error = StoreError::RequestFailed(e.to_string());
                    }
                }
            }
        }

        Err(match last_error {
            transport @ (StoreError::Unavailable(_) | StoreError::Timeout(_)) => transport,
            other => StoreError::RetriesExhausted {
                attempts: self.max_retries + 1,
                last_error: other.to_string(),
            },
        })
    }

    async fn parse<T: serde::de::DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<T, StoreError> {
        resp.json::<T>()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))
    }
}

#[async_trait]
impl MemoryStore for RemoteMemoryClient {
    async fn add(&self, request: AddRequest) -> Result<Vec<CreatedRecord>, StoreError> {
        let body = serde_json::to_value(&request)
            .map_err(|e| StoreError::Parse(e.to_string()))?;
        let resp = self
            .send_with_retry(Method::POST, &self.url("/v1/memories/"), Some(&body))
            .await?;
        let envelope: ResultsEnvelope<CreatedRecord> = Self::parse(resp).await?;
        Ok(envelope.results)
    }

    async fn search(&self, request: SearchRequest) -> Result<Vec<SearchHit>, StoreError> {
        let body = serde_json::to_value(&request)
            .map_err(|e| StoreError::Parse(e.to_string()))?;
        let resp = self
            .send_with_retry(Method::POST, &self.url("/v1/memories/search/"), Some(&body))
            .await?;
        let envelope: ResultsEnvelope<SearchHit> = Self::parse(resp).await?;
        Ok(envelope.results)
    }

    async fn get_all(&self, user_id: &str) -> Result<Vec<MemoryRecord>, StoreError> {
        let url = format!("{}?user_id={user_id}", self.url("/v1/memories/"));
        let resp = self.send_with_retry(Method::GET, &url, None).await?;
        let envelope: ResultsEnvelope<MemoryRecord> = Self::parse(resp).await?;
        Ok(envelope.results)
    }

    async fn update(&self, id: &str, new_text: &str, user_id: &str) -> Result<(), StoreError> {
        let body = json!({ "content": new_text, "user_id": user_id });
        let url = self.url(&format!("/v1/memories/{id}/"));
        self.send_with_retry(Method::PUT, &url, Some(&body)).await?;
        Ok(())
    }

    async fn delete(&self, id: &str, user_id: &str) -> Result<(), StoreError> {
        let url = format!("{}?user_id={user_id}", self.url(&format!("/v1/memories/{id}/")));
        self.send_with_retry(Method::DELETE, &url, None).await?;
        Ok(())
    }
}
