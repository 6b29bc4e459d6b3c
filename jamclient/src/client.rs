//! HTTP transport for the node API.

use crate::config::ApiConfig;
use crate::errors::ApiError;
use crate::protocol::WalkResponse;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::StatusCode;
use std::time::Duration;
use tokio::time::sleep;
use url::Url;

/// Base delay between retries, in milliseconds.
const BASE_DELAY: u64 = 500;

const RETRIABLE_STATUS_CODES: &[StatusCode] = &[
    StatusCode::TOO_MANY_REQUESTS,     // 429
    StatusCode::INTERNAL_SERVER_ERROR, // 500
    StatusCode::BAD_GATEWAY,           // 502
    StatusCode::SERVICE_UNAVAILABLE,   // 503
    StatusCode::GATEWAY_TIMEOUT,       // 504
];

/// Retrieval capability the author fetcher depends on.
///
/// Contract: idempotent, and the returned body must belong to the requested
/// node. Violations surface as [`ApiError::IdentityMismatch`] in consumers,
/// which never retry them.
#[async_trait]
pub trait NodeFetcher: Send + Sync {
    /// Retrieves one content node's raw body by numeric id.
    async fn fetch_node(&self, id: i64) -> Result<Bytes, ApiError>;
}

/// reqwest-backed client for the node API.
pub struct NodeClient {
    client: reqwest::Client,
    base_url: Url,
}

impl NodeClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        // A trailing slash keeps Url::join from replacing the last segment.
        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;

        Ok(NodeClient { client, base_url })
    }

    /// Resolves a game slug within an event subtree to a node id.
    pub async fn walk_event_game(
        &self,
        event_slug: &str,
        event_number: u32,
        name: &str,
    ) -> Result<WalkResponse, ApiError> {
        let path = format!("walk/1/events/{event_slug}/{event_number}/{name}");
        let body = self.get_raw(&path).await?;

        Ok(serde_json::from_slice(&body)?)
    }

    /// GETs a path below the base URL, retrying retriable status codes.
    async fn get_raw(&self, path: &str) -> Result<Bytes, ApiError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| ApiError::InvalidUrl(e.to_string()))?;

        // 3 retries per request
        let mut retries = 0;

        loop {
            let response = self.client.get(url.clone()).send().await?;
            let status = response.status();

            if status.is_success() {
                return Ok(response.bytes().await?);
            }

            if !RETRIABLE_STATUS_CODES.contains(&status) {
                return Err(ApiError::UpstreamStatus(status));
            }

            if retries >= 3 {
                return Err(ApiError::RetriesExceeded);
            }

            // Backoff between retries
            let retry_millis = BASE_DELAY * 2_u64.pow(retries);
            tracing::debug!(%status, %url, retry_millis, "retrying node request");
            sleep(Duration::from_millis(retry_millis)).await;
            retries += 1;
        }
    }
}

#[async_trait]
impl NodeFetcher for NodeClient {
    async fn fetch_node(&self, id: i64) -> Result<Bytes, ApiError> {
        self.get_raw(&format!("get/{id}")).await
    }
}
