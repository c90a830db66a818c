use anyhow::{Context, Result};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error};
use url::Url;
use uuid::Uuid;

use super::types::ApiError;

/// Default CLI version (from Cargo.toml)
const DEFAULT_VERSION: &str = env!("CARGO_PKG_VERSION");

fn build_user_agent() -> String {
    std::env::var("PANTRY_USER_AGENT")
        .unwrap_or_else(|_| format!("pantry-cli/{}", DEFAULT_VERSION))
}

/// HTTP client for the recipe backend.
///
/// Requests are sent once. A failure is reported to the caller and it is
/// up to the user to try again.
pub struct ApiClient {
    pub(super) client: Client,
    pub(super) base_url: Url,
    pub(super) user_agent: String,
    pub(super) session_id: String,
}

impl ApiClient {
    pub fn new(base_url: Url, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url,
            user_agent: build_user_agent(),
            session_id: Uuid::new_v4().to_string(),
        })
    }

    /// Append percent-encoded path segments to the base URL.
    pub(super) fn endpoint_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("Base URL cannot carry a path: {}", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(super) fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        let url = self.endpoint_url(segments)?;
        debug!("=== API Request ===");
        debug!("{} {}", method, url);

        Ok(self
            .client
            .request(method, url)
            .header("User-Agent", &self.user_agent)
            .header("x-request-id", Uuid::new_v4().to_string())
            .header("x-request-session-id", &self.session_id))
    }

    /// Send `request` and decode the JSON body. An empty body decodes as `null`.
    pub(super) async fn execute<R>(&self, request: RequestBuilder) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let response = request.send().await.context("Failed to reach recipe service")?;
        let status = response.status();
        let url = response.url().clone();

        debug!("=== API Response ===");
        debug!("Status: {} ({})", status, url);

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let api_error = ApiError::from_http_response(status.as_u16(), body);
            error!("❌ {}", api_error.message);
            return Err(api_error.into());
        }

        let text = response
            .text()
            .await
            .context("Failed to read response body")?;
        let body: &str = if text.trim().is_empty() { "null" } else { &text };
        serde_json::from_str(body)
            .with_context(|| format!("Failed to parse response from {}", url))
    }
}
