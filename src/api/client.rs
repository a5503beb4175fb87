// src/api/client.rs
//! HTTP client for the content API with a timeout- and retry-bounded
//! fetch policy.
//!
//! The policy retries *unreliable delivery* only: an aborted or failed
//! attempt is retried with linearly increasing backoff, while a response
//! that completes — whatever its status code — is returned immediately and
//! never retried. Interpreting the status belongs to the caller.

use super::parser::{AuthorPayload, PostPayload};
use super::ContentApi;
use crate::catalog::ContentId;
use crate::config::ApiBase;
use crate::constants::{HTTP_USER_AGENT, RETRY_BASE_DELAY};
use crate::error::AppError;
use crate::error_recovery::retry_with_backoff;
use reqwest::{header, Client, Response};
use std::time::Duration;

/// A thin wrapper around a reqwest Client carrying the fetch policy.
#[derive(Clone)]
pub struct WpHttpClient {
    client: Client,
    api_base: ApiBase,
    timeout: Duration,
    retries: u32,
}

impl WpHttpClient {
    /// Creates a client with the default headers and the given policy.
    pub fn new(api_base: ApiBase, timeout_ms: u64, retries: u32) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers())
            .build()?;
        Ok(Self {
            client,
            api_base,
            timeout: Duration::from_millis(timeout_ms),
            retries,
        })
    }

    /// Default headers for every content API request.
    fn create_headers() -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(HTTP_USER_AGENT),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        headers
    }

    fn posts_endpoint(&self, id: &ContentId) -> String {
        format!("{}/posts/{}?_embed=1", self.api_base, id)
    }

    fn users_endpoint(&self, id: u64) -> String {
        format!("{}/users/{}", self.api_base, id)
    }

    /// Performs a GET with the retry policy: up to `retries + 1` attempts,
    /// each bounded by the configured timeout. Timing out drops the
    /// in-flight request future, aborting that attempt. Transport failures
    /// retry; a completed response returns immediately regardless of its
    /// HTTP status.
    pub async fn fetch_with_policy(&self, url: &str) -> Result<Response, AppError> {
        log::debug!("GET {}", url);

        retry_with_backoff(
            || {
                let request = self.client.get(url);
                let url = url.to_string();
                let timeout = self.timeout;
                async move {
                    match tokio::time::timeout(timeout, request.send()).await {
                        Ok(Ok(response)) => Ok(response),
                        Ok(Err(e)) => Err(AppError::Transport(e)),
                        Err(_) => Err(AppError::Timeout {
                            url,
                            after_ms: timeout.as_millis() as u64,
                        }),
                    }
                }
            },
            self.retries + 1,
            RETRY_BASE_DELAY,
        )
        .await
    }
}

#[async_trait::async_trait]
impl ContentApi for WpHttpClient {
    async fn retrieve_post(&self, id: &ContentId) -> Result<PostPayload, AppError> {
        let url = self.posts_endpoint(id);
        let response = self.fetch_with_policy(&url).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::UpstreamStatus { status, url });
        }

        let body = response.text().await.map_err(AppError::Transport)?;
        let payload = serde_json::from_str(&body)?;
        Ok(payload)
    }

    async fn retrieve_author(&self, id: u64) -> Option<AuthorPayload> {
        let url = self.users_endpoint(id);
        let response = match self.fetch_with_policy(&url).await {
            Ok(response) => response,
            Err(e) => {
                log::debug!("Author lookup {} failed: {}", url, e);
                return None;
            }
        };

        if !response.status().is_success() {
            log::debug!("Author lookup {} returned {}", url, response.status());
            return None;
        }

        response.json::<AuthorPayload>().await.ok()
    }
}
