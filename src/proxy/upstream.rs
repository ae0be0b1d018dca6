//! Upstream Client Module
//!
//! Outbound GET client for the upstream content API. Every request carries
//! a fixed User-Agent and is bounded by the configured timeout; a timeout
//! is a distinct outcome from any other fetch failure.

use std::time::Duration;

use serde_json::Value;
use tracing::warn;

use crate::error::UpstreamError;

/// User-Agent identifying this proxy to the upstream API.
pub const USER_AGENT: &str = concat!("content-relay/", env!("CARGO_PKG_VERSION"));

// == Upstream Client ==
/// reqwest-backed client for the upstream content API.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
}

impl UpstreamClient {
    // == Constructor ==
    /// Builds a client against the given base URL with a fixed request
    /// timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    // == Fetch ==
    /// Fetches `<base>/<path>?<query>` and parses the JSON body.
    ///
    /// Non-2xx responses are reported with their original status and body;
    /// timeouts are surfaced distinctly from other network faults.
    pub async fn fetch(&self, path: &str, query: Option<&str>) -> Result<Value, UpstreamError> {
        let mut url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        if let Some(query) = query {
            if !query.is_empty() {
                url.push('?');
                url.push_str(query);
            }
        }

        let response = self.http.get(&url).send().await.map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Upstream returned {} for {}", status, url);
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response.json::<Value>().await.map_err(classify)
    }
}

fn classify(err: reqwest::Error) -> UpstreamError {
    if err.is_timeout() {
        UpstreamError::Timeout
    } else {
        UpstreamError::Network(err.to_string())
    }
}
