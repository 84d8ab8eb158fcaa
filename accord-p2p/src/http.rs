use std::time::Duration;

use accord_common::{AccordError, AccountRecord, Result, Transfer};
use async_trait::async_trait;
use tracing::warn;

use crate::ports::PeerClient;

/// HTTP implementation of [`PeerClient`], speaking the same surface this
/// node serves: `GET /hash`, `GET /` and `PUT /{sender}/{receiver}/{amount}`.
#[derive(Debug, Clone)]
pub struct HttpPeer {
    endpoint: String,
    http: reqwest::Client,
}

impl HttpPeer {
    /// Builds a client for one peer endpoint. Every request is bounded by
    /// `timeout`; expiry counts as no answer.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AccordError::Network(format!("http client for {endpoint}: {e}")))?;
        Ok(Self { endpoint, http })
    }

    async fn get_ok(&self, url: String) -> Option<reqwest::Response> {
        match self.http.get(&url).send().await {
            Ok(response) if response.status().is_success() => Some(response),
            Ok(response) => {
                warn!("peer {} answered {} for {}", self.endpoint, response.status(), url);
                None
            }
            Err(e) => {
                warn!("peer {} unreachable: {}", self.endpoint, e);
                None
            }
        }
    }
}

#[async_trait]
impl PeerClient for HttpPeer {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn fetch_fingerprint(&self) -> Option<String> {
        let response = self.get_ok(format!("{}/hash", self.endpoint)).await?;
        response.text().await.ok()
    }

    async fn fetch_snapshot(&self) -> Option<Vec<AccountRecord>> {
        let response = self.get_ok(format!("{}/", self.endpoint)).await?;
        match response.json().await {
            Ok(records) => Some(records),
            Err(e) => {
                warn!("peer {} sent a malformed snapshot: {}", self.endpoint, e);
                None
            }
        }
    }

    async fn submit_transfer(&self, transfer: &Transfer) -> Option<String> {
        let url = format!(
            "{}/{}/{}/{}",
            self.endpoint, transfer.sender, transfer.receiver, transfer.amount
        );
        match self.http.put(&url).send().await {
            Ok(response) if response.status().is_success() => response.text().await.ok(),
            Ok(response) => {
                warn!("peer {} rejected transfer: {}", self.endpoint, response.status());
                None
            }
            Err(e) => {
                warn!("peer {} unreachable: {}", self.endpoint, e);
                None
            }
        }
    }
}
