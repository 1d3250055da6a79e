use crate::config::TenancySettings;
use reqwest::{Client, Url};
use service_core::observability::TracedClientExt;
use std::time::Duration;
use thiserror::Error;

/// Failure to obtain a usable lookup body. Never reaches the client; the
/// resolver degrades to an unresolved tenant.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("lookup request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("lookup response of {0} bytes exceeds limit")]
    Oversized(usize),

    #[error("lookup response is not JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// HTTP client for the backend tenant lookup endpoint.
pub struct TenantLookupClient {
    client: Client,
    lookup_url: Url,
    max_body_bytes: usize,
}

impl TenantLookupClient {
    pub fn new(settings: &TenancySettings) -> anyhow::Result<Self> {
        let lookup_url = Url::parse(&settings.lookup_url).map_err(|e| {
            anyhow::anyhow!("Invalid tenant lookup URL '{}': {}", settings.lookup_url, e)
        })?;

        let client = Client::builder()
            .timeout(Duration::from_millis(settings.lookup_timeout_ms))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build tenant lookup client: {}", e))?;

        Ok(Self {
            client,
            lookup_url,
            max_body_bytes: settings.lookup_max_body_bytes,
        })
    }

    /// URL queried for `hostname`: the configured endpoint plus `?domain=`.
    pub fn url_for(&self, hostname: &str) -> Url {
        let mut url = self.lookup_url.clone();
        url.query_pairs_mut().append_pair("domain", hostname);
        url
    }

    /// Fetch the raw lookup body for `hostname`.
    ///
    /// Any JSON value is returned, including `null` and non-objects; deciding
    /// what counts as an identity is the resolver's job. The HTTP status is
    /// not checked: error bodies carry no identity fields and resolve to an
    /// invalid tenant.
    pub async fn lookup(&self, hostname: &str) -> Result<serde_json::Value, LookupError> {
        let url = self.url_for(hostname);

        let response = self.client.traced_get(url).send().await?;
        let status = response.status();

        if let Some(length) = response.content_length() {
            if length > self.max_body_bytes as u64 {
                return Err(LookupError::Oversized(length as usize));
            }
        }

        let body = response.bytes().await?;
        if body.len() > self.max_body_bytes {
            return Err(LookupError::Oversized(body.len()));
        }

        if !status.is_success() {
            tracing::debug!(%status, hostname, "Tenant lookup returned non-success status");
        }

        Ok(serde_json::from_slice(&body)?)
    }
}
