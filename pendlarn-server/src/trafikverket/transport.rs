//! How query bodies reach upstream.

use std::future::Future;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use super::client::TrafikverketConfig;
use super::error::TrafikverketError;

/// Status and body of an upstream reply, before any checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Posts a query body and returns the raw reply.
///
/// Implementations only fail for transport problems. Status codes are
/// interpreted by the client.
pub trait Transport: Send + Sync {
    fn post_query(
        &self,
        body: String,
    ) -> impl Future<Output = Result<RawResponse, TrafikverketError>> + Send;
}

/// HTTPS transport to the real API.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    url: String,
}

impl HttpTransport {
    /// Create a transport with the configured endpoint and per-call timeout.
    pub fn new(config: &TrafikverketConfig) -> Result<Self, TrafikverketError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: config.base_url.clone(),
        })
    }
}

impl Transport for HttpTransport {
    async fn post_query(&self, body: String) -> Result<RawResponse, TrafikverketError> {
        debug!(url = %self.url, bytes = body.len(), "posting query");

        let response = self
            .http
            .post(&self.url)
            .header(CONTENT_TYPE, "text/xml")
            .body(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!(status, bytes = body.len(), "upstream replied");
        Ok(RawResponse { status, body })
    }
}
