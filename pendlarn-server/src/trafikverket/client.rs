//! Trafikverket data API client.
//!
//! Finds the trains running between two stations in two round trips:
//! first the identifiers of trains stopping at either end within the
//! window, then the departure announcements of those trains at the origin.

use chrono::{DateTime, FixedOffset};
use serde::de::{DeserializeOwned, IgnoredAny};
use tracing::{debug, info};

use crate::domain::{Station, TimeWindow, TrainIdent};

use super::convert::{check_faults, collect_train_idents, flatten_announcements};
use super::error::TrafikverketError;
use super::query::{build_detail_query, build_list_query};
use super::transport::{HttpTransport, RawResponse, Transport};
use super::types::{Envelope, LightAnnouncement, TrainAnnouncement};

/// Default endpoint of the data API.
pub const DEFAULT_BASE_URL: &str = "https://api.trafikinfo.trafikverket.se/v2/data.json";

/// Default per-call timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How much of an unexpected body to keep in errors.
const BODY_EXCERPT_CHARS: usize = 500;

/// Configuration for the Trafikverket client.
#[derive(Debug, Clone)]
pub struct TrafikverketConfig {
    /// API key, sent inside each query body
    pub api_key: String,
    /// Endpoint URL (defaults to production)
    pub base_url: String,
    /// Per-call timeout in seconds
    pub timeout_secs: u64,
}

impl TrafikverketConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom endpoint (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the per-call timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Client for train announcements.
///
/// Holds no state between calls: every fetch re-issues both queries.
#[derive(Debug)]
pub struct TrafikverketClient<T = HttpTransport> {
    transport: T,
    api_key: String,
}

impl TrafikverketClient<HttpTransport> {
    /// Create a client talking HTTPS to the configured endpoint.
    pub fn new(config: TrafikverketConfig) -> Result<Self, TrafikverketError> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config.api_key, transport))
    }
}

impl<T: Transport> TrafikverketClient<T> {
    /// Create a client over any transport.
    pub fn with_transport(api_key: impl Into<String>, transport: T) -> Self {
        Self {
            transport,
            api_key: api_key.into(),
        }
    }

    /// Departures from `from` between `after` and `before` of trains that
    /// also stop at `to`, ordered by advertised time.
    ///
    /// Fails with `InvalidWindow` before sending anything unless
    /// `after < before`. Any failure in either phase aborts the whole fetch.
    pub async fn fetch_stopping_trains(
        &self,
        from: &Station,
        to: &Station,
        after: DateTime<FixedOffset>,
        before: DateTime<FixedOffset>,
    ) -> Result<Vec<TrainAnnouncement>, TrafikverketError> {
        let window = TimeWindow::new(after, before)?;

        let idents = self.list_train_idents(from, to, &window).await?;
        debug!(from = %from, to = %to, trains = idents.len(), "listed trains");

        let announcements = self.get_announcements(from, &idents, &window).await?;
        info!(
            from = %from,
            to = %to,
            announcements = announcements.len(),
            "fetched departures"
        );
        Ok(announcements)
    }

    /// Identifiers of trains running between the two stations within the
    /// window, deduplicated in first-seen order.
    pub async fn list_train_idents(
        &self,
        from: &Station,
        to: &Station,
        window: &TimeWindow,
    ) -> Result<Vec<TrainIdent>, TrafikverketError> {
        let body = build_list_query(&self.api_key, from, to, window);
        let envelope: Envelope<LightAnnouncement> = self.query(body).await?;
        Ok(collect_train_idents(envelope))
    }

    /// Departure announcements at `from` for the given trains.
    pub async fn get_announcements(
        &self,
        from: &Station,
        idents: &[TrainIdent],
        window: &TimeWindow,
    ) -> Result<Vec<TrainAnnouncement>, TrafikverketError> {
        let body = build_detail_query(&self.api_key, from, idents, window);
        let envelope: Envelope<TrainAnnouncement> = self.query(body).await?;
        Ok(flatten_announcements(envelope))
    }

    async fn query<R: DeserializeOwned>(
        &self,
        body: String,
    ) -> Result<Envelope<R>, TrafikverketError> {
        let response = self.transport.post_query(body).await?;
        check_status(&response)?;

        let envelope: Envelope<R> =
            serde_json::from_str(&response.body).map_err(|e| TrafikverketError::Decode {
                message: e.to_string(),
                body: Some(excerpt(&response.body)),
            })?;

        check_faults(&envelope)?;
        Ok(envelope)
    }
}

/// Map a non-200 reply to an error.
fn check_status(response: &RawResponse) -> Result<(), TrafikverketError> {
    match response.status {
        200 => Ok(()),
        401 => Err(TrafikverketError::Auth),
        status => Err(TrafikverketError::Upstream {
            status,
            message: upstream_message(&response.body),
        }),
    }
}

/// Best description of a rejected query: the embedded `ERROR` message when
/// the body carries one, otherwise the start of the body.
fn upstream_message(body: &str) -> String {
    serde_json::from_str::<Envelope<IgnoredAny>>(body)
        .ok()
        .and_then(|env| {
            env.response
                .result
                .into_iter()
                .find_map(|group| group.error)
        })
        .map(|fault| fault.message)
        .unwrap_or_else(|| excerpt(body))
}

fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_CHARS).collect()
}
