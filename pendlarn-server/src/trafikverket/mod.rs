//! Trafikverket open data API client.
//!
//! This module queries the `TrainAnnouncement` object of the Swedish
//! Transport Administration's data API.
//!
//! Key characteristics of the API:
//! - Queries are XML documents POSTed as `text/xml`; the API key travels
//!   inside the document, not in a header
//! - Replies are JSON, wrapped in a `RESPONSE`/`RESULT` envelope
//! - Advertised times are local Swedish time without a zone suffix

mod client;
mod convert;
mod error;
mod mock;
pub mod query;
mod transport;
mod types;

pub use client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, TrafikverketClient, TrafikverketConfig};
pub use convert::dedup_first_seen;
pub use error::TrafikverketError;
pub use mock::MockTransport;
pub use query::{build_detail_query, build_list_query};
pub use transport::{HttpTransport, RawResponse, Transport};
pub use types::{Information, TrainAnnouncement};
