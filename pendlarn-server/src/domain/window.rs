//! Query time windows.
//!
//! Upstream filters announcements on an open interval `(after, before)`.
//! Both bounds are sent as ISO 8601 timestamps with a numeric zone offset,
//! e.g. `2019-01-01T12:00:00+01:00`.

use chrono::{DateTime, Duration, FixedOffset, TimeZone};

/// Format of timestamps in outbound queries.
const QUERY_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Error returned when a window's start is not strictly before its end.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time window: {after} is not before {before}")]
pub struct InvalidWindow {
    pub after: DateTime<FixedOffset>,
    pub before: DateTime<FixedOffset>,
}

/// An ordered pair of instants with `after < before`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    after: DateTime<FixedOffset>,
    before: DateTime<FixedOffset>,
}

impl TimeWindow {
    /// Create a window, rejecting empty and inverted ranges.
    pub fn new(
        after: DateTime<FixedOffset>,
        before: DateTime<FixedOffset>,
    ) -> Result<Self, InvalidWindow> {
        if after < before {
            Ok(Self { after, before })
        } else {
            Err(InvalidWindow { after, before })
        }
    }

    /// Create a window of the given length starting at `start`, keeping
    /// `start`'s zone offset for both bounds.
    pub fn starting_at<Tz: TimeZone>(
        start: DateTime<Tz>,
        length: Duration,
    ) -> Result<Self, InvalidWindow> {
        let after = start.fixed_offset();
        Self::new(after, after + length)
    }

    /// Lower bound formatted for a query.
    pub fn after_param(&self) -> String {
        format_query_timestamp(&self.after)
    }

    /// Upper bound formatted for a query.
    pub fn before_param(&self) -> String {
        format_query_timestamp(&self.before)
    }
}

/// Format an instant the way upstream expects in filter values.
pub fn format_query_timestamp(t: &DateTime<FixedOffset>) -> String {
    t.format(QUERY_TIMESTAMP_FORMAT).to_string()
}
