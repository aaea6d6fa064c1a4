//! Trafikverket API response DTOs.
//!
//! Every query answers with the same envelope:
//! `{ "RESPONSE": { "RESULT": [ { "TrainAnnouncement": [ ... ] }, ... ] } }`.
//! One result group is returned per `QUERY` element in the request. Upstream
//! omits empty arrays and blank strings, so those fields default to empty.

use chrono::{DateTime, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::domain::is_uninteresting;

/// Format of `AdvertisedTimeAtLocation` in schema version 1.8.
const ADVERTISED_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Top-level response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(rename = "RESPONSE")]
    pub response: ResponseBody<T>,
}

/// The `RESPONSE` object.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseBody<T> {
    #[serde(rename = "RESULT")]
    pub result: Vec<ResultGroup<T>>,
}

/// One entry of `RESULT`.
#[derive(Debug, Clone, Deserialize)]
pub struct ResultGroup<T> {
    /// Records of the queried object type. Absent when nothing matched.
    #[serde(rename = "TrainAnnouncement", default = "Vec::new")]
    pub train_announcement: Vec<T>,

    /// Present instead of records when upstream rejected the query.
    #[serde(rename = "ERROR")]
    pub error: Option<UpstreamFault>,
}

/// Error object upstream embeds in a result group.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamFault {
    #[serde(rename = "SOURCE", default)]
    pub source: String,
    #[serde(rename = "MESSAGE", default)]
    pub message: String,
}

/// Record returned by the list phase: the identifier and nothing else.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LightAnnouncement {
    pub advertised_train_ident: String,
}

/// A train's departure from a location, as returned by the detail phase.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrainAnnouncement {
    /// Location code of the stop, e.g. `"U"`.
    pub location_signature: String,

    /// Scheduled local time, e.g. `"2024-03-01T08:05:00"`.
    pub advertised_time_at_location: String,

    pub advertised_train_ident: String,

    /// Operating company, e.g. `"SJ"`.
    #[serde(default)]
    pub operator: String,

    /// Track label at the location. May be blank before it is assigned.
    #[serde(default)]
    pub track_at_location: String,

    /// Disruption notices.
    #[serde(default)]
    pub deviation: Vec<Information>,

    /// General notices.
    #[serde(default)]
    pub other_information: Vec<Information>,
}

impl TrainAnnouncement {
    /// Parse the advertised time.
    ///
    /// Accepts the zone-less format of schema 1.8 and also full RFC 3339
    /// timestamps, which newer schema versions send; the latter keep their
    /// local wall-clock time.
    pub fn parse_time(&self) -> Option<NaiveDateTime> {
        let raw = self.advertised_time_at_location.as_str();
        NaiveDateTime::parse_from_str(raw, ADVERTISED_TIME_FORMAT)
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|t| t.naive_local()))
    }

    /// Advertised time as `HH:MM`.
    ///
    /// An unparseable time is not an error: the board falls back to the
    /// characters where hours and minutes normally sit, or to the raw string
    /// when it is too short for that.
    pub fn display_time(&self) -> String {
        if let Some(t) = self.parse_time() {
            return format!("{:02}:{:02}", t.hour(), t.minute());
        }
        let raw = self.advertised_time_at_location.as_str();
        raw.get(11..16).unwrap_or(raw).to_string()
    }

    /// Other-information notices worth showing to riders.
    pub fn visible_information(&self) -> impl Iterator<Item = &Information> {
        self.other_information
            .iter()
            .filter(|info| !is_uninteresting(&info.code))
    }
}

/// A coded notice attached to an announcement.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Information {
    pub code: String,
    #[serde(default)]
    pub description: String,
}

impl Information {
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
        }
    }
}
