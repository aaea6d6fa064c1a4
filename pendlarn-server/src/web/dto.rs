//! Data transfer objects for JSON responses.

use serde::Serialize;

use crate::trafikverket::{Information, TrainAnnouncement};

use super::board::Place;

/// A board as JSON.
#[derive(Debug, Serialize)]
pub struct BoardResponse {
    /// Origin station code
    pub from: String,

    /// Destination station code
    pub to: String,

    /// Departures ordered by advertised time
    pub trains: Vec<TrainResult>,
}

impl BoardResponse {
    pub fn new(place: &Place, trains: &[TrainAnnouncement]) -> Self {
        Self {
            from: place.from.as_str().to_string(),
            to: place.to.as_str().to_string(),
            trains: trains.iter().map(TrainResult::from_announcement).collect(),
        }
    }
}

/// One departure.
#[derive(Debug, Serialize)]
pub struct TrainResult {
    /// Advertised departure time, `HH:MM`
    pub time: String,

    /// Full advertised timestamp as sent by upstream
    pub advertised_time: String,

    pub track: String,
    pub operator: String,
    pub ident: String,

    /// Disruption notices
    pub deviations: Vec<NoticeResult>,

    /// Other notices, minus the uninteresting ones
    pub information: Vec<NoticeResult>,
}

impl TrainResult {
    pub fn from_announcement(ann: &TrainAnnouncement) -> Self {
        Self {
            time: ann.display_time(),
            advertised_time: ann.advertised_time_at_location.clone(),
            track: ann.track_at_location.clone(),
            operator: ann.operator.clone(),
            ident: ann.advertised_train_ident.clone(),
            deviations: ann.deviation.iter().map(NoticeResult::from).collect(),
            information: ann.visible_information().map(NoticeResult::from).collect(),
        }
    }
}

/// A coded notice on a departure.
#[derive(Debug, Serialize)]
pub struct NoticeResult {
    pub code: String,
    pub description: String,
}

impl From<&Information> for NoticeResult {
    fn from(info: &Information) -> Self {
        Self {
            code: info.code.clone(),
            description: info.description.clone(),
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
