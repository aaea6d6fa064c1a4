//! Askama templates for the web frontend.

use askama::Template;

use crate::trafikverket::TrainAnnouncement;

use super::board::Place;

/// Departure board page.
#[derive(Template)]
#[template(path = "board.html")]
pub struct BoardTemplate {
    pub from_name: String,
    pub nav: Vec<NavItem>,
    pub rows: Vec<AnnouncementRow>,
}

impl BoardTemplate {
    pub fn new(place: &Place, places: &[Place], trains: &[TrainAnnouncement]) -> Self {
        let nav = places
            .iter()
            .map(|p| NavItem {
                name: p.from.display_name().to_string(),
                href: p.href(),
                is_here: p.slug == place.slug,
            })
            .collect();

        Self {
            from_name: place.from.display_name().to_string(),
            nav,
            rows: trains.iter().map(AnnouncementRow::from_announcement).collect(),
        }
    }
}

/// Page for a board that does not exist.
#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate<'a> {
    pub message: &'a str,
}

/// Navigation link to a board.
#[derive(Debug, Clone)]
pub struct NavItem {
    pub name: String,
    pub href: String,
    pub is_here: bool,
}

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnouncementRow {
    pub time: String,
    pub track: String,
    pub operator: String,
    pub ident: String,
    /// Always shown
    pub deviations: Vec<String>,
    /// Other information left after the deny-list
    pub notices: Vec<String>,
}

impl AnnouncementRow {
    pub fn from_announcement(ann: &TrainAnnouncement) -> Self {
        Self {
            time: ann.display_time(),
            track: ann.track_at_location.clone(),
            operator: ann.operator.clone(),
            ident: ann.advertised_train_ident.clone(),
            deviations: ann
                .deviation
                .iter()
                .map(|d| d.description.clone())
                .collect(),
            notices: ann
                .visible_information()
                .map(|i| i.description.clone())
                .collect(),
        }
    }
}
