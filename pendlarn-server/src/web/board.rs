//! Which boards the site offers and how far ahead they look.

use chrono::Duration;
use chrono_tz::Tz;

use crate::domain::Station;

/// One page of the site: departures from `from` towards `to`.
#[derive(Debug, Clone)]
pub struct Place {
    /// Path segment under `/now/`
    pub slug: &'static str,
    pub from: Station,
    pub to: Station,
}

impl Place {
    pub fn new(slug: &'static str, from: Station, to: Station) -> Self {
        Self { slug, from, to }
    }

    /// Link to this place's board.
    pub fn href(&self) -> String {
        format!("/now/{}", self.slug)
    }
}

/// Configuration of the boards.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// Boards in navigation order. The first is the landing page.
    pub places: Vec<Place>,

    /// How far past now a board looks. Covers an hour of departures plus
    /// the travel time to the other end, since the list phase also matches
    /// trains by their arrival there.
    pub lookahead: Duration,

    /// Zone the window is computed in.
    pub timezone: Tz,
}

impl BoardConfig {
    /// Find a board by its slug.
    pub fn place(&self, slug: &str) -> Option<&Place> {
        self.places.iter().find(|p| p.slug == slug)
    }

    /// The landing page's board.
    pub fn default_place(&self) -> Option<&Place> {
        self.places.first()
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        let uppsala = Station::from_static("U");
        let stockholm = Station::from_static("Cst");

        Self {
            places: vec![
                Place::new("uppsala", uppsala.clone(), stockholm.clone()),
                Place::new("stockholm", stockholm, uppsala),
            ],
            lookahead: Duration::hours(2),
            timezone: chrono_tz::Europe::Stockholm,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_places() {
        let config = BoardConfig::default();

        let uppsala = config.place("uppsala").unwrap();
        assert_eq!(uppsala.from.as_str(), "U");
        assert_eq!(uppsala.to.as_str(), "Cst");
        assert_eq!(uppsala.href(), "/now/uppsala");

        let stockholm = config.place("stockholm").unwrap();
        assert_eq!(stockholm.from.as_str(), "Cst");
        assert_eq!(stockholm.to.as_str(), "U");

        assert_eq!(config.default_place().unwrap().slug, "uppsala");
        assert!(config.place("malmo").is_none());
    }
}
