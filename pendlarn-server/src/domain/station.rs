//! Station location codes.

use std::fmt;

/// Error returned when parsing an empty station code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station code: must not be empty")]
pub struct InvalidStation;

/// A Trafikverket location signature, e.g. `U` for Uppsala or `Cst` for
/// Stockholm Central.
///
/// Codes are opaque. They are compared by string equality only and are
/// never checked against the upstream vocabulary, so an unknown code simply
/// yields no trains.
///
/// # Examples
///
/// ```
/// use pendlarn_server::domain::Station;
///
/// let uppsala = Station::parse("U").unwrap();
/// assert_eq!(uppsala.as_str(), "U");
/// assert_eq!(uppsala.display_name(), "Uppsala");
///
/// assert!(Station::parse("").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Station(String);

impl Station {
    /// Parse a station code. Any non-empty string is accepted.
    pub fn parse(s: &str) -> Result<Self, InvalidStation> {
        if s.is_empty() {
            return Err(InvalidStation);
        }
        Ok(Station(s.to_string()))
    }

    /// Station from a code known at compile time.
    pub(crate) fn from_static(code: &'static str) -> Self {
        debug_assert!(!code.is_empty());
        Station(code.to_string())
    }

    /// Returns the code as sent to upstream.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable name for the stations we link to, falling back to
    /// the raw code.
    pub fn display_name(&self) -> &str {
        match self.0.as_str() {
            "U" => "Uppsala",
            "Cst" => "Stockholm C",
            other => other,
        }
    }
}

impl fmt::Debug for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Station({})", self.0)
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any non-empty code parses and round-trips unchanged
        #[test]
        fn roundtrip(s in ".{1,12}") {
            let station = Station::parse(&s).unwrap();
            prop_assert_eq!(station.as_str(), s.as_str());
        }
    }
}
