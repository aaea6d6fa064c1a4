//! Rider notices hidden from the board.
//!
//! Only "other information" notices are filtered. Deviations describe
//! disruptions and are always shown.

/// Other-information codes that are operationally uninteresting.
pub const UNINTERESTING_CODES: [&str; 3] = [
    // does not stop at Märsta
    "ONA151",
    // replacement bus in effect
    "ONA124",
    // no disembarkation from some cars
    "ONA001",
];

/// Whether an other-information notice with this code should be hidden.
pub fn is_uninteresting(code: &str) -> bool {
    UNINTERESTING_CODES.contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deny_listed_codes() {
        assert!(is_uninteresting("ONA151"));
        assert!(is_uninteresting("ONA124"));
        assert!(is_uninteresting("ONA001"));
    }

    #[test]
    fn other_codes_pass() {
        assert!(!is_uninteresting("XYZ"));
        assert!(!is_uninteresting("ONA150"));
        assert!(!is_uninteresting(""));
        // exact match only
        assert!(!is_uninteresting("ona151"));
    }
}
