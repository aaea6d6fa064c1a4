//! Trafikverket client error types.

use crate::domain::InvalidWindow;

/// Errors from fetching announcements.
///
/// Every variant is terminal for the current request. Nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum TrafikverketError {
    /// The caller's window was empty or inverted. No request was sent.
    #[error(transparent)]
    InvalidWindow(#[from] InvalidWindow),

    /// Upstream answered 401.
    #[error("unauthorized (check your API key)")]
    Auth,

    /// Upstream answered with any other non-200 status.
    #[error("API error {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Connection, TLS or timeout failure.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The body did not match the expected envelope.
    #[error("JSON parse error: {message}")]
    Decode {
        message: String,
        body: Option<String>,
    },
}

impl TrafikverketError {
    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            TrafikverketError::InvalidWindow(_) => "invalid_window",
            TrafikverketError::Auth => "auth",
            TrafikverketError::Upstream { .. } => "upstream",
            TrafikverketError::Transport(_) => "transport",
            TrafikverketError::Decode { .. } => "decode",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = TrafikverketError::Auth;
        assert_eq!(err.to_string(), "unauthorized (check your API key)");

        let err = TrafikverketError::Upstream {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "API error 500: Internal Server Error");

        let err = TrafikverketError::Decode {
            message: "expected value".into(),
            body: Some("<html>".into()),
        };
        assert!(err.to_string().contains("JSON parse error"));
        assert!(err.to_string().contains("expected value"));
    }

    #[test]
    fn kinds() {
        assert_eq!(TrafikverketError::Auth.kind(), "auth");
        let err = TrafikverketError::Upstream {
            status: 503,
            message: String::new(),
        };
        assert_eq!(err.kind(), "upstream");
    }
}
