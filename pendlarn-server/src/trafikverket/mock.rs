//! Mock transport for testing without API access.
//!
//! Replies are queued up front and handed out in order, one per posted
//! query. Every posted body is recorded so tests can count calls and
//! inspect what was sent.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use super::error::TrafikverketError;
use super::transport::{RawResponse, Transport};

/// Transport that serves canned replies.
#[derive(Clone, Default)]
pub struct MockTransport {
    replies: Arc<Mutex<VecDeque<RawResponse>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply.
    pub fn with_reply(self, status: u16, body: impl Into<String>) -> Self {
        self.push_reply(status, body);
        self
    }

    /// Queue a reply on a shared handle.
    pub fn push_reply(&self, status: u16, body: impl Into<String>) {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(RawResponse {
                status,
                body: body.into(),
            });
    }

    /// Number of queries posted so far.
    pub fn call_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Bodies of all queries posted so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Transport for MockTransport {
    async fn post_query(&self, body: String) -> Result<RawResponse, TrafikverketError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(body);

        // Running out of replies looks like an upstream failure.
        let reply = self
            .replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| RawResponse {
                status: 500,
                body: "no mock reply queued".to_string(),
            });
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replies_in_order() {
        let mock = MockTransport::new().with_reply(200, "a").with_reply(401, "b");

        assert_eq!(mock.post_query("1".into()).await.unwrap().body, "a");
        assert_eq!(mock.post_query("2".into()).await.unwrap().status, 401);
        assert_eq!(mock.requests(), vec!["1".to_string(), "2".to_string()]);
    }

    #[tokio::test]
    async fn exhausted_queue_fails() {
        let mock = MockTransport::new();
        let reply = mock.post_query(String::new()).await.unwrap();
        assert_eq!(reply.status, 500);
        assert_eq!(mock.call_count(), 1);
    }
}
