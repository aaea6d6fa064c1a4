//! Application state for the web layer.

use std::sync::Arc;

use crate::trafikverket::{HttpTransport, TrafikverketClient};

use super::board::BoardConfig;

/// Shared application state.
pub struct AppState<T = HttpTransport> {
    /// Trafikverket API client
    pub trafikverket: Arc<TrafikverketClient<T>>,

    /// Which boards exist and how far ahead they look
    pub board: Arc<BoardConfig>,
}

impl<T> AppState<T> {
    /// Create a new app state.
    pub fn new(trafikverket: TrafikverketClient<T>, board: BoardConfig) -> Self {
        Self {
            trafikverket: Arc::new(trafikverket),
            board: Arc::new(board),
        }
    }
}

// Manual impl: cloning the state never clones the transport.
impl<T> Clone for AppState<T> {
    fn clone(&self) -> Self {
        Self {
            trafikverket: Arc::clone(&self.trafikverket),
            board: Arc::clone(&self.board),
        }
    }
}
