//! Web layer for the departure board.
//!
//! Provides the HTML boards, a JSON variant of them, and static assets.

mod board;
mod dto;
mod routes;
mod state;
pub mod templates;

pub use board::{BoardConfig, Place};
pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
pub use templates::*;
