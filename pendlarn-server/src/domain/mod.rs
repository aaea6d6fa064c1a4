//! Domain types for the commuter board.
//!
//! Everything here is ephemeral: values are built from a request or an
//! upstream response and dropped once the page is rendered.

mod ident;
pub mod notice;
mod station;
mod window;

pub use ident::TrainIdent;
pub use notice::is_uninteresting;
pub use station::{InvalidStation, Station};
pub use window::{InvalidWindow, TimeWindow, format_query_timestamp};
