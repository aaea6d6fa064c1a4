//! Commuter departure board.
//!
//! A web application that answers: "which trains can I take between
//! Uppsala and Stockholm in the next hour?"

pub mod config;
pub mod domain;
pub mod trafikverket;
pub mod web;
