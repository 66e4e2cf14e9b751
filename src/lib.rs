//! `bike-dashboard` library crate.
//!
//! The binary (`bikes`) is a thin wrapper around this library so that:
//!
//! - the filter/aggregate engine is testable without a terminal
//! - the TUI and the text report share one pipeline
//! - code stays easy to navigate as the project grows

pub mod analysis;
pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod report;
pub mod tui;
