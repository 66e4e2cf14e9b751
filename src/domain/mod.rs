//! Domain types used throughout the dashboard.
//!
//! This module defines:
//!
//! - categorical enums (`Season`, `Weather`, `DayType`) and the `Category` trait
//! - parsed records and collections (`DailyRecord`, `HourlyRecord`, `Dataset`)
//! - run configuration derived from CLI flags (`DashboardConfig`)

pub mod config;
pub mod types;

pub use config::*;
pub use types::*;
