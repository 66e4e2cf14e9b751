//! Demo data sources.

pub mod sample;

pub use sample::{generate, write_csv};
