//! Input helpers.
//!
//! - CSV ingest + validation (`ingest`)
//! - load caching behind an injectable source (`cache`)
//! - JSON export of a computed dashboard (`export`)

pub mod cache;
pub mod export;
pub mod ingest;

pub use cache::*;
pub use export::write_dashboard_json;
pub use ingest::load;
