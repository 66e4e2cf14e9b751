//! Reporting utilities: plain-text rendering of a `Dashboard`.

pub mod format;

pub use format::{fmt_opt, fmt_thousands, format_dashboard, format_filter, format_kpis};
