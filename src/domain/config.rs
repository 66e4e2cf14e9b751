//! Run configuration as understood by the pipeline.
//!
//! This is derived from CLI flags (plus `.env` / environment defaults) in
//! `crate::app`, so the pipeline never looks at argv or the environment itself.

use std::collections::BTreeSet;
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::domain::{DayType, Season, Weather};

/// File names expected inside the data directory.
pub const DAY_FILE: &str = "day.csv";
pub const HOUR_FILE: &str = "hour.csv";

/// Filter choices made before the dataset is known.
///
/// `None` means "not specified": dates fall back to the dataset's span and
/// categorical axes fall back to every category. An explicitly empty set stays
/// empty and selects nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub seasons: Option<BTreeSet<Season>>,
    pub weather: Option<BTreeSet<Weather>>,
    pub day_types: Option<BTreeSet<DayType>>,
}

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Directory holding `day.csv` and `hour.csv`.
    pub data_dir: PathBuf,
    pub selection: FilterSelection,
    /// Default `EnvFilter` directive when `RUST_LOG` is unset.
    pub log_level: String,
    /// Where the TUI writes its log file.
    pub log_dir: PathBuf,
}

impl DashboardConfig {
    pub fn day_path(&self) -> PathBuf {
        self.data_dir.join(DAY_FILE)
    }

    pub fn hour_path(&self) -> PathBuf {
        self.data_dir.join(HOUR_FILE)
    }
}
