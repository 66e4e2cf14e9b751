//! Command-line parsing for the bike sharing dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the filter/aggregate code.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::domain::{DayType, Season, Weather};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "bikes", version, about = "Bike Sharing Analysis Dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive dashboard (default).
    Tui(DashboardArgs),
    /// Print KPIs, grouped means and a preview of the filtered rows.
    Summary(SummaryArgs),
    /// Write a synthetic `day.csv` / `hour.csv` pair for demos.
    Sample(SampleArgs),
}

/// Data location, initial filters and logging.
#[derive(Debug, Args, Clone)]
pub struct DashboardArgs {
    /// Directory containing `day.csv` and `hour.csv`.
    ///
    /// Falls back to `BIKES_DATA_DIR`, then `<exe dir>/../data`, then `./data`.
    #[arg(short = 'd', long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// First date to include (YYYY-MM-DD). Defaults to the earliest date in the data.
    #[arg(long, value_name = "DATE")]
    pub from: Option<NaiveDate>,

    /// Last date to include (YYYY-MM-DD). Defaults to the latest date in the data.
    #[arg(long, value_name = "DATE")]
    pub to: Option<NaiveDate>,

    /// Season(s) to include (repeatable). Defaults to all.
    #[arg(long, value_enum)]
    pub season: Vec<Season>,

    /// Weather condition(s) to include (repeatable). Defaults to all.
    #[arg(long, value_enum)]
    pub weather: Vec<Weather>,

    /// Day type(s) to include (repeatable). Defaults to all.
    #[arg(long = "day-type", value_enum)]
    pub day_type: Vec<DayType>,

    /// Default log filter when `RUST_LOG` is unset.
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Directory for the TUI log file.
    #[arg(long, default_value = "logs", value_name = "DIR")]
    pub log_dir: PathBuf,
}

/// Options for the text report.
#[derive(Debug, Args, Clone)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub dashboard: DashboardArgs,

    /// Number of filtered rows to preview from each file.
    #[arg(long, default_value_t = 10)]
    pub rows: usize,

    /// Also write the full dashboard (KPIs, groups, filtered rows) as JSON.
    #[arg(long, value_name = "FILE")]
    pub json: Option<PathBuf>,
}

/// Options for synthetic data generation.
#[derive(Debug, Args, Clone)]
pub struct SampleArgs {
    /// Output directory (created if missing).
    #[arg(short, long, value_name = "DIR", default_value = "data")]
    pub out: PathBuf,

    /// First generated date.
    #[arg(long, default_value = "2011-01-01", value_name = "DATE")]
    pub start: NaiveDate,

    /// Number of days to generate.
    #[arg(long, default_value_t = 731)]
    pub days: u32,

    /// Random seed (same seed, same files).
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}
