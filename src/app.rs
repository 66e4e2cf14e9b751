//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - resolves the data directory and initial filters
//! - sets up logging
//! - dispatches to the TUI, the text report, or the sample generator

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::info;

use crate::analysis::Filter;
use crate::cli::{Command, DashboardArgs, SampleArgs, SummaryArgs};
use crate::domain::{DashboardConfig, FilterSelection};
use crate::error::AppError;
use crate::io::DatasetCache;
use crate::logging::LogTarget;

pub mod pipeline;

/// Environment variable naming the data directory (also read from `.env`).
pub const DATA_DIR_ENV: &str = "BIKES_DATA_DIR";

/// Entry point for the `bikes` binary.
pub fn run() -> Result<(), AppError> {
    // We want `bikes` and `bikes -d DIR` to behave like `bikes tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Tui(args) => handle_tui(args),
        Command::Summary(args) => handle_summary(args),
        Command::Sample(args) => handle_sample(args),
    }
}

fn handle_tui(args: DashboardArgs) -> Result<(), AppError> {
    let config = dashboard_config_from_args(&args);
    let _guard = crate::logging::init(&config.log_level, LogTarget::File(&config.log_dir))?;
    info!(data_dir = %config.data_dir.display(), "starting dashboard");

    crate::tui::run(config)
}

fn handle_summary(args: SummaryArgs) -> Result<(), AppError> {
    let config = dashboard_config_from_args(&args.dashboard);
    let _guard = crate::logging::init(&config.log_level, LogTarget::Stderr)?;

    let mut cache: DatasetCache = DatasetCache::default();
    let dataset = pipeline::load_dataset(&mut cache, &config)?;
    let filter = Filter::from_selection(&config.selection, &dataset);
    let dashboard = pipeline::build_dashboard(&dataset, &filter);

    println!("{}", crate::report::format_dashboard(&dashboard, args.rows));

    if let Some(path) = &args.json {
        crate::io::write_dashboard_json(path, &dashboard)?;
        info!(path = %path.display(), "dashboard JSON written");
    }
    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let _guard = crate::logging::init("info", LogTarget::Stderr)?;

    let dataset = crate::data::generate(args.start, args.days, args.seed)?;
    let paths = crate::data::write_csv(&dataset, &args.out)?;

    println!(
        "Wrote {} daily rows to {} and {} hourly rows to {}",
        dataset.daily.len(),
        paths.day.display(),
        dataset.hourly.len(),
        paths.hour.display()
    );
    Ok(())
}

pub fn dashboard_config_from_args(args: &DashboardArgs) -> DashboardConfig {
    DashboardConfig {
        data_dir: resolve_data_dir(args.data_dir.as_deref()),
        selection: FilterSelection {
            from: args.from,
            to: args.to,
            seasons: non_empty(&args.season),
            weather: non_empty(&args.weather),
            day_types: non_empty(&args.day_type),
        },
        log_level: args.log_level.clone(),
        log_dir: args.log_dir.clone(),
    }
}

/// An omitted repeatable flag means "all", not "none".
fn non_empty<T: Ord + Copy>(values: &[T]) -> Option<BTreeSet<T>> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().copied().collect())
    }
}

/// Resolve the data directory.
///
/// Order: explicit flag, `BIKES_DATA_DIR` (environment or `.env`), a `data`
/// directory next to the executable's directory, then `./data`.
fn resolve_data_dir(flag: Option<&Path>) -> PathBuf {
    if let Some(dir) = flag {
        return dir.to_path_buf();
    }

    dotenvy::dotenv().ok();
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }

    let sibling = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent()?.parent().map(|p| p.join("data")));
    match sibling {
        Some(dir) if dir.is_dir() => dir,
        _ => PathBuf::from("data"),
    }
}

/// Rewrite argv so `bikes` defaults to `bikes tui`.
///
/// Rules:
/// - `bikes`                       -> `bikes tui`
/// - `bikes -d data ...`           -> `bikes tui -d data ...`
/// - `bikes --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "tui" | "summary" | "sample");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
