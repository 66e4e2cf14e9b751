//! Export a computed dashboard to JSON.
//!
//! The JSON mirrors what the front ends show for one filter state: the filter
//! itself, KPIs, the daily series, grouped means, and the filtered rows with
//! their original headers.

use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;
use serde::Serialize;

use crate::analysis::{Filter, GroupMean, Kpis, Subset};
use crate::app::pipeline::Dashboard;
use crate::domain::{DayType, Observation, Season, Weather};
use crate::error::{AppError, EXIT_RUNTIME};

/// Serialized form of a `Dashboard`.
#[derive(Debug, Serialize)]
pub struct DashboardJson<'a> {
    pub filter: &'a Filter,
    pub kpis: Kpis,
    pub daily_series: &'a [(NaiveDate, u32)],
    pub by_weather: &'a [GroupMean<Weather>],
    pub by_season: &'a [GroupMean<Season>],
    pub by_day_type: &'a [GroupMean<DayType>],
    pub hourly_pattern: &'a [GroupMean<u8>],
    pub daily: RowsJson<'a>,
    pub hourly: RowsJson<'a>,
}

/// Filtered rows, verbatim.
#[derive(Debug, Serialize)]
pub struct RowsJson<'a> {
    pub headers: Vec<&'a str>,
    pub rows: Vec<Vec<&'a str>>,
}

impl<'a> DashboardJson<'a> {
    pub fn new(dash: &'a Dashboard<'_>) -> Self {
        Self {
            filter: &dash.filter,
            kpis: dash.kpis,
            daily_series: &dash.daily_series,
            by_weather: &dash.by_weather,
            by_season: &dash.by_season,
            by_day_type: &dash.by_day_type,
            hourly_pattern: &dash.hourly_pattern,
            daily: rows_json(&dash.daily),
            hourly: rows_json(&dash.hourly),
        }
    }
}

fn rows_json<'a, R: Observation>(subset: &Subset<'a, R>) -> RowsJson<'a> {
    RowsJson {
        headers: subset.headers.iter().collect(),
        rows: subset
            .iter()
            .map(|r| record_fields(r.raw()))
            .collect(),
    }
}

fn record_fields(record: &StringRecord) -> Vec<&str> {
    record.iter().collect()
}

/// Write the dashboard as pretty-printed JSON.
pub fn write_dashboard_json(path: &Path, dash: &Dashboard<'_>) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(EXIT_RUNTIME, format!("Failed to create JSON '{}': {e}", path.display()))
    })?;

    serde_json::to_writer_pretty(file, &DashboardJson::new(dash))
        .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to write dashboard JSON: {e}")))?;

    Ok(())
}
