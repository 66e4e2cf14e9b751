//! CSV ingest for `day.csv` and `hour.csv`.
//!
//! This module turns the two exports into typed collections.
//!
//! Design goals:
//! - **Strict schema**: required columns are checked before any row is read
//! - **Strict rows**: the first bad value fails the load with file/line/column
//! - **Pass-through**: every record keeps its raw CSV row for tabular display

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;
use tracing::{debug, info};

use crate::domain::{
    Category, Collection, DailyRecord, Dataset, DayType, HourlyRecord, Season, Weather,
};
use crate::error::LoadError;

const COL_DATE: &str = "dteday";
const COL_SEASON: &str = "season";
const COL_WEATHER: &str = "weathersit";
const COL_WORKINGDAY: &str = "workingday";
const COL_COUNT: &str = "cnt";
const COL_HOUR: &str = "hr";

const DAILY_COLUMNS: [&str; 5] = [COL_DATE, COL_SEASON, COL_WEATHER, COL_WORKINGDAY, COL_COUNT];
const HOURLY_COLUMNS: [&str; 6] = [
    COL_DATE,
    COL_SEASON,
    COL_WEATHER,
    COL_WORKINGDAY,
    COL_COUNT,
    COL_HOUR,
];

/// A value-level problem inside one row (file and line are attached by the caller).
#[derive(Debug)]
struct FieldError {
    column: &'static str,
    reason: String,
}

impl FieldError {
    fn new(column: &'static str, reason: impl Into<String>) -> Self {
        Self {
            column,
            reason: reason.into(),
        }
    }
}

/// Resolved column positions for one file.
struct Columns {
    index: HashMap<&'static str, usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord, required: &[&'static str], path: &Path) -> Result<Self, LoadError> {
        let header_map = build_header_map(headers);
        let mut index = HashMap::with_capacity(required.len());
        for &column in required {
            let idx = header_map
                .get(column)
                .copied()
                .ok_or_else(|| LoadError::MissingColumn {
                    path: path.to_path_buf(),
                    column,
                })?;
            index.insert(column, idx);
        }
        Ok(Self { index })
    }

    fn get<'a>(&self, record: &'a StringRecord, column: &'static str) -> Result<&'a str, FieldError> {
        self.index
            .get(column)
            .and_then(|idx| record.get(*idx))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| FieldError::new(column, "missing value"))
    }
}

/// Load both dataset files.
pub fn load(day_path: &Path, hour_path: &Path) -> Result<Dataset, LoadError> {
    let daily = read_collection(day_path, &DAILY_COLUMNS, parse_daily)?;
    let hourly = read_collection(hour_path, &HOURLY_COLUMNS, parse_hourly)?;

    info!(
        daily_rows = daily.len(),
        hourly_rows = hourly.len(),
        day = %day_path.display(),
        hour = %hour_path.display(),
        "dataset loaded"
    );

    Ok(Dataset { daily, hourly })
}

fn read_collection<R>(
    path: &Path,
    required: &[&'static str],
    parse: fn(&StringRecord, &Columns) -> Result<R, FieldError>,
) -> Result<Collection<R>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?
        .clone();

    let columns = Columns::resolve(&headers, required, path)?;

    let mut records = Vec::new();
    for (idx, result) in reader.into_records().enumerate() {
        // +2 because:
        // - records start at line 1 after the header
        // - CSV line numbers are 1-based
        let line = idx + 2;

        let record = result.map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

        let parsed = parse(&record, &columns).map_err(|e| LoadError::InvalidField {
            path: path.to_path_buf(),
            line,
            column: e.column,
            reason: e.reason,
        })?;
        records.push(parsed);
    }

    debug!(path = %path.display(), rows = records.len(), "parsed collection");

    Ok(Collection { headers, records })
}

fn parse_daily(record: &StringRecord, columns: &Columns) -> Result<DailyRecord, FieldError> {
    Ok(DailyRecord {
        date: parse_date(columns.get(record, COL_DATE)?).map_err(|e| FieldError::new(COL_DATE, e))?,
        season: parse_code::<Season>(columns, record, COL_SEASON)?,
        weather: parse_code::<Weather>(columns, record, COL_WEATHER)?,
        day_type: parse_code::<DayType>(columns, record, COL_WORKINGDAY)?,
        count: parse_count(columns, record)?,
        raw: record.clone(),
    })
}

fn parse_hourly(record: &StringRecord, columns: &Columns) -> Result<HourlyRecord, FieldError> {
    let hour_raw = columns.get(record, COL_HOUR)?;
    let hour = hour_raw
        .parse::<u8>()
        .ok()
        .filter(|h| *h <= 23)
        .ok_or_else(|| FieldError::new(COL_HOUR, format!("invalid hour '{hour_raw}' (expected 0-23)")))?;

    Ok(HourlyRecord {
        date: parse_date(columns.get(record, COL_DATE)?).map_err(|e| FieldError::new(COL_DATE, e))?,
        hour,
        season: parse_code::<Season>(columns, record, COL_SEASON)?,
        weather: parse_code::<Weather>(columns, record, COL_WEATHER)?,
        day_type: parse_code::<DayType>(columns, record, COL_WORKINGDAY)?,
        count: parse_count(columns, record)?,
        raw: record.clone(),
    })
}

fn parse_code<C: Category>(
    columns: &Columns,
    record: &StringRecord,
    column: &'static str,
) -> Result<C, FieldError> {
    let raw = columns.get(record, column)?;
    raw.parse::<u8>()
        .ok()
        .and_then(C::from_code)
        .ok_or_else(|| {
            let valid: Vec<String> = C::ALL.iter().map(|c| c.code().to_string()).collect();
            FieldError::new(
                column,
                format!("unknown code '{raw}' (expected one of {})", valid.join(", ")),
            )
        })
}

fn parse_count(columns: &Columns, record: &StringRecord) -> Result<u32, FieldError> {
    let raw = columns.get(record, COL_COUNT)?;
    raw.parse::<u32>().map_err(|_| {
        FieldError::new(
            COL_COUNT,
            format!("invalid count '{raw}' (expected a non-negative integer)"),
        )
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header. If we don't strip it, schema validation will incorrectly
    // report missing columns.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

/// Parse a calendar date, dropping a trailing time-of-day if present.
pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, String> {
    // The public dataset uses ISO dates, but spreadsheet round-trips often
    // produce slash dates or append `00:00:00`. Slash dates are month-first
    // unless that cannot be a valid date.
    const FMTS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d/%m/%Y", "%d-%m-%Y"];
    let date_part = s.split(['T', ' ']).next().unwrap_or(s);
    for fmt in FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(date_part, fmt) {
            return Ok(d);
        }
    }
    Err(format!(
        "invalid date '{s}' (expected YYYY-MM-DD, YYYY/MM/DD, MM/DD/YYYY, DD/MM/YYYY or DD-MM-YYYY)"
    ))
}
