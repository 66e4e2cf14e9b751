//! Synthetic bike sharing dataset generation.
//!
//! Produces a `day.csv` / `hour.csv` pair with the same column layout as the
//! public bike sharing dataset so the dashboard can be exercised without it.
//! Generation is fully determined by `(start, days, seed)`.

use std::fs::create_dir_all;
use std::path::Path;

use chrono::{Datelike, Days, NaiveDate};
use csv::StringRecord;
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;
use tracing::info;

use crate::domain::{
    Category, Collection, DailyRecord, Dataset, DayType, HourlyRecord, Season, Weather,
};
use crate::error::{AppError, EXIT_INPUT, EXIT_RUNTIME};
use crate::io::DataPaths;

const DAY_HEADERS: [&str; 16] = [
    "instant", "dteday", "season", "yr", "mnth", "holiday", "weekday", "workingday", "weathersit",
    "temp", "atemp", "hum", "windspeed", "casual", "registered", "cnt",
];

const HOUR_HEADERS: [&str; 17] = [
    "instant", "dteday", "season", "yr", "mnth", "hr", "holiday", "weekday", "workingday",
    "weathersit", "temp", "atemp", "hum", "windspeed", "casual", "registered", "cnt",
];

/// Expected rentals on an average day in the first year.
const BASE_DAILY_LEVEL: f64 = 3000.0;
/// Year-over-year growth in ridership.
const GROWTH_PER_YEAR: f64 = 0.6;

/// Relative frequency of weather codes 1..=4.
const WEATHER_WEIGHTS: [f64; 4] = [0.63, 0.33, 0.035, 0.005];

/// Relative demand per hour on working days (commuter peaks at 8h and 17-18h).
const WORKDAY_PROFILE: [f64; 24] = [
    0.4, 0.2, 0.1, 0.05, 0.05, 0.2, 1.0, 3.0, 5.5, 3.0, 1.6, 1.9, 2.4, 2.3, 2.1, 2.4, 3.5, 6.0,
    5.5, 3.8, 2.7, 2.0, 1.5, 0.9,
];

/// Relative demand per hour on weekends and holidays (broad midday hump).
const WEEKEND_PROFILE: [f64; 24] = [
    1.3, 1.0, 0.8, 0.4, 0.1, 0.1, 0.2, 0.5, 1.1, 1.8, 2.6, 3.3, 3.8, 3.9, 3.8, 3.7, 3.6, 3.4,
    2.9, 2.3, 1.8, 1.5, 1.3, 1.0,
];

/// Normalized climate readings for one day (0..1 like the public dataset).
#[derive(Debug, Clone, Copy)]
struct Climate {
    temp: f64,
    atemp: f64,
    hum: f64,
    windspeed: f64,
}

impl Climate {
    fn draw(date: NaiveDate, rng: &mut StdRng, normal: &Normal<f64>) -> Self {
        // Warmest around mid-July (day ~196), coldest mid-January.
        let phase = (f64::from(date.ordinal()) - 105.0) / 365.0 * std::f64::consts::TAU;
        let temp = (0.5 + 0.3 * phase.sin() + 0.05 * normal.sample(rng)).clamp(0.02, 0.98);
        Self {
            temp,
            atemp: (temp * 0.95 + 0.02).clamp(0.0, 1.0),
            hum: (0.62 + 0.12 * normal.sample(rng)).clamp(0.0, 1.0),
            windspeed: (0.19 + 0.07 * normal.sample(rng)).abs().min(1.0),
        }
    }
}

/// Generate `days` consecutive days starting at `start`.
pub fn generate(start: NaiveDate, days: u32, seed: u64) -> Result<Dataset, AppError> {
    if days == 0 {
        return Err(AppError::new(EXIT_INPUT, "Day count must be > 0."));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Noise distribution error: {e}")))?;
    let weather_pick = WeightedIndex::new(WEATHER_WEIGHTS)
        .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Weather distribution error: {e}")))?;

    let mut daily = Vec::with_capacity(days as usize);
    let mut hourly = Vec::with_capacity(days as usize * 24);

    for i in 0..days {
        let date = start
            .checked_add_days(Days::new(u64::from(i)))
            .ok_or_else(|| AppError::new(EXIT_INPUT, "Sample date range overflows the calendar."))?;

        let season = season_for_month(date.month());
        let weekday = date.weekday().num_days_from_sunday();
        let holiday = is_holiday(date);
        let day_type = if (1..=5).contains(&weekday) && !holiday {
            DayType::Working
        } else {
            DayType::Weekend
        };
        let weather = Weather::ALL[weather_pick.sample(&mut rng)];
        let climate = Climate::draw(date, &mut rng, &normal);
        let yr = date.year() - start.year();

        let level = BASE_DAILY_LEVEL
            * (1.0 + GROWTH_PER_YEAR * f64::from(yr))
            * (0.4 + climate.temp)
            * weather_factor(weather);
        let (profile, casual_share) = match day_type {
            DayType::Working => (&WORKDAY_PROFILE, 0.12),
            DayType::Weekend => (&WEEKEND_PROFILE, 0.35),
        };
        let profile_sum: f64 = profile.iter().sum();

        // Columns shared by the day row and its hour rows.
        let calendar = |hour: Option<u8>| {
            let mut fields = vec![
                date.to_string(),
                season.code().to_string(),
                yr.to_string(),
                date.month().to_string(),
            ];
            if let Some(h) = hour {
                fields.push(h.to_string());
            }
            fields.extend([
                u8::from(holiday).to_string(),
                weekday.to_string(),
                day_type.code().to_string(),
                weather.code().to_string(),
                fmt_unit(climate.temp),
                fmt_unit(climate.atemp),
                fmt_unit(climate.hum),
                fmt_unit(climate.windspeed),
            ]);
            fields
        };

        let mut day_total = 0u32;
        let mut day_casual = 0u32;
        for (hour, weight) in (0u8..).zip(profile.iter()) {
            let expected = level * weight / profile_sum;
            let jitter = (1.0 + 0.15 * normal.sample(&mut rng)).max(0.0);
            let count = (expected * jitter).round() as u32;
            let casual = (f64::from(count) * casual_share).round() as u32;
            day_total += count;
            day_casual += casual;

            let mut fields = vec![(hourly.len() + 1).to_string()];
            fields.extend(calendar(Some(hour)));
            fields.extend([casual.to_string(), (count - casual).to_string(), count.to_string()]);

            hourly.push(HourlyRecord {
                date,
                hour,
                season,
                weather,
                day_type,
                count,
                raw: StringRecord::from(fields),
            });
        }

        let mut fields = vec![(daily.len() + 1).to_string()];
        fields.extend(calendar(None));
        fields.extend([
            day_casual.to_string(),
            (day_total - day_casual).to_string(),
            day_total.to_string(),
        ]);

        daily.push(DailyRecord {
            date,
            season,
            weather,
            day_type,
            count: day_total,
            raw: StringRecord::from(fields),
        });
    }

    Ok(Dataset {
        daily: Collection {
            headers: StringRecord::from(DAY_HEADERS.to_vec()),
            records: daily,
        },
        hourly: Collection {
            headers: StringRecord::from(HOUR_HEADERS.to_vec()),
            records: hourly,
        },
    })
}

/// Write both collections as `day.csv` / `hour.csv` under `dir`.
pub fn write_csv(dataset: &Dataset, dir: &Path) -> Result<DataPaths, AppError> {
    create_dir_all(dir).map_err(|e| {
        AppError::new(EXIT_RUNTIME, format!("Failed to create '{}': {e}", dir.display()))
    })?;

    let paths = DataPaths::in_dir(dir);
    write_collection(&paths.day, &dataset.daily)?;
    write_collection(&paths.hour, &dataset.hourly)?;

    info!(
        dir = %dir.display(),
        days = dataset.daily.len(),
        hours = dataset.hourly.len(),
        "sample dataset written"
    );
    Ok(paths)
}

fn write_collection<R: crate::domain::Observation>(
    path: &Path,
    collection: &Collection<R>,
) -> Result<(), AppError> {
    let write_err =
        |e: csv::Error| AppError::new(EXIT_RUNTIME, format!("Failed to write '{}': {e}", path.display()));

    let mut writer = csv::Writer::from_path(path).map_err(write_err)?;
    writer.write_record(&collection.headers).map_err(write_err)?;
    for record in &collection.records {
        writer.write_record(record.raw()).map_err(write_err)?;
    }
    writer.flush().map_err(|e| {
        AppError::new(EXIT_RUNTIME, format!("Failed to write '{}': {e}", path.display()))
    })
}

/// Meteorological seasons by month.
pub fn season_for_month(month: u32) -> Season {
    match month {
        3..=5 => Season::Spring,
        6..=8 => Season::Summer,
        9..=11 => Season::Fall,
        _ => Season::Winter,
    }
}

fn is_holiday(date: NaiveDate) -> bool {
    matches!((date.month(), date.day()), (1, 1) | (7, 4) | (12, 25))
}

fn weather_factor(weather: Weather) -> f64 {
    match weather {
        Weather::Clear => 1.0,
        Weather::Mist => 0.85,
        Weather::LightPrecip => 0.45,
        Weather::HeavyPrecip => 0.2,
    }
}

fn fmt_unit(v: f64) -> String {
    format!("{v:.6}")
}
