//! Shared dashboard pipeline used by both the summary report and the TUI.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! load (cached) -> filter both collections -> KPIs, series and grouped means
//!
//! The front ends then focus on presentation (printing vs widgets).

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use crate::analysis::{
    Filter, GroupMean, Kpis, Subset, aggregate_kpis, daily_series, group_mean, hourly_pattern,
};
use crate::domain::{DailyRecord, DashboardConfig, Dataset, DayType, HourlyRecord, Season, Weather};
use crate::error::AppError;
use crate::io::{DataPaths, DatasetCache, DatasetSource};

/// Every output of one filter state.
#[derive(Debug, Clone)]
pub struct Dashboard<'a> {
    pub filter: Filter,
    pub kpis: Kpis,
    pub daily_series: Vec<(NaiveDate, u32)>,
    pub by_weather: Vec<GroupMean<Weather>>,
    pub by_season: Vec<GroupMean<Season>>,
    pub by_day_type: Vec<GroupMean<DayType>>,
    pub hourly_pattern: Vec<GroupMean<u8>>,
    /// Filtered rows, verbatim, for tabular display.
    pub daily: Subset<'a, DailyRecord>,
    pub hourly: Subset<'a, HourlyRecord>,
}

/// Load the dataset configured in `config`, reusing the cache when possible.
pub fn load_dataset<S: DatasetSource>(
    cache: &mut DatasetCache<S>,
    config: &DashboardConfig,
) -> Result<Arc<Dataset>, AppError> {
    let paths = DataPaths::new(config.day_path(), config.hour_path());
    Ok(cache.get(&paths)?)
}

/// Filter both collections with one filter and compute all derived views.
pub fn build_dashboard<'a>(dataset: &'a Dataset, filter: &Filter) -> Dashboard<'a> {
    let (daily, hourly) = filter.apply_pair(dataset);

    debug!(
        daily_rows = daily.len(),
        hourly_rows = hourly.len(),
        from = %filter.date_min,
        to = %filter.date_max,
        "dashboard recomputed"
    );

    Dashboard {
        filter: filter.clone(),
        kpis: aggregate_kpis(&daily),
        daily_series: daily_series(&daily),
        by_weather: group_mean(&daily, |r| r.weather),
        by_season: group_mean(&daily, |r| r.season),
        by_day_type: group_mean(&daily, |r| r.day_type),
        hourly_pattern: hourly_pattern(&hourly),
        daily,
        hourly,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    use crate::domain::{DAY_FILE, FilterSelection, HOUR_FILE};

    fn config_for(dir: PathBuf) -> DashboardConfig {
        DashboardConfig {
            data_dir: dir,
            selection: FilterSelection::default(),
            log_level: "info".to_string(),
            log_dir: PathBuf::from("logs"),
        }
    }

    #[test]
    fn end_to_end_from_csv_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(DAY_FILE),
            "dteday,season,weathersit,workingday,cnt\n\
             2011-03-01,1,1,1,100\n\
             2011-03-02,1,2,0,200\n\
             2011-03-03,1,1,1,300\n",
        )
        .unwrap();
        fs::write(
            dir.path().join(HOUR_FILE),
            "dteday,hr,season,weathersit,workingday,cnt\n\
             2011-03-01,9,1,1,1,10\n\
             2011-03-02,9,1,2,0,30\n\
             2011-03-03,10,1,1,1,5\n",
        )
        .unwrap();

        let config = config_for(dir.path().to_path_buf());
        let mut cache: DatasetCache = DatasetCache::default();
        let dataset = load_dataset(&mut cache, &config).unwrap();
        let filter = Filter::from_selection(&config.selection, &dataset);
        let dash = build_dashboard(&dataset, &filter);

        assert_eq!(dash.kpis.total, 600);
        assert_eq!(dash.kpis.average, Some(200));
        assert_eq!(dash.kpis.max, Some(300));
        assert_eq!(dash.kpis.count, 3);
        assert_eq!(dash.daily.len(), 3);
        assert_eq!(dash.hourly.len(), 3);

        let hours: Vec<(u8, f64)> = dash.hourly_pattern.iter().map(|g| (g.key, g.mean)).collect();
        assert_eq!(hours, vec![(9, 20.0), (10, 5.0)]);

        assert_eq!(dash.by_weather.len(), 2);
        assert_eq!(dash.by_weather[0].key, Weather::Clear);
        assert!((dash.by_weather[0].mean - 200.0).abs() < 1e-12);
        assert_eq!(dash.by_season.len(), 1);
        assert_eq!(dash.by_day_type[0].key, DayType::Weekend);
    }

    #[test]
    fn missing_directory_is_an_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path().join("nope"));
        let mut cache: DatasetCache = DatasetCache::default();
        let err = load_dataset(&mut cache, &config).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_INPUT);
    }
}
