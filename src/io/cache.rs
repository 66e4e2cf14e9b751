//! Load cache.
//!
//! The dashboard recomputes every view on each interaction but must only read
//! the CSV files once. `DatasetCache` is owned by the caller (the TUI or the
//! summary command) and hands out shared `Arc<Dataset>` handles; dropping the
//! cache is the only way to invalidate it.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{DAY_FILE, Dataset, HOUR_FILE};
use crate::error::LoadError;

/// The pair of files making up one dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataPaths {
    pub day: PathBuf,
    pub hour: PathBuf,
}

impl DataPaths {
    pub fn new(day: impl Into<PathBuf>, hour: impl Into<PathBuf>) -> Self {
        Self {
            day: day.into(),
            hour: hour.into(),
        }
    }

    /// `day.csv` / `hour.csv` inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(DAY_FILE), dir.join(HOUR_FILE))
    }
}

/// Where datasets come from.
pub trait DatasetSource {
    fn load(&self, paths: &DataPaths) -> Result<Dataset, LoadError>;
}

/// Reads the CSV files from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvSource;

impl DatasetSource for CsvSource {
    fn load(&self, paths: &DataPaths) -> Result<Dataset, LoadError> {
        crate::io::ingest::load(&paths.day, &paths.hour)
    }
}

/// Caches successful loads by path pair. Failures are not cached.
#[derive(Debug, Default)]
pub struct DatasetCache<S = CsvSource> {
    source: S,
    entries: HashMap<DataPaths, Arc<Dataset>>,
}

impl<S: DatasetSource> DatasetCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            entries: HashMap::new(),
        }
    }

    /// Return the dataset for `paths`, reading it only on first use.
    pub fn get(&mut self, paths: &DataPaths) -> Result<Arc<Dataset>, LoadError> {
        if let Some(dataset) = self.entries.get(paths) {
            debug!(day = %paths.day.display(), "dataset cache hit");
            return Ok(Arc::clone(dataset));
        }

        let dataset = match self.source.load(paths) {
            Ok(d) => Arc::new(d),
            Err(err) => {
                warn!(error = %err, "dataset load failed");
                return Err(err);
            }
        };
        self.entries.insert(paths.clone(), Arc::clone(&dataset));
        Ok(dataset)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::fs;

    use crate::domain::{Collection, DailyRecord, DayType, Season, Weather};

    /// Counts how often the underlying source is hit.
    struct CountingSource {
        calls: Cell<usize>,
        fail: bool,
    }

    impl DatasetSource for CountingSource {
        fn load(&self, paths: &DataPaths) -> Result<Dataset, LoadError> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                return Err(LoadError::MissingColumn {
                    path: paths.day.clone(),
                    column: "cnt",
                });
            }
            Ok(Dataset {
                daily: Collection {
                    headers: csv::StringRecord::from(vec!["dteday", "cnt"]),
                    records: vec![DailyRecord {
                        date: chrono::NaiveDate::from_ymd_opt(2011, 1, 1).unwrap(),
                        season: Season::Spring,
                        weather: Weather::Clear,
                        day_type: DayType::Weekend,
                        count: 42,
                        raw: csv::StringRecord::from(vec!["2011-01-01", "42"]),
                    }],
                },
                hourly: Collection::default(),
            })
        }
    }

    #[test]
    fn repeated_gets_reuse_the_first_load() {
        let mut cache = DatasetCache::new(CountingSource {
            calls: Cell::new(0),
            fail: false,
        });
        let paths = DataPaths::in_dir(Path::new("data"));

        let a = cache.get(&paths).unwrap();
        let b = cache.get(&paths).unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.source.calls.get(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn distinct_paths_are_cached_separately() {
        let mut cache = DatasetCache::new(CountingSource {
            calls: Cell::new(0),
            fail: false,
        });
        cache.get(&DataPaths::in_dir(Path::new("a"))).unwrap();
        cache.get(&DataPaths::in_dir(Path::new("b"))).unwrap();
        assert_eq!(cache.source.calls.get(), 2);
    }

    #[test]
    fn failures_are_not_cached() {
        let mut cache = DatasetCache::new(CountingSource {
            calls: Cell::new(0),
            fail: true,
        });
        let paths = DataPaths::in_dir(Path::new("data"));
        assert!(cache.get(&paths).is_err());
        assert!(cache.get(&paths).is_err());
        assert_eq!(cache.source.calls.get(), 2);
        assert!(cache.is_empty());
    }

    #[test]
    fn csv_reload_with_same_paths_is_equal() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(DAY_FILE),
            "dteday,season,weathersit,workingday,cnt\n2011-01-01,1,1,0,5\n2011-01-02,1,2,1,9\n",
        )
        .unwrap();
        fs::write(
            dir.path().join(HOUR_FILE),
            "dteday,hr,season,weathersit,workingday,cnt\n2011-01-01,0,1,1,0,5\n",
        )
        .unwrap();
        let paths = DataPaths::in_dir(dir.path());

        let first = CsvSource.load(&paths).unwrap();
        let second = CsvSource.load(&paths).unwrap();
        assert_eq!(first, second);

        let mut cache: DatasetCache = DatasetCache::default();
        let cached = cache.get(&paths).unwrap();
        assert_eq!(*cached, first);
    }
}
