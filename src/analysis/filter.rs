//! Conjunctive row filter shared by the daily and hourly collections.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use csv::StringRecord;
use serde::Serialize;

use crate::domain::{
    Category, Collection, DailyRecord, Dataset, DayType, FilterSelection, HourlyRecord, Observation,
    Season, Weather,
};

/// One logical filter state.
///
/// A row passes when its date lies in `[date_min, date_max]` (inclusive) and
/// its season, weather and day type are all selected. Empty sets select nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Filter {
    pub date_min: NaiveDate,
    pub date_max: NaiveDate,
    pub seasons: BTreeSet<Season>,
    pub weather: BTreeSet<Weather>,
    pub day_types: BTreeSet<DayType>,
}

impl Filter {
    /// Every category selected over the given date range.
    pub fn all(date_min: NaiveDate, date_max: NaiveDate) -> Self {
        Self {
            date_min,
            date_max,
            seasons: every(),
            weather: every(),
            day_types: every(),
        }
    }

    /// Default dashboard filter: the dataset's full date span, every category.
    pub fn full_span(dataset: &Dataset) -> Self {
        let (lo, hi) = dataset
            .date_span()
            .unwrap_or((NaiveDate::MIN, NaiveDate::MAX));
        Self::all(lo, hi)
    }

    /// Resolve CLI/TUI choices against a loaded dataset.
    pub fn from_selection(selection: &FilterSelection, dataset: &Dataset) -> Self {
        let base = Self::full_span(dataset);
        Self {
            date_min: selection.from.unwrap_or(base.date_min),
            date_max: selection.to.unwrap_or(base.date_max),
            seasons: selection.seasons.clone().unwrap_or(base.seasons),
            weather: selection.weather.clone().unwrap_or(base.weather),
            day_types: selection.day_types.clone().unwrap_or(base.day_types),
        }
    }

    pub fn matches<R: Observation>(&self, row: &R) -> bool {
        let date = row.date();
        date >= self.date_min
            && date <= self.date_max
            && self.seasons.contains(&row.season())
            && self.weather.contains(&row.weather())
            && self.day_types.contains(&row.day_type())
    }

    /// Rows of `collection` passing the filter, in file order.
    pub fn apply<'a, R: Observation>(&self, collection: &'a Collection<R>) -> Subset<'a, R> {
        Subset {
            headers: &collection.headers,
            rows: collection.records.iter().filter(|r| self.matches(*r)).collect(),
        }
    }

    /// Apply the same filter to both collections so paired views stay consistent.
    pub fn apply_pair<'a>(
        &self,
        dataset: &'a Dataset,
    ) -> (Subset<'a, DailyRecord>, Subset<'a, HourlyRecord>) {
        (self.apply(&dataset.daily), self.apply(&dataset.hourly))
    }
}

fn every<C: Category>() -> BTreeSet<C> {
    C::ALL.iter().copied().collect()
}

/// A filtered view borrowing rows from a collection.
#[derive(Debug, Clone)]
pub struct Subset<'a, R> {
    pub headers: &'a StringRecord,
    pub rows: Vec<&'a R>,
}

impl<'a, R> Subset<'a, R> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a R> + '_ {
        self.rows.iter().copied()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2011, month, day).unwrap()
    }

    pub(crate) fn daily(d: NaiveDate, season: Season, weather: Weather, day_type: DayType, count: u32) -> DailyRecord {
        DailyRecord {
            date: d,
            season,
            weather,
            day_type,
            count,
            raw: StringRecord::from(vec![d.to_string(), count.to_string()]),
        }
    }

    pub(crate) fn hourly(d: NaiveDate, hour: u8, count: u32) -> HourlyRecord {
        hourly_in(d, hour, Season::Spring, Weather::Clear, DayType::Working, count)
    }

    pub(crate) fn hourly_in(
        d: NaiveDate,
        hour: u8,
        season: Season,
        weather: Weather,
        day_type: DayType,
        count: u32,
    ) -> HourlyRecord {
        HourlyRecord {
            date: d,
            hour,
            season,
            weather,
            day_type,
            count,
            raw: StringRecord::from(vec![d.to_string(), hour.to_string(), count.to_string()]),
        }
    }

    fn sample_dataset() -> Dataset {
        Dataset {
            daily: Collection {
                headers: StringRecord::from(vec!["dteday", "cnt"]),
                records: vec![
                    daily(date(1, 1), Season::Winter, Weather::Clear, DayType::Weekend, 10),
                    daily(date(4, 2), Season::Spring, Weather::Mist, DayType::Working, 20),
                    daily(date(7, 3), Season::Summer, Weather::Clear, DayType::Working, 30),
                    daily(date(10, 4), Season::Fall, Weather::LightPrecip, DayType::Weekend, 40),
                ],
            },
            hourly: Collection {
                headers: StringRecord::from(vec!["dteday", "hr", "cnt"]),
                records: vec![
                    hourly_in(date(1, 1), 8, Season::Winter, Weather::Clear, DayType::Weekend, 3),
                    hourly_in(date(4, 2), 9, Season::Spring, Weather::Mist, DayType::Working, 4),
                    hourly_in(date(7, 3), 17, Season::Summer, Weather::Clear, DayType::Working, 6),
                    hourly_in(date(12, 31), 9, Season::Winter, Weather::LightPrecip, DayType::Weekend, 5),
                ],
            },
        }
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let ds = sample_dataset();
        let f = Filter::all(date(4, 2), date(7, 3));
        let subset = f.apply(&ds.daily);
        let counts: Vec<u32> = subset.iter().map(|r| r.count).collect();
        assert_eq!(counts, vec![20, 30]);
        assert!(subset.iter().all(|r| r.date >= f.date_min && r.date <= f.date_max));
    }

    #[test]
    fn inverted_date_range_is_empty() {
        let ds = sample_dataset();
        let f = Filter::all(date(7, 3), date(4, 2));
        assert!(f.apply(&ds.daily).is_empty());
        assert!(f.apply(&ds.hourly).is_empty());
    }

    #[test]
    fn empty_category_sets_select_nothing() {
        let ds = sample_dataset();
        let full = Filter::full_span(&ds);

        let mut f = full.clone();
        f.seasons.clear();
        assert!(f.apply(&ds.daily).is_empty());

        let mut f = full.clone();
        f.weather.clear();
        assert!(f.apply(&ds.daily).is_empty());

        let mut f = full;
        f.day_types.clear();
        assert!(f.apply(&ds.daily).is_empty());
    }

    #[test]
    fn categorical_predicates_are_conjunctive() {
        let ds = sample_dataset();
        let mut f = Filter::full_span(&ds);
        f.weather = BTreeSet::from([Weather::Clear]);
        f.day_types = BTreeSet::from([DayType::Working]);

        let subset = f.apply(&ds.daily);
        assert_eq!(subset.len(), 1);
        assert_eq!(subset.rows[0].season, Season::Summer);
    }

    #[test]
    fn pair_uses_the_same_bounds_for_both_collections() {
        let ds = sample_dataset();
        let f = Filter::all(date(1, 1), date(6, 30));
        let (day, hour) = f.apply_pair(&ds);
        assert_eq!(day.len(), 2);
        assert_eq!(hour.len(), 2);
        assert!(hour.iter().all(|r| r.date <= date(6, 30)));
    }

    #[test]
    fn pair_applies_categories_to_hourly_rows() {
        let ds = sample_dataset();
        let full = Filter::all(date(1, 1), date(12, 31));
        let hours = |f: &Filter| -> Vec<u32> { f.apply_pair(&ds).1.iter().map(|r| r.count).collect() };

        let mut f = full.clone();
        f.seasons = BTreeSet::from([Season::Winter]);
        assert_eq!(hours(&f), vec![3, 5]);

        let mut f = full.clone();
        f.weather = BTreeSet::from([Weather::Clear]);
        assert_eq!(hours(&f), vec![3, 6]);

        let mut f = full.clone();
        f.day_types = BTreeSet::from([DayType::Working]);
        assert_eq!(hours(&f), vec![4, 6]);

        let mut f = full;
        f.seasons = BTreeSet::from([Season::Winter]);
        f.weather = BTreeSet::from([Weather::LightPrecip]);
        let (day, hour) = f.apply_pair(&ds);
        assert!(day.is_empty());
        assert_eq!(hour.iter().map(|r| r.hour).collect::<Vec<_>>(), vec![9]);
    }

    #[test]
    fn full_span_covers_the_whole_dataset() {
        let ds = sample_dataset();
        let f = Filter::full_span(&ds);
        assert_eq!(f.date_min, date(1, 1));
        assert_eq!(f.date_max, date(10, 4));
        assert_eq!(f.apply(&ds.daily).len(), ds.daily.len());
    }

    #[test]
    fn selection_overrides_only_what_it_names() {
        let ds = sample_dataset();
        let selection = FilterSelection {
            from: Some(date(3, 1)),
            seasons: Some(BTreeSet::new()),
            ..FilterSelection::default()
        };
        let f = Filter::from_selection(&selection, &ds);
        assert_eq!(f.date_min, date(3, 1));
        assert_eq!(f.date_max, date(10, 4));
        assert!(f.seasons.is_empty());
        assert_eq!(f.weather.len(), Weather::ALL.len());
    }
}
