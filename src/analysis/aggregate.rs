//! KPI and group-by aggregations over filtered subsets.
//!
//! All functions are total: an empty subset gives zero/empty outputs. The only
//! undefined quantities (mean and max of nothing) are reported as `None`.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::analysis::Subset;
use crate::domain::{DailyRecord, HourlyRecord, Observation};

/// The four headline metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Kpis {
    /// Sum of rental counts.
    pub total: u64,
    /// Mean rental count truncated toward zero; `None` when there are no rows.
    pub average: Option<u64>,
    /// Largest rental count; `None` when there are no rows.
    pub max: Option<u32>,
    /// Number of rows.
    pub count: usize,
}

/// Mean rental count for one group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GroupMean<K> {
    pub key: K,
    pub mean: f64,
    /// Number of rows in the group.
    pub rows: usize,
}

pub fn aggregate_kpis<R: Observation>(subset: &Subset<'_, R>) -> Kpis {
    let count = subset.len();
    let total: u64 = subset.iter().map(|r| u64::from(r.count())).sum();
    let max = subset.iter().map(Observation::count).max();
    // Counts are non-negative, so integer division is the truncated mean.
    let average = (count > 0).then(|| total / count as u64);

    Kpis {
        total,
        average,
        max,
        count,
    }
}

/// Mean count per group, ordered by the key's `Ord` (canonical order for
/// categories). Groups without rows are omitted.
pub fn group_mean<R, K, F>(subset: &Subset<'_, R>, key: F) -> Vec<GroupMean<K>>
where
    R: Observation,
    K: Ord + Copy,
    F: Fn(&R) -> K,
{
    let mut acc: BTreeMap<K, (u64, usize)> = BTreeMap::new();
    for row in subset.iter() {
        let slot = acc.entry(key(row)).or_insert((0, 0));
        slot.0 += u64::from(row.count());
        slot.1 += 1;
    }

    acc.into_iter()
        .map(|(key, (sum, rows))| GroupMean {
            key,
            mean: sum as f64 / rows as f64,
            rows,
        })
        .collect()
}

/// Mean count per hour of day (ascending, absent hours omitted).
pub fn hourly_pattern(subset: &Subset<'_, HourlyRecord>) -> Vec<GroupMean<u8>> {
    group_mean(subset, |r| r.hour)
}

/// Date -> count points for the daily trend line, ascending by date.
pub fn daily_series(subset: &Subset<'_, DailyRecord>) -> Vec<(NaiveDate, u32)> {
    let mut series: Vec<(NaiveDate, u32)> = subset.iter().map(|r| (r.date, r.count)).collect();
    series.sort_by_key(|(d, _)| *d);
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Filter;
    use crate::analysis::filter::tests::{daily, date, hourly};
    use crate::domain::{Collection, DayType, Season, Weather};
    use csv::StringRecord;
    use std::collections::BTreeSet;

    fn collection<R>(records: Vec<R>) -> Collection<R> {
        Collection {
            headers: StringRecord::new(),
            records,
        }
    }

    #[test]
    fn kpis_for_a_simple_spring_range() {
        let days = collection(vec![
            daily(date(3, 1), Season::Spring, Weather::Clear, DayType::Working, 100),
            daily(date(3, 2), Season::Spring, Weather::Mist, DayType::Weekend, 200),
            daily(date(3, 3), Season::Spring, Weather::LightPrecip, DayType::Working, 300),
        ]);
        let mut f = Filter::all(date(3, 1), date(3, 3));
        f.seasons = BTreeSet::from([Season::Spring]);

        let kpis = aggregate_kpis(&f.apply(&days));
        assert_eq!(
            kpis,
            Kpis {
                total: 600,
                average: Some(200),
                max: Some(300),
                count: 3,
            }
        );
    }

    #[test]
    fn kpis_for_empty_subset_signal_no_data() {
        let days = collection(vec![daily(date(3, 1), Season::Spring, Weather::Clear, DayType::Working, 100)]);
        let mut f = Filter::all(date(3, 1), date(3, 1));
        f.seasons.clear();

        let kpis = aggregate_kpis(&f.apply(&days));
        assert_eq!(kpis.total, 0);
        assert_eq!(kpis.count, 0);
        assert_eq!(kpis.average, None);
        assert_eq!(kpis.max, None);
    }

    #[test]
    fn average_is_truncated() {
        let days = collection(vec![
            daily(date(3, 1), Season::Spring, Weather::Clear, DayType::Working, 1),
            daily(date(3, 2), Season::Spring, Weather::Clear, DayType::Working, 2),
        ]);
        let kpis = aggregate_kpis(&Filter::all(date(1, 1), date(12, 31)).apply(&days));
        assert_eq!(kpis.average, Some(1));
    }

    #[test]
    fn weather_group_of_a_single_code() {
        let days = collection(vec![
            daily(date(3, 1), Season::Spring, Weather::Clear, DayType::Working, 10),
            daily(date(3, 2), Season::Summer, Weather::Clear, DayType::Weekend, 25),
        ]);
        let subset = Filter::all(date(1, 1), date(12, 31)).apply(&days);

        let groups = group_mean(&subset, |r| r.weather);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].key, Weather::Clear);
        assert!((groups[0].mean - 17.5).abs() < 1e-12);
        assert_eq!(groups[0].rows, 2);
    }

    #[test]
    fn season_groups_follow_canonical_order_and_skip_empty() {
        let days = collection(vec![
            daily(date(12, 1), Season::Winter, Weather::Clear, DayType::Working, 8),
            daily(date(3, 1), Season::Spring, Weather::Clear, DayType::Working, 4),
            daily(date(9, 1), Season::Fall, Weather::Clear, DayType::Working, 6),
        ]);
        let subset = Filter::all(date(1, 1), date(12, 31)).apply(&days);

        let keys: Vec<Season> = group_mean(&subset, |r| r.season).iter().map(|g| g.key).collect();
        assert_eq!(keys, vec![Season::Spring, Season::Fall, Season::Winter]);
    }

    #[test]
    fn day_type_groups_put_weekend_first() {
        let days = collection(vec![
            daily(date(3, 1), Season::Spring, Weather::Clear, DayType::Working, 30),
            daily(date(3, 2), Season::Spring, Weather::Clear, DayType::Weekend, 10),
        ]);
        let subset = Filter::all(date(1, 1), date(12, 31)).apply(&days);

        let groups = group_mean(&subset, |r| r.day_type);
        assert_eq!(groups[0].key, DayType::Weekend);
        assert_eq!(groups[1].key, DayType::Working);
    }

    #[test]
    fn hourly_pattern_means_per_hour() {
        let hours = collection(vec![
            hourly(date(3, 1), 9, 10),
            hourly(date(3, 1), 10, 5),
            hourly(date(3, 2), 9, 30),
        ]);
        let subset = Filter::all(date(1, 1), date(12, 31)).apply(&hours);

        let pattern: Vec<(u8, f64)> = hourly_pattern(&subset).iter().map(|g| (g.key, g.mean)).collect();
        assert_eq!(pattern, vec![(9, 20.0), (10, 5.0)]);
    }

    #[test]
    fn daily_series_is_sorted_by_date() {
        let days = collection(vec![
            daily(date(3, 2), Season::Spring, Weather::Clear, DayType::Working, 2),
            daily(date(3, 1), Season::Spring, Weather::Clear, DayType::Working, 1),
        ]);
        let subset = Filter::all(date(1, 1), date(12, 31)).apply(&days);
        assert_eq!(daily_series(&subset), vec![(date(3, 1), 1), (date(3, 2), 2)]);
    }
}
