//! Shared domain types.
//!
//! These types are intentionally kept small:
//!
//! - categorical axes (`Season`, `Weather`, `DayType`) with total code and label mappings
//! - parsed rows (`DailyRecord`, `HourlyRecord`) that keep their raw CSV fields
//! - the loaded `Dataset` pair, which is never mutated after load

use chrono::NaiveDate;
use clap::ValueEnum;
use csv::StringRecord;
use serde::Serialize;

/// A categorical column with a fixed set of numeric codes.
///
/// `Ord` is the canonical display order; `ALL` lists the variants in that order.
pub trait Category: Copy + Ord + std::fmt::Debug + 'static {
    const ALL: &'static [Self];

    /// Numeric code as stored in the CSV files.
    fn code(self) -> u8;

    /// Human-readable label for charts and controls.
    fn label(self) -> &'static str;

    fn from_code(code: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.code() == code)
    }

    /// Case-insensitive label lookup.
    fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(label))
    }
}

/// Season code (`season` column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Category for Season {
    const ALL: &'static [Self] = &[Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    fn code(self) -> u8 {
        match self {
            Season::Spring => 1,
            Season::Summer => 2,
            Season::Fall => 3,
            Season::Winter => 4,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
        }
    }
}

/// Weather situation code (`weathersit` column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Weather {
    Clear,
    Mist,
    LightPrecip,
    HeavyPrecip,
}

impl Category for Weather {
    const ALL: &'static [Self] = &[
        Weather::Clear,
        Weather::Mist,
        Weather::LightPrecip,
        Weather::HeavyPrecip,
    ];

    fn code(self) -> u8 {
        match self {
            Weather::Clear => 1,
            Weather::Mist => 2,
            Weather::LightPrecip => 3,
            Weather::HeavyPrecip => 4,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Weather::Clear => "Clear",
            Weather::Mist => "Mist/Cloudy",
            Weather::LightPrecip => "Light Rain/Snow",
            Weather::HeavyPrecip => "Heavy Rain/Snow",
        }
    }
}

/// Working-day flag (`workingday` column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DayType {
    /// Weekend or public holiday (code 0).
    Weekend,
    /// Working day (code 1).
    Working,
}

impl Category for DayType {
    const ALL: &'static [Self] = &[DayType::Weekend, DayType::Working];

    fn code(self) -> u8 {
        match self {
            DayType::Weekend => 0,
            DayType::Working => 1,
        }
    }

    fn label(self) -> &'static str {
        match self {
            DayType::Weekend => "Weekend/Holiday",
            DayType::Working => "Working Day",
        }
    }
}

/// Fields shared by daily and hourly rows; everything the filter looks at.
pub trait Observation {
    fn date(&self) -> NaiveDate;
    fn season(&self) -> Season;
    fn weather(&self) -> Weather;
    fn day_type(&self) -> DayType;
    /// Rental count (`cnt`).
    fn count(&self) -> u32;
    /// The full CSV row, including columns the dashboard does not interpret.
    fn raw(&self) -> &StringRecord;
}

/// One row of `day.csv`.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub season: Season,
    pub weather: Weather,
    pub day_type: DayType,
    pub count: u32,
    pub raw: StringRecord,
}

/// One row of `hour.csv`.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyRecord {
    pub date: NaiveDate,
    /// Hour of day, 0..=23.
    pub hour: u8,
    pub season: Season,
    pub weather: Weather,
    pub day_type: DayType,
    pub count: u32,
    pub raw: StringRecord,
}

macro_rules! impl_observation {
    ($ty:ty) => {
        impl Observation for $ty {
            fn date(&self) -> NaiveDate {
                self.date
            }
            fn season(&self) -> Season {
                self.season
            }
            fn weather(&self) -> Weather {
                self.weather
            }
            fn day_type(&self) -> DayType {
                self.day_type
            }
            fn count(&self) -> u32 {
                self.count
            }
            fn raw(&self) -> &StringRecord {
                &self.raw
            }
        }
    };
}

impl_observation!(DailyRecord);
impl_observation!(HourlyRecord);

/// Parsed rows of one input file plus its header row.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<R> {
    pub headers: StringRecord,
    pub records: Vec<R>,
}

impl<R> Default for Collection<R> {
    fn default() -> Self {
        Self {
            headers: StringRecord::new(),
            records: Vec::new(),
        }
    }
}

impl<R: Observation> Collection<R> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest date in the collection.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut iter = self.records.iter().map(Observation::date);
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }
}

/// Both collections, loaded once and shared read-only.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    pub daily: Collection<DailyRecord>,
    pub hourly: Collection<HourlyRecord>,
}

impl Dataset {
    /// Date domain of the dataset (daily rows first, hourly rows if there are none).
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.daily.date_span().or_else(|| self.hourly.date_span())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_for_every_variant() {
        for s in Season::ALL {
            assert_eq!(Season::from_code(s.code()), Some(*s));
        }
        for w in Weather::ALL {
            assert_eq!(Weather::from_code(w.code()), Some(*w));
        }
        for d in DayType::ALL {
            assert_eq!(DayType::from_code(d.code()), Some(*d));
        }
    }

    #[test]
    fn unknown_codes_are_rejected() {
        assert_eq!(Season::from_code(0), None);
        assert_eq!(Season::from_code(5), None);
        assert_eq!(Weather::from_code(0), None);
        assert_eq!(DayType::from_code(2), None);
    }

    #[test]
    fn labels_resolve_case_insensitively() {
        assert_eq!(Season::from_label("fall"), Some(Season::Fall));
        assert_eq!(Weather::from_label(" Mist/Cloudy "), Some(Weather::Mist));
        assert_eq!(DayType::from_label("working day"), Some(DayType::Working));
        assert_eq!(Weather::from_label("Sunny"), None);
    }

    #[test]
    fn canonical_order_follows_display_order() {
        let mut seasons = vec![Season::Winter, Season::Spring, Season::Fall, Season::Summer];
        seasons.sort();
        assert_eq!(seasons, Season::ALL);
        assert!(DayType::Weekend < DayType::Working);
    }

    #[test]
    fn date_span_falls_back_to_hourly() {
        let d = |day| NaiveDate::from_ymd_opt(2012, 3, day).unwrap();
        let hour = |date| HourlyRecord {
            date,
            hour: 0,
            season: Season::Spring,
            weather: Weather::Clear,
            day_type: DayType::Working,
            count: 1,
            raw: StringRecord::new(),
        };
        let dataset = Dataset {
            daily: Collection::default(),
            hourly: Collection {
                headers: StringRecord::new(),
                records: vec![hour(d(5)), hour(d(2)), hour(d(9))],
            },
        };
        assert_eq!(dataset.date_span(), Some((d(2), d(9))));
        assert_eq!(Dataset::default().date_span(), None);
    }
}
