//! Tidal flooding events grouped by year and season.

use crate::{DataError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

// ============================================================================
// Season
// ============================================================================

/// Meteorological season of a tide record.
///
/// The declaration order is the order seasons are processed within a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    /// March to May.
    Spring,
    /// June to August.
    Summer,
    /// September to November.
    Autumn,
    /// December to February.
    Winter,
}

impl Season {
    /// All seasons in processing order.
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Autumn, Season::Winter];

    /// Returns the lowercase name used in the tide tables.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
            Season::Winter => "winter",
        }
    }

    /// Position of the season within [`Season::ALL`].
    pub const fn index(&self) -> usize {
        match self {
            Season::Spring => 0,
            Season::Summer => 1,
            Season::Autumn => 2,
            Season::Winter => 3,
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Season {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spring" => Ok(Season::Spring),
            "summer" => Ok(Season::Summer),
            "autumn" | "fall" => Ok(Season::Autumn),
            "winter" => Ok(Season::Winter),
            _ => Err(DataError::UnknownName {
                kind: "season",
                value: s.to_string(),
            }),
        }
    }
}

// ============================================================================
// Tide Record
// ============================================================================

/// The flooding events of one season of one year.
///
/// `high_water_height[i]` is the high water level of event group `i` and
/// `num_tides[i]` the number of tides in that group. `slr` is the sea-level
/// rise increment of the year; it is zero until the record is forced with an
/// SLR scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TideRecord {
    year: i32,
    season: Season,
    high_water_height: Vec<f64>,
    num_tides: Vec<u32>,
    slr: f64,
}

impl TideRecord {
    /// Creates a record, checking that both event sequences have the same length.
    pub fn new(
        year: i32,
        season: Season,
        high_water_height: Vec<f64>,
        num_tides: Vec<u32>,
    ) -> Result<Self> {
        if high_water_height.len() != num_tides.len() {
            return Err(DataError::InputLengthMismatch {
                left: high_water_height.len(),
                right: num_tides.len(),
            });
        }
        Ok(Self {
            year,
            season,
            high_water_height,
            num_tides,
            slr: 0.0,
        })
    }

    /// Creates a season with no flooding events.
    pub fn empty(year: i32, season: Season) -> Self {
        Self {
            year,
            season,
            high_water_height: Vec::new(),
            num_tides: Vec::new(),
            slr: 0.0,
        }
    }

    /// Returns a copy of this record carrying the given SLR increment.
    pub fn with_slr(&self, slr: f64) -> Self {
        Self {
            slr,
            ..self.clone()
        }
    }

    /// Appends one event group.
    pub fn push_event(&mut self, high_water_height: f64, num_tides: u32) {
        self.high_water_height.push(high_water_height);
        self.num_tides.push(num_tides);
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn season(&self) -> Season {
        self.season
    }

    /// High water height of each event group.
    pub fn high_water_height(&self) -> &[f64] {
        &self.high_water_height
    }

    /// Number of tides in each event group.
    pub fn num_tides(&self) -> &[u32] {
        &self.num_tides
    }

    /// SLR increment assigned to the record's year.
    pub fn slr(&self) -> f64 {
        self.slr
    }

    /// Number of event groups.
    pub fn len(&self) -> usize {
        self.high_water_height.len()
    }

    pub fn is_empty(&self) -> bool {
        self.high_water_height.is_empty()
    }
}

// ============================================================================
// Tide Dataset
// ============================================================================

/// Validated collection of tide records.
///
/// Invariants:
/// - at least one record
/// - at most one record per (year, season)
/// - the years present form a contiguous range
#[derive(Debug, Clone, PartialEq)]
pub struct TideDataset {
    records: BTreeMap<(i32, Season), TideRecord>,
}

impl TideDataset {
    /// Builds a dataset from records in any order.
    pub fn new(records: impl IntoIterator<Item = TideRecord>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for record in records {
            let key = (record.year(), record.season());
            if map.insert(key, record).is_some() {
                return Err(DataError::DuplicateTideRecord {
                    year: key.0,
                    season: key.1,
                });
            }
        }
        if map.is_empty() {
            return Err(DataError::EmptyDataset("tide records"));
        }

        let mut previous: Option<i32> = None;
        for &(year, _) in map.keys() {
            if let Some(prev) = previous {
                if year != prev && year != prev + 1 {
                    return Err(DataError::NonContiguousYears {
                        expected: prev + 1,
                        found: year,
                    });
                }
            }
            previous = Some(year);
        }

        Ok(Self { records: map })
    }

    /// First year of the dataset.
    pub fn start_year(&self) -> i32 {
        self.records.keys().next().map(|&(y, _)| y).unwrap_or_default()
    }

    /// Last year of the dataset.
    pub fn end_year(&self) -> i32 {
        self.records.keys().next_back().map(|&(y, _)| y).unwrap_or_default()
    }

    /// Years covered, in increasing order.
    pub fn years(&self) -> std::ops::RangeInclusive<i32> {
        self.start_year()..=self.end_year()
    }

    /// Number of years covered.
    pub fn num_years(&self) -> usize {
        (self.end_year() - self.start_year() + 1) as usize
    }

    /// Record for a given year and season, if present.
    pub fn get(&self, year: i32, season: Season) -> Option<&TideRecord> {
        self.records.get(&(year, season))
    }

    /// Record for a given year and season, failing with
    /// [`DataError::MissingSeasonData`] when absent.
    pub fn season(&self, year: i32, season: Season) -> Result<&TideRecord> {
        self.get(year, season)
            .ok_or(DataError::MissingSeasonData { year, season })
    }

    /// All records of a year in season order.
    pub fn year_records(&self, year: i32) -> impl Iterator<Item = &TideRecord> {
        self.records
            .range((year, Season::Spring)..=(year, Season::Winter))
            .map(|(_, record)| record)
    }

    /// All records ordered by year then season.
    pub fn records(&self) -> impl Iterator<Item = &TideRecord> {
        self.records.values()
    }

    /// Number of (year, season) records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_year(year: i32) -> Vec<TideRecord> {
        Season::ALL
            .iter()
            .map(|&s| TideRecord::new(year, s, vec![1.0], vec![1]).unwrap())
            .collect()
    }

    #[test]
    fn test_season_parse() {
        assert_eq!("spring".parse::<Season>().unwrap(), Season::Spring);
        assert_eq!(" Winter ".parse::<Season>().unwrap(), Season::Winter);
        assert_eq!("fall".parse::<Season>().unwrap(), Season::Autumn);
        assert!(matches!(
            "monsoon".parse::<Season>(),
            Err(DataError::UnknownName { kind: "season", .. })
        ));
    }

    #[test]
    fn test_record_length_mismatch() {
        let result = TideRecord::new(2020, Season::Summer, vec![1.0, 1.2], vec![3]);
        assert_eq!(
            result,
            Err(DataError::InputLengthMismatch { left: 2, right: 1 })
        );
    }

    #[test]
    fn test_with_slr_leaves_original_untouched() {
        let record = TideRecord::new(2020, Season::Spring, vec![1.0], vec![2]).unwrap();
        let forced = record.with_slr(0.004);
        assert_eq!(record.slr(), 0.0);
        assert_eq!(forced.slr(), 0.004);
        assert_eq!(forced.high_water_height(), record.high_water_height());
    }

    #[test]
    fn test_dataset_years_sorted() {
        let mut records = full_year(2022);
        records.extend(full_year(2020));
        records.extend(full_year(2021));
        let dataset = TideDataset::new(records).unwrap();

        assert_eq!(dataset.start_year(), 2020);
        assert_eq!(dataset.end_year(), 2022);
        assert_eq!(dataset.years().collect::<Vec<_>>(), vec![2020, 2021, 2022]);
        assert_eq!(dataset.num_years(), 3);
        assert_eq!(dataset.len(), 12);

        let seasons: Vec<Season> = dataset.year_records(2021).map(|r| r.season()).collect();
        assert_eq!(seasons, Season::ALL.to_vec());
    }

    #[test]
    fn test_dataset_rejects_gap() {
        let mut records = full_year(2020);
        records.extend(full_year(2022));
        assert_eq!(
            TideDataset::new(records),
            Err(DataError::NonContiguousYears {
                expected: 2021,
                found: 2022
            })
        );
    }

    #[test]
    fn test_dataset_rejects_duplicates_and_empty() {
        let mut records = full_year(2020);
        records.push(TideRecord::empty(2020, Season::Autumn));
        assert_eq!(
            TideDataset::new(records),
            Err(DataError::DuplicateTideRecord {
                year: 2020,
                season: Season::Autumn
            })
        );
        assert_eq!(
            TideDataset::new(Vec::new()),
            Err(DataError::EmptyDataset("tide records"))
        );
    }

    #[test]
    fn test_missing_season_lookup() {
        let records = vec![TideRecord::empty(2030, Season::Spring)];
        let dataset = TideDataset::new(records).unwrap();
        assert!(dataset.season(2030, Season::Spring).is_ok());
        assert_eq!(
            dataset.season(2030, Season::Winter),
            Err(DataError::MissingSeasonData {
                year: 2030,
                season: Season::Winter
            })
        );
    }
}
