//! Regional sea-level-rise projections.

use crate::{DataError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Which forcing variant of the SLR projection to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlrVariant {
    /// Lower bound of the projection (selector 1).
    Min,
    /// Central projection (selector 2).
    Mean,
    /// Upper bound of the projection (selector 3).
    Max,
}

impl SlrVariant {
    /// Maps the numeric scenario selector {1, 2, 3} to a variant.
    pub fn from_select(select: i64) -> Result<Self> {
        match select {
            1 => Ok(SlrVariant::Min),
            2 => Ok(SlrVariant::Mean),
            3 => Ok(SlrVariant::Max),
            other => Err(DataError::InvalidSlrSelect(other)),
        }
    }

    /// The numeric selector of this variant.
    pub const fn select(&self) -> i64 {
        match self {
            SlrVariant::Min => 1,
            SlrVariant::Mean => 2,
            SlrVariant::Max => 3,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            SlrVariant::Min => "min",
            SlrVariant::Mean => "mean",
            SlrVariant::Max => "max",
        }
    }

    /// Column holding the yearly SLR increment for this variant.
    pub const fn delta_column(&self) -> &'static str {
        match self {
            SlrVariant::Min => "delta_min_slr",
            SlrVariant::Mean => "delta_mean_slr",
            SlrVariant::Max => "delta_max_slr",
        }
    }

    /// Column holding the mean sea level for this variant.
    pub const fn level_column(&self) -> &'static str {
        match self {
            SlrVariant::Min => "min_slr",
            SlrVariant::Mean => "mean_slr",
            SlrVariant::Max => "max_slr",
        }
    }
}

impl std::fmt::Display for SlrVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SlrVariant {
    type Err = DataError;

    /// Accepts either the variant name or its numeric selector.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(select) = s.parse::<i64>() {
            return SlrVariant::from_select(select);
        }
        match s.to_ascii_lowercase().as_str() {
            "min" => Ok(SlrVariant::Min),
            "mean" => Ok(SlrVariant::Mean),
            "max" => Ok(SlrVariant::Max),
            _ => Err(DataError::UnknownName {
                kind: "SLR variant",
                value: s.to_string(),
            }),
        }
    }
}

// ============================================================================
// SLR Table (all variants)
// ============================================================================

/// One year of the regional SLR projection with all three variants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlrTableRow {
    pub year: i32,
    pub delta_min_slr: f64,
    pub min_slr: f64,
    pub delta_mean_slr: f64,
    pub mean_slr: f64,
    pub delta_max_slr: f64,
    pub max_slr: f64,
}

impl SlrTableRow {
    /// Picks the (increment, mean sea level) pair of a variant.
    pub fn select(&self, variant: SlrVariant) -> SlrScenarioRecord {
        let (delta_slr, msl) = match variant {
            SlrVariant::Min => (self.delta_min_slr, self.min_slr),
            SlrVariant::Mean => (self.delta_mean_slr, self.mean_slr),
            SlrVariant::Max => (self.delta_max_slr, self.max_slr),
        };
        SlrScenarioRecord {
            year: self.year,
            delta_slr,
            msl,
        }
    }
}

/// The full SLR projection table, one row per year.
#[derive(Debug, Clone, PartialEq)]
pub struct SlrTable {
    rows: BTreeMap<i32, SlrTableRow>,
}

impl SlrTable {
    /// Builds the table, rejecting duplicate years and empty input.
    pub fn new(rows: impl IntoIterator<Item = SlrTableRow>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for row in rows {
            if map.insert(row.year, row).is_some() {
                return Err(DataError::DuplicateSlrYear(row.year));
            }
        }
        if map.is_empty() {
            return Err(DataError::EmptyDataset("SLR projections"));
        }
        Ok(Self { rows: map })
    }

    /// Selects one variant of the projection.
    pub fn select(&self, variant: SlrVariant) -> SlrScenario {
        SlrScenario {
            variant: Some(variant),
            records: self
                .rows
                .values()
                .map(|row| (row.year, row.select(variant)))
                .collect(),
        }
    }

    pub fn get(&self, year: i32) -> Option<&SlrTableRow> {
        self.rows.get(&year)
    }

    pub fn rows(&self) -> impl Iterator<Item = &SlrTableRow> {
        self.rows.values()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ============================================================================
// SLR Scenario (single variant)
// ============================================================================

/// The SLR forcing of one year under a selected variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlrScenarioRecord {
    pub year: i32,
    /// SLR increment applied during the year.
    pub delta_slr: f64,
    /// Mean sea level of the year.
    pub msl: f64,
}

/// A per-year SLR series under a single variant.
#[derive(Debug, Clone, PartialEq)]
pub struct SlrScenario {
    variant: Option<SlrVariant>,
    records: BTreeMap<i32, SlrScenarioRecord>,
}

impl SlrScenario {
    /// Builds a series from generic `(year, delta_slr, msl)` records that did
    /// not come from an [`SlrTable`].
    pub fn from_records(records: impl IntoIterator<Item = SlrScenarioRecord>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for record in records {
            if map.insert(record.year, record).is_some() {
                return Err(DataError::DuplicateSlrYear(record.year));
            }
        }
        if map.is_empty() {
            return Err(DataError::EmptyDataset("SLR projections"));
        }
        Ok(Self {
            variant: None,
            records: map,
        })
    }

    /// The variant this series was selected from, if any.
    pub fn variant(&self) -> Option<SlrVariant> {
        self.variant
    }

    pub fn get(&self, year: i32) -> Option<&SlrScenarioRecord> {
        self.records.get(&year)
    }

    /// Record for a year, failing with [`DataError::MissingSlrYear`].
    pub fn require(&self, year: i32) -> Result<&SlrScenarioRecord> {
        self.get(year).ok_or(DataError::MissingSlrYear(year))
    }

    pub fn records(&self) -> impl Iterator<Item = &SlrScenarioRecord> {
        self.records.values()
    }

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

    fn row(year: i32) -> SlrTableRow {
        SlrTableRow {
            year,
            delta_min_slr: 0.001,
            min_slr: 0.1,
            delta_mean_slr: 0.004,
            mean_slr: 0.2,
            delta_max_slr: 0.009,
            max_slr: 0.3,
        }
    }

    #[test]
    fn test_variant_selectors() {
        assert_eq!(SlrVariant::from_select(1).unwrap(), SlrVariant::Min);
        assert_eq!(SlrVariant::from_select(2).unwrap(), SlrVariant::Mean);
        assert_eq!(SlrVariant::from_select(3).unwrap(), SlrVariant::Max);
        assert_eq!(SlrVariant::from_select(4), Err(DataError::InvalidSlrSelect(4)));
        assert_eq!("2".parse::<SlrVariant>().unwrap(), SlrVariant::Mean);
        assert_eq!("MAX".parse::<SlrVariant>().unwrap(), SlrVariant::Max);
        assert!("median".parse::<SlrVariant>().is_err());
    }

    #[test]
    fn test_select_variant_columns() {
        let table = SlrTable::new(vec![row(2020), row(2021)]).unwrap();
        let mean = table.select(SlrVariant::Mean);
        assert_eq!(mean.variant(), Some(SlrVariant::Mean));
        assert_eq!(mean.len(), 2);
        let record = mean.require(2021).unwrap();
        assert_eq!(record.delta_slr, 0.004);
        assert_eq!(record.msl, 0.2);

        let max = table.select(SlrVariant::Max);
        assert_eq!(max.require(2020).unwrap().msl, 0.3);
        assert_eq!(max.require(2030), Err(DataError::MissingSlrYear(2030)));
    }

    #[test]
    fn test_duplicate_years_rejected() {
        assert_eq!(
            SlrTable::new(vec![row(2020), row(2020)]),
            Err(DataError::DuplicateSlrYear(2020))
        );
        assert_eq!(
            SlrScenario::from_records(Vec::new()),
            Err(DataError::EmptyDataset("SLR projections"))
        );
    }
}
