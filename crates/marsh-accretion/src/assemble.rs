//! Joining tide records with an SLR scenario.

use crate::AccretionError;
use marsh_common::{SlrScenario, SlrScenarioRecord, SlrTable, SlrVariant, TideDataset};
use tracing::debug;

/// Tide records forced with the SLR increment of their year.
///
/// Built by [`assemble`] or [`ForcedTideDataset::from_scenario`]; the caller's
/// tide dataset is left untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct ForcedTideDataset {
    tides: TideDataset,
    slr: SlrScenario,
}

impl ForcedTideDataset {
    /// Force `tides` with an already selected SLR series.
    ///
    /// Every tide year must have an SLR record; SLR years outside the tide
    /// range are ignored.
    pub fn from_scenario(tides: &TideDataset, slr: SlrScenario) -> Result<Self, AccretionError> {
        let forced = tides
            .records()
            .map(|record| {
                let forcing = slr.require(record.year())?;
                Ok(record.with_slr(forcing.delta_slr))
            })
            .collect::<Result<Vec<_>, AccretionError>>()?;

        debug!(
            years = tides.num_years(),
            records = forced.len(),
            variant = ?slr.variant(),
            "Assembled forced tide dataset"
        );

        Ok(Self {
            tides: TideDataset::new(forced)?,
            slr,
        })
    }

    /// The tide records carrying their year's SLR increment.
    pub fn tides(&self) -> &TideDataset {
        &self.tides
    }

    /// The SLR series used for forcing.
    pub fn slr_scenario(&self) -> &SlrScenario {
        &self.slr
    }

    /// SLR forcing of a year.
    pub fn slr(&self, year: i32) -> Result<&SlrScenarioRecord, AccretionError> {
        Ok(self.slr.require(year)?)
    }
}

/// Select `variant` from the SLR table and join it onto every tide record.
pub fn assemble(
    tides: &TideDataset,
    table: &SlrTable,
    variant: SlrVariant,
) -> Result<ForcedTideDataset, AccretionError> {
    ForcedTideDataset::from_scenario(tides, table.select(variant))
}

#[cfg(test)]
mod tests {
    use super::*;
    use marsh_common::{DataError, Season, SlrTableRow, TideRecord};

    fn tides() -> TideDataset {
        let mut records = Vec::new();
        for year in 2020..=2022 {
            for season in Season::ALL {
                records.push(TideRecord::new(year, season, vec![1.0, 1.2], vec![3, 1]).unwrap());
            }
        }
        TideDataset::new(records).unwrap()
    }

    fn table(years: std::ops::RangeInclusive<i32>) -> SlrTable {
        SlrTable::new(years.map(|year| {
            let k = f64::from(year - 2019);
            SlrTableRow {
                year,
                delta_min_slr: 0.001 * k,
                min_slr: 0.01 * k,
                delta_mean_slr: 0.002 * k,
                mean_slr: 0.02 * k,
                delta_max_slr: 0.003 * k,
                max_slr: 0.03 * k,
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_slr_broadcast_per_year() {
        let input = tides();
        let forced = assemble(&input, &table(2015..=2030), SlrVariant::Max).unwrap();

        for record in forced.tides().records() {
            let k = f64::from(record.year() - 2019);
            assert_eq!(record.slr(), 0.003 * k);
        }
        assert_eq!(forced.slr(2021).unwrap().msl, 0.03 * 2.0);
        assert_eq!(forced.slr_scenario().variant(), Some(SlrVariant::Max));

        // The input is not modified.
        assert!(input.records().all(|r| r.slr() == 0.0));
    }

    #[test]
    fn test_missing_slr_year() {
        let result = assemble(&tides(), &table(2020..=2021), SlrVariant::Mean);
        assert_eq!(result, Err(AccretionError::Data(DataError::MissingSlrYear(2022))));
    }
}
