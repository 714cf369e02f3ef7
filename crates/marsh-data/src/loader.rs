//! Locating and parsing the tide and SLR input files.

use crate::table::DelimitedTable;
use crate::{LoadError, Rcp, Result};
use marsh_common::{Season, SlrTable, SlrTableRow, TideDataset, TideRecord};
use marsh_metrics::metric_defs;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Directory of the tidal projection files under the data root.
pub const TIDES_DIR: &str = "tidal_projections";
/// Directory of the regional SLR files under the data root.
pub const SLR_DIR: &str = "regional_slr_single_rcp";

/// The two input tables of one (RCP, site) combination.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioInputs {
    pub tides: TideDataset,
    pub slr: SlrTable,
}

/// Loads input tables from a data root directory.
///
/// Layout:
///
/// ```text
/// <root>/tidal_projections/tides_{rcp}_{site}.tsv
/// <root>/regional_slr_single_rcp/slr{NN}.csv
/// ```
#[derive(Debug, Clone)]
pub struct DataLoader {
    root: PathBuf,
}

impl DataLoader {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the tide projection table of a site.
    pub fn tide_path(&self, rcp: Rcp, site: &str) -> PathBuf {
        self.root
            .join(TIDES_DIR)
            .join(format!("tides_{}_{}.tsv", rcp.as_str(), site))
    }

    /// Path of the SLR projection table of an RCP.
    pub fn slr_path(&self, rcp: Rcp) -> PathBuf {
        self.root.join(SLR_DIR).join(format!("slr{}.csv", rcp.suffix()))
    }

    /// Load both tables of a scenario.
    pub fn load(&self, rcp: Rcp, site: &str) -> Result<ScenarioInputs> {
        let tides = self.load_tides(rcp, site)?;
        let slr = self.load_slr(rcp)?;
        info!(
            %rcp,
            site,
            years = tides.num_years(),
            slr_years = slr.len(),
            "Loaded scenario inputs"
        );
        Ok(ScenarioInputs { tides, slr })
    }

    pub fn load_tides(&self, rcp: Rcp, site: &str) -> Result<TideDataset> {
        let path = self.tide_path(rcp, site);
        let content = read(&path)?;
        parse_tides(&path, &content)
    }

    pub fn load_slr(&self, rcp: Rcp) -> Result<SlrTable> {
        let path = self.slr_path(rcp);
        let content = read(&path)?;
        parse_slr(&path, &content)
    }
}

fn read(path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    metrics::counter!(metric_defs::DATA_FILES_LOADED.name).increment(1);
    Ok(content)
}

/// Parse a tab-separated tide table.
///
/// Each row is one event group; rows of the same (year, season) are grouped
/// into a [`TideRecord`] in file order. A season without rows in a year that
/// appears in the file gets an empty record: no tide reached it.
pub fn parse_tides(path: &Path, content: &str) -> Result<TideDataset> {
    let table = DelimitedTable::parse(path, content, '\t')?;
    let year_col = table.column("year")?;
    let season_col = table.column("season")?;
    let height_col = table.column("high_water_height")?;
    let count_col = table.column("num_tides")?;

    let mut records: BTreeMap<(i32, Season), TideRecord> = BTreeMap::new();
    for row in table.rows() {
        let year = row.parse_year(year_col)?;
        let season: Season = row
            .field(season_col)?
            .parse()
            .map_err(|e: marsh_common::DataError| row.error(e.to_string()))?;
        let height: f64 = row.parse(height_col, "high_water_height")?;
        let count = row.parse_count(count_col, "num_tides")?;

        records
            .entry((year, season))
            .or_insert_with(|| TideRecord::empty(year, season))
            .push_event(height, count);
    }

    let years: BTreeSet<i32> = records.keys().map(|&(year, _)| year).collect();
    for year in years {
        for season in Season::ALL {
            records
                .entry((year, season))
                .or_insert_with(|| TideRecord::empty(year, season));
        }
    }

    metrics::counter!(metric_defs::DATA_ROWS_PARSED.name).increment(table.len() as u64);
    debug!(path = %path.display(), rows = table.len(), records = records.len(), "Parsed tide table");
    Ok(TideDataset::new(records.into_values())?)
}

/// Parse a comma-separated SLR projection table.
pub fn parse_slr(path: &Path, content: &str) -> Result<SlrTable> {
    let table = DelimitedTable::parse(path, content, ',')?;
    let year_col = table.column("year")?;
    let cols = [
        table.column("delta_min_slr")?,
        table.column("min_slr")?,
        table.column("delta_mean_slr")?,
        table.column("mean_slr")?,
        table.column("delta_max_slr")?,
        table.column("max_slr")?,
    ];

    let rows = table
        .rows()
        .map(|row| {
            let value = |i: usize, name: &str| row.parse::<f64>(cols[i], name);
            Ok(SlrTableRow {
                year: row.parse_year(year_col)?,
                delta_min_slr: value(0, "delta_min_slr")?,
                min_slr: value(1, "min_slr")?,
                delta_mean_slr: value(2, "delta_mean_slr")?,
                mean_slr: value(3, "mean_slr")?,
                delta_max_slr: value(4, "delta_max_slr")?,
                max_slr: value(5, "max_slr")?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    metrics::counter!(metric_defs::DATA_ROWS_PARSED.name).increment(rows.len() as u64);
    debug!(path = %path.display(), rows = rows.len(), "Parsed SLR table");
    Ok(SlrTable::new(rows)?)
}
