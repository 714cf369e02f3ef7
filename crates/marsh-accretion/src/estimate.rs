//! Critical state detection and time-to-submergence extrapolation.
//!
//! The estimator joins an elevation trajectory with the SLR series and
//! normalizes the marsh height above mean sea level by its first-year value
//! (`norm_diff`). The critical year is the first year with
//! `elevation <= msl`. The time to chronic submergence is extrapolated from
//! the linear trend of `norm_diff` over a fixed window:
//!
//! - critical state reached: the window ends `window_offset - window_len`
//!   samples before the last non-critical year; without enough non-critical
//!   years a fallback slope and a reference-year estimate are used
//! - never reached: the window covers the last `window_len` years; a
//!   non-negative trend is classified as stable

use crate::params::EstimatorConstants;
use crate::simulate::ElevationTrajectory;
use crate::trend::yearly_slope;
use crate::AccretionError;
use marsh_common::SlrScenario;
use tracing::{debug, warn};

/// One year of the merged trajectory and SLR table.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccretionScenarioRow {
    pub year: i32,
    pub elevation: f64,
    pub dz_dt: f64,
    /// SLR increment of the year.
    pub dslr_dt: f64,
    /// Mean sea level of the year.
    pub msl: f64,
    /// `(elevation - msl)` relative to its first-year value.
    pub norm_diff: f64,
}

impl AccretionScenarioRow {
    pub fn is_critical(&self) -> bool {
        self.elevation <= self.msl
    }
}

/// The merged table, ordered by year.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AccretionScenarioResult {
    rows: Vec<AccretionScenarioRow>,
}

impl AccretionScenarioResult {
    pub fn rows(&self) -> &[AccretionScenarioRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of annual elevation changes.
    pub fn growth_total(&self) -> f64 {
        self.rows.iter().map(|r| r.dz_dt).sum()
    }

    /// First year with the marsh at or below mean sea level.
    pub fn first_critical_year(&self) -> Option<i32> {
        self.rows.iter().find(|r| r.is_critical()).map(|r| r.year)
    }

    /// Rows above mean sea level, in order.
    pub fn not_critical(&self) -> Vec<AccretionScenarioRow> {
        self.rows.iter().filter(|r| !r.is_critical()).copied().collect()
    }
}

/// Which estimation path produced the metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EstimateOutcome {
    /// Critical state reached, trend fitted on the offset window.
    Critical,
    /// Critical state reached with too few non-critical years to fit.
    CriticalNoWindow,
    /// Never critical and the trend is not falling.
    Stable,
    /// Never critical but the trend is falling.
    Declining,
}

impl EstimateOutcome {
    pub const fn as_str(&self) -> &'static str {
        match self {
            EstimateOutcome::Critical => "critical",
            EstimateOutcome::CriticalNoWindow => "critical_no_window",
            EstimateOutcome::Stable => "stable",
            EstimateOutcome::Declining => "declining",
        }
    }
}

impl std::fmt::Display for EstimateOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Headline results of one scenario.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioMetrics {
    /// First critical year, or the horizon sentinel year.
    pub crit_year: i32,
    /// Sum of annual elevation changes (m).
    pub growth_total: f64,
    /// Slope of `norm_diff` against year over the fitting window.
    pub slope_norm_10: f64,
    /// Estimated years until chronic submergence.
    pub est_time: f64,
    /// Estimated calendar year of chronic submergence.
    pub est_crit_year: f64,
    pub outcome: EstimateOutcome,
}

/// Turns a trajectory into [`ScenarioMetrics`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CriticalStateEstimator {
    constants: EstimatorConstants,
}

impl CriticalStateEstimator {
    pub fn new(constants: EstimatorConstants) -> Result<Self, AccretionError> {
        constants.validate()?;
        Ok(Self { constants })
    }

    pub fn constants(&self) -> &EstimatorConstants {
        &self.constants
    }

    /// Join the trajectory with the SLR series on year and compute `norm_diff`.
    pub fn merge(
        &self,
        trajectory: &ElevationTrajectory,
        slr: &SlrScenario,
    ) -> Result<AccretionScenarioResult, AccretionError> {
        let first = trajectory.first().ok_or(AccretionError::EmptyScenarioData)?;
        let first_msl = slr.require(first.year)?.msl;
        let reference = first.elevation - first_msl;
        if reference == 0.0 {
            return Err(AccretionError::DegenerateNormalization { year: first.year });
        }

        let rows = trajectory
            .points()
            .iter()
            .map(|point| {
                let forcing = slr.require(point.year)?;
                Ok(AccretionScenarioRow {
                    year: point.year,
                    elevation: point.elevation,
                    dz_dt: point.dz_dt,
                    dslr_dt: forcing.delta_slr,
                    msl: forcing.msl,
                    norm_diff: (point.elevation - forcing.msl) / reference,
                })
            })
            .collect::<Result<Vec<_>, AccretionError>>()?;

        Ok(AccretionScenarioResult { rows })
    }

    /// Compute the scenario metrics of a merged table.
    pub fn estimate(&self, table: &AccretionScenarioResult) -> Result<ScenarioMetrics, AccretionError> {
        if table.is_empty() {
            return Err(AccretionError::EmptyScenarioData);
        }
        let growth_total = table.growth_total();
        let not_crit = table.not_critical();

        let metrics = match table.first_critical_year() {
            Some(crit_year) => self.estimate_critical(crit_year, growth_total, &not_crit)?,
            None => self.estimate_not_critical(growth_total, &not_crit)?,
        };

        debug!(
            crit_year = metrics.crit_year,
            est_time = metrics.est_time,
            est_crit_year = metrics.est_crit_year,
            slope = metrics.slope_norm_10,
            outcome = %metrics.outcome,
            "Estimated critical state"
        );
        Ok(metrics)
    }

    fn estimate_critical(
        &self,
        crit_year: i32,
        growth_total: f64,
        not_crit: &[AccretionScenarioRow],
    ) -> Result<ScenarioMetrics, AccretionError> {
        let c = &self.constants;

        if not_crit.len() < c.window_offset.saturating_add(c.window_len) {
            let est_time = (i64::from(crit_year) - i64::from(c.fallback_reference_year)) as f64;
            warn!(
                crit_year,
                not_critical_years = not_crit.len(),
                est_time,
                "No fitting window before the critical year, using fallback estimate"
            );
            return Ok(ScenarioMetrics {
                crit_year,
                growth_total,
                slope_norm_10: c.fallback_slope,
                est_time,
                est_crit_year: f64::from(crit_year),
                outcome: EstimateOutcome::CriticalNoWindow,
            });
        }

        let start = not_crit.len() - c.window_offset;
        let window = &not_crit[start..start + c.window_len];
        let slope = fit(window)?;
        let anchor = &not_crit[start + c.window_len];
        if slope == 0.0 {
            return Err(AccretionError::ZeroSlope {
                year: window[window.len() - 1].year,
            });
        }

        Ok(ScenarioMetrics {
            crit_year,
            growth_total,
            slope_norm_10: slope,
            est_time: (anchor.norm_diff / slope).abs(),
            est_crit_year: f64::from(crit_year),
            outcome: EstimateOutcome::Critical,
        })
    }

    fn estimate_not_critical(
        &self,
        growth_total: f64,
        not_crit: &[AccretionScenarioRow],
    ) -> Result<ScenarioMetrics, AccretionError> {
        let c = &self.constants;
        let crit_year = c.horizon_sentinel_year;
        let last = not_crit.last().ok_or(AccretionError::EmptyScenarioData)?;
        let window = &not_crit[not_crit.len().saturating_sub(c.window_len)..];
        let slope = fit(window)?;

        let (est_time, outcome) = if slope >= 0.0 {
            warn!(slope, "Trend keeps pace with sea level, classified stable");
            (c.stable_horizon_years, EstimateOutcome::Stable)
        } else {
            ((last.norm_diff / slope).abs(), EstimateOutcome::Declining)
        };

        Ok(ScenarioMetrics {
            crit_year,
            growth_total,
            slope_norm_10: slope,
            est_time,
            est_crit_year: f64::from(crit_year) + est_time,
            outcome,
        })
    }
}

fn fit(window: &[AccretionScenarioRow]) -> Result<f64, AccretionError> {
    let years: Vec<i32> = window.iter().map(|r| r.year).collect();
    let norm: Vec<f64> = window.iter().map(|r| r.norm_diff).collect();
    Ok(yearly_slope(&years, &norm)?)
}
