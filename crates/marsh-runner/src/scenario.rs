//! Running one scenario and reporting its results.

use crate::Result;
use chrono::{DateTime, Utc};
use marsh_accretion::{run_scenario, ElevationTrajectory, ScenarioConfig, ScenarioMetrics};
use marsh_common::SlrVariant;
use marsh_data::{Rcp, ScenarioInputs};
use marsh_metrics::{metric_defs, ScenarioLabels};
use marsh_model::properties::{PropertyValue, ResolvedProperties, SCENARIO_SLR_SELECT};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{info, warn};

/// A scenario as written in a sweep plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSpec {
    pub rcp: Rcp,
    pub site: String,
    /// SLR variant; falls back to `scenario/slr_select`.
    #[serde(default)]
    pub slr: Option<SlrVariant>,
    /// Property overrides applied on top of the base properties.
    #[serde(default)]
    pub set: BTreeMap<String, PropertyValue>,
}

impl ScenarioSpec {
    pub fn new(rcp: Rcp, site: impl Into<String>) -> Self {
        Self {
            rcp,
            site: site.into(),
            slr: None,
            set: BTreeMap::new(),
        }
    }

    pub fn with_slr(mut self, slr: SlrVariant) -> Self {
        self.slr = Some(slr);
        self
    }

    /// Base properties overlaid with this scenario's overrides and variant.
    pub fn resolve(&self, base: &ResolvedProperties) -> Result<ResolvedProperties> {
        let mut props = base.clone();
        props.merge_values(&self.set)?;
        if let Some(variant) = self.slr {
            props.set_property(&SCENARIO_SLR_SELECT, variant.select())?;
        }
        Ok(props)
    }
}

/// Identity of a completed scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioId {
    pub rcp: Rcp,
    pub site: String,
    pub slr: SlrVariant,
}

impl ScenarioId {
    pub fn labels(&self) -> ScenarioLabels {
        ScenarioLabels::new(self.rcp.as_str(), self.site.as_str(), self.slr.as_str())
    }
}

impl std::fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.rcp, self.site, self.slr)
    }
}

/// Serialized result of one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub scenario: ScenarioId,
    pub metrics: ScenarioMetrics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trajectory: Option<ElevationTrajectory>,
    pub generated_at: DateTime<Utc>,
}

/// Run one scenario on already loaded inputs.
pub fn run_one(
    inputs: &ScenarioInputs,
    base: &ResolvedProperties,
    spec: &ScenarioSpec,
    include_trajectory: bool,
) -> Result<ScenarioReport> {
    let props = spec.resolve(base)?;
    let config = ScenarioConfig::from_properties(&props)?;
    let scenario = ScenarioId {
        rcp: spec.rcp,
        site: spec.site.clone(),
        slr: config.variant(),
    };
    let labels = scenario.labels();

    let started = Instant::now();
    let outcome = match run_scenario(&inputs.tides, &inputs.slr, &config) {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!(%scenario, error = %e, "Scenario failed");
            metrics::counter!(metric_defs::SCENARIO_FAILURES.name, &labels.to_labels()).increment(1);
            return Err(e.into());
        }
    };
    let elapsed_us = started.elapsed().as_secs_f64() * 1e6;

    let m = outcome.metrics;
    metrics::counter!(
        metric_defs::SCENARIO_RUNS.name,
        &labels.with(&[("outcome", m.outcome.as_str().to_string())])
    )
    .increment(1);
    metrics::histogram!(metric_defs::SCENARIO_EST_TIME.name, &labels.to_labels()).record(m.est_time);
    metrics::histogram!(metric_defs::SCENARIO_DURATION.name, &labels.to_labels()).record(elapsed_us);

    info!(
        %scenario,
        crit_year = m.crit_year,
        growth_total = m.growth_total,
        est_time = m.est_time,
        est_crit_year = m.est_crit_year,
        outcome = %m.outcome,
        "Scenario complete"
    );

    Ok(ScenarioReport {
        scenario,
        metrics: m,
        trajectory: include_trajectory.then_some(outcome.trajectory),
        generated_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RunnerError;
    use marsh_accretion::AccretionError;
    use marsh_common::{Season, SlrTable, SlrTableRow, TideDataset, TideRecord};
    use marsh_model::properties::ACCRETION_Z_INIT;

    fn inputs() -> ScenarioInputs {
        let records = (2020..=2060).flat_map(|year| {
            Season::ALL.map(|season| TideRecord::new(year, season, vec![1.3], vec![20]).unwrap())
        });
        let slr = SlrTable::new((2020..=2060).map(|year| {
            let t = f64::from(year - 2020);
            SlrTableRow {
                year,
                delta_min_slr: 0.002,
                min_slr: 0.002 * t,
                delta_mean_slr: 0.005,
                mean_slr: 0.005 * t,
                delta_max_slr: 0.015,
                max_slr: 0.015 * t,
            }
        }))
        .unwrap();
        ScenarioInputs {
            tides: TideDataset::new(records).unwrap(),
            slr,
        }
    }

    #[test]
    fn test_spec_resolution() {
        let mut spec = ScenarioSpec::new(Rcp::Rcp45, "S15").with_slr(SlrVariant::Max);
        spec.set.insert("z_init".to_string(), PropertyValue::Float(0.9));
        let props = spec.resolve(&ResolvedProperties::new()).unwrap();
        assert_eq!(props.get(&ACCRETION_Z_INIT), 0.9);
        assert_eq!(props.get(&SCENARIO_SLR_SELECT), 3);
    }

    #[test]
    fn test_run_one() {
        let spec = ScenarioSpec::new(Rcp::Rcp85, "S33").with_slr(SlrVariant::Min);
        let report = run_one(&inputs(), &ResolvedProperties::new(), &spec, true).unwrap();
        assert_eq!(report.scenario.slr, SlrVariant::Min);
        assert_eq!(report.scenario.to_string(), "rcp85/S33/min");
        assert_eq!(report.trajectory.as_ref().map(|t| t.len()), Some(41));

        let report = run_one(&inputs(), &ResolvedProperties::new(), &spec, false).unwrap();
        assert!(report.trajectory.is_none());
    }

    #[test]
    fn test_run_one_rejects_bad_override() {
        let mut spec = ScenarioSpec::new(Rcp::Rcp45, "S15");
        spec.set.insert("accretion/rho_deposit".to_string(), PropertyValue::Float(0.0));
        let result = run_one(&inputs(), &ResolvedProperties::new(), &spec, false);
        assert!(matches!(
            result,
            Err(RunnerError::Accretion(AccretionError::InvalidParameter { name: "rho_deposit", .. }))
        ));
    }
}
