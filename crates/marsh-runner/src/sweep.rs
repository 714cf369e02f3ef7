//! Parallel execution of a plan of scenarios.
//!
//! Inputs are loaded once per (RCP, site) and shared read-only between the
//! worker threads. Results are returned in plan order.

use crate::scenario::{run_one, ScenarioId, ScenarioReport, ScenarioSpec};
use crate::{Result, RunnerError};
use marsh_data::{DataLoader, Rcp, ScenarioInputs};
use marsh_model::properties::{PropertyValue, ResolvedProperties};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{debug, info, warn};

/// A YAML sweep plan.
///
/// ```yaml
/// properties:
///   accretion/nourishment_frequency: 10
/// trajectory: false
/// scenarios:
///   - { rcp: rcp45, site: S15, slr: mean }
///   - { rcp: rcp85, site: S15, slr: max, set: { z_init: 1.0 } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SweepPlan {
    /// Properties shared by every scenario.
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyValue>,
    /// Include the elevation trajectory in each report.
    #[serde(default)]
    pub trajectory: bool,
    pub scenarios: Vec<ScenarioSpec>,
}

impl SweepPlan {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let plan: SweepPlan = serde_yaml::from_str(yaml)?;
        if plan.scenarios.is_empty() {
            return Err(RunnerError::InvalidPlan("no scenarios".to_string()));
        }
        Ok(plan)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        debug!("Loading sweep plan from {}", path.as_ref().display());
        Self::from_yaml_str(&content)
    }

    /// The distinct (RCP, site) pairs, in first-use order.
    pub fn input_keys(&self) -> Vec<(Rcp, String)> {
        let mut keys: Vec<(Rcp, String)> = Vec::new();
        for spec in &self.scenarios {
            let key = (spec.rcp, spec.site.clone());
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        keys
    }
}

/// A scenario that did not produce a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepFailure {
    /// Position of the scenario in the plan.
    pub index: usize,
    pub rcp: Rcp,
    pub site: String,
    pub error: String,
}

/// Results of a sweep.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SweepResults {
    pub reports: Vec<ScenarioReport>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<SweepFailure>,
}

impl SweepResults {
    pub fn scenario_ids(&self) -> impl Iterator<Item = &ScenarioId> {
        self.reports.iter().map(|r| &r.scenario)
    }
}

/// Load the inputs of every (RCP, site) pair named by the plan.
pub fn load_inputs(
    loader: &DataLoader,
    plan: &SweepPlan,
) -> Result<HashMap<(Rcp, String), ScenarioInputs>> {
    plan.input_keys()
        .into_iter()
        .map(|(rcp, site)| {
            let inputs = loader.load(rcp, &site)?;
            Ok(((rcp, site), inputs))
        })
        .collect()
}

/// Run every scenario of the plan on `jobs` threads (rayon's default when `None`).
///
/// A failing scenario is recorded in [`SweepResults::failures`] and does not
/// stop the others. Missing input files fail the whole sweep.
pub fn run_sweep(
    loader: &DataLoader,
    base: &ResolvedProperties,
    plan: &SweepPlan,
    jobs: Option<usize>,
) -> Result<SweepResults> {
    let mut base = base.clone();
    base.merge_values(&plan.properties)?;
    let inputs = load_inputs(loader, plan)?;

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(jobs) = jobs {
        builder = builder.num_threads(jobs);
    }
    let pool = builder.build()?;

    info!(
        scenarios = plan.scenarios.len(),
        inputs = inputs.len(),
        threads = pool.current_num_threads(),
        "Starting sweep"
    );

    let outcomes: Vec<Result<ScenarioReport>> = pool.install(|| {
        plan.scenarios
            .par_iter()
            .map(|spec| {
                let key = (spec.rcp, spec.site.clone());
                let scenario_inputs = inputs.get(&key).ok_or_else(|| {
                    RunnerError::InvalidPlan(format!("no inputs for {} {}", spec.rcp, spec.site))
                })?;
                run_one(scenario_inputs, &base, spec, plan.trajectory)
            })
            .collect()
    });

    let mut results = SweepResults::default();
    for (index, (spec, outcome)) in plan.scenarios.iter().zip(outcomes).enumerate() {
        match outcome {
            Ok(report) => results.reports.push(report),
            Err(e) => {
                warn!(index, rcp = %spec.rcp, site = %spec.site, error = %e, "Scenario skipped");
                results.failures.push(SweepFailure {
                    index,
                    rcp: spec.rcp,
                    site: spec.site.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    info!(
        completed = results.reports.len(),
        failed = results.failures.len(),
        "Sweep complete"
    );
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use marsh_common::SlrVariant;

    #[test]
    fn test_parse_plan() {
        let yaml = r#"
properties:
  accretion/nourishment_frequency: 10
scenarios:
  - { rcp: rcp45, site: S15, slr: mean }
  - { rcp: rcp85, site: S15, slr: max, set: { z_init: 1.0 } }
  - { rcp: rcp45, site: S15 }
"#;
        let plan = SweepPlan::from_yaml_str(yaml).unwrap();
        assert_eq!(plan.scenarios.len(), 3);
        assert!(!plan.trajectory);
        assert_eq!(plan.scenarios[1].slr, Some(SlrVariant::Max));
        assert_eq!(plan.scenarios[1].set.get("z_init"), Some(&PropertyValue::Float(1.0)));
        assert_eq!(plan.scenarios[2].slr, None);
        assert_eq!(
            plan.input_keys(),
            vec![(Rcp::Rcp45, "S15".to_string()), (Rcp::Rcp85, "S15".to_string())]
        );
    }

    #[test]
    fn test_empty_plan_rejected() {
        assert!(matches!(
            SweepPlan::from_yaml_str("scenarios: []"),
            Err(RunnerError::InvalidPlan(_))
        ));
        assert!(matches!(
            SweepPlan::from_yaml_str("scenarios: [{ rcp: rcp60, site: S1 }]"),
            Err(RunnerError::Yaml(_))
        ));
    }
}
