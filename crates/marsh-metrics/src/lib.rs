//! Metrics infrastructure for the X-Marsh simulator.
//!
//! This crate declares every metric the simulator emits as a structured
//! [`Metric`] constant and re-exports the `metrics` crate for convenience.
//! Without an installed recorder all metric calls are no-ops.
//!
//! # Example
//!
//! ```rust
//! use marsh_metrics::{metric_defs, ScenarioLabels};
//!
//! let labels = ScenarioLabels::new("rcp45", "S15", "mean");
//! metrics::counter!(metric_defs::SCENARIO_RUNS.name, &labels.with(&[("outcome", "stable".to_string())]))
//!     .increment(1);
//! ```

pub use metrics;

use metrics::{describe_counter, describe_gauge, describe_histogram, Unit};

/// The kind of metric (counter, gauge, or histogram).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    /// A monotonically increasing counter.
    Counter,
    /// A gauge that can go up and down.
    Gauge,
    /// A histogram for recording distributions.
    Histogram,
}

impl MetricKind {
    /// Returns the kind as a lowercase string.
    pub const fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
            MetricKind::Histogram => "histogram",
        }
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A metric declaration with its metadata.
///
/// ```rust
/// use marsh_metrics::{Metric, MetricKind};
/// use metrics::Unit;
///
/// const YEARS: Metric = Metric::counter("xmarsh.sim.years")
///     .with_description("Simulated years")
///     .with_unit(Unit::Count);
///
/// assert_eq!(YEARS.name, "xmarsh.sim.years");
/// assert_eq!(YEARS.kind, MetricKind::Counter);
/// ```
#[derive(Debug, Clone)]
pub struct Metric {
    /// The metric name (e.g., "xmarsh.sim.years").
    pub name: &'static str,
    /// The kind of metric (counter, gauge, histogram).
    pub kind: MetricKind,
    /// Human-readable description of the metric.
    pub description: &'static str,
    /// The unit of measurement (optional).
    pub unit: Option<Unit>,
    /// Expected label keys for this metric.
    pub labels: &'static [&'static str],
}

impl Metric {
    const fn with_kind(name: &'static str, kind: MetricKind) -> Self {
        Self {
            name,
            kind,
            description: "",
            unit: None,
            labels: &[],
        }
    }

    /// Creates a new counter metric with the given name.
    pub const fn counter(name: &'static str) -> Self {
        Self::with_kind(name, MetricKind::Counter)
    }

    /// Creates a new gauge metric with the given name.
    pub const fn gauge(name: &'static str) -> Self {
        Self::with_kind(name, MetricKind::Gauge)
    }

    /// Creates a new histogram metric with the given name.
    pub const fn histogram(name: &'static str) -> Self {
        Self::with_kind(name, MetricKind::Histogram)
    }

    pub const fn with_description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    pub const fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = Some(unit);
        self
    }

    pub const fn with_labels(mut self, labels: &'static [&'static str]) -> Self {
        self.labels = labels;
        self
    }

    /// Registers this metric's description with the metrics recorder.
    pub fn describe(&self) {
        match (self.kind, self.unit) {
            (MetricKind::Counter, Some(unit)) => {
                describe_counter!(self.name, unit, self.description);
            }
            (MetricKind::Counter, None) => {
                describe_counter!(self.name, self.description);
            }
            (MetricKind::Gauge, Some(unit)) => {
                describe_gauge!(self.name, unit, self.description);
            }
            (MetricKind::Gauge, None) => {
                describe_gauge!(self.name, self.description);
            }
            (MetricKind::Histogram, Some(unit)) => {
                describe_histogram!(self.name, unit, self.description);
            }
            (MetricKind::Histogram, None) => {
                describe_histogram!(self.name, self.description);
            }
        }
    }
}

/// All metric definitions for the simulator.
pub mod metric_defs {
    use super::{Metric, Unit};

    /// Labels identifying a scenario run.
    pub const SCENARIO_LABELS: &[&str] = &["rcp", "site", "slr"];

    // ========================================================================
    // Simulation loop
    // ========================================================================

    /// Years advanced by the simulation driver.
    pub const SIM_YEARS: Metric = Metric::counter("xmarsh.sim.years")
        .with_description("Years advanced by the annual simulation driver")
        .with_unit(Unit::Count);

    /// Nourishment years applied.
    pub const SIM_NOURISHMENT_EVENTS: Metric = Metric::counter("xmarsh.sim.nourishment_events")
        .with_description("Years in which a sediment nourishment boost was applied")
        .with_unit(Unit::Count);

    /// Tidal events that flooded the marsh surface.
    pub const SIM_INUNDATION_EVENTS: Metric = Metric::counter("xmarsh.sim.inundation_events")
        .with_description("Tidal events whose high water plus sea-level rise exceeded the marsh surface")
        .with_unit(Unit::Count);

    /// Distribution of annual elevation change.
    pub const SIM_ANNUAL_DZ_DT: Metric = Metric::histogram("xmarsh.sim.annual_dz_dt_mm")
        .with_description("Net annual elevation change in millimetres");

    /// Final elevation of the last run.
    pub const SIM_FINAL_ELEVATION: Metric = Metric::gauge("xmarsh.sim.final_elevation_m")
        .with_description("Marsh surface elevation at the end of the last simulation");

    // ========================================================================
    // Critical state estimation
    // ========================================================================

    /// Scenario runs by estimator outcome.
    pub const SCENARIO_RUNS: Metric = Metric::counter("xmarsh.scenario.runs")
        .with_description("Scenario runs completed, by outcome")
        .with_unit(Unit::Count)
        .with_labels(&["rcp", "site", "slr", "outcome"]);

    /// Estimated years to chronic submergence.
    pub const SCENARIO_EST_TIME: Metric = Metric::histogram("xmarsh.scenario.est_time_years")
        .with_description("Estimated years until chronic submergence")
        .with_labels(&["rcp", "site", "slr"]);

    /// Wall-clock time of one scenario run.
    pub const SCENARIO_DURATION: Metric = Metric::histogram("xmarsh.scenario.duration_us")
        .with_description("Wall-clock duration of a scenario run in microseconds")
        .with_unit(Unit::Microseconds)
        .with_labels(&["rcp", "site", "slr"]);

    /// Scenario runs that failed.
    pub const SCENARIO_FAILURES: Metric = Metric::counter("xmarsh.scenario.failures")
        .with_description("Scenario runs that ended with an error")
        .with_unit(Unit::Count)
        .with_labels(&["rcp", "site", "slr"]);

    // ========================================================================
    // Data loading
    // ========================================================================

    /// Input files read.
    pub const DATA_FILES_LOADED: Metric = Metric::counter("xmarsh.data.files_loaded")
        .with_description("Tide and SLR input files read")
        .with_unit(Unit::Count);

    /// Input rows parsed.
    pub const DATA_ROWS_PARSED: Metric = Metric::counter("xmarsh.data.rows_parsed")
        .with_description("Data rows parsed from input files")
        .with_unit(Unit::Count);

    /// Every metric, for registration.
    pub const ALL: &[Metric] = &[
        SIM_YEARS,
        SIM_NOURISHMENT_EVENTS,
        SIM_INUNDATION_EVENTS,
        SIM_ANNUAL_DZ_DT,
        SIM_FINAL_ELEVATION,
        SCENARIO_RUNS,
        SCENARIO_EST_TIME,
        SCENARIO_DURATION,
        SCENARIO_FAILURES,
        DATA_FILES_LOADED,
        DATA_ROWS_PARSED,
    ];
}

/// Labels identifying one scenario (RCP, site, SLR variant).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioLabels {
    pub rcp: String,
    pub site: String,
    pub slr: String,
}

impl ScenarioLabels {
    pub fn new(rcp: impl Into<String>, site: impl Into<String>, slr: impl Into<String>) -> Self {
        Self {
            rcp: rcp.into(),
            site: site.into(),
            slr: slr.into(),
        }
    }

    /// Returns the labels as key/value pairs for the `metrics` macros.
    pub fn to_labels(&self) -> Vec<(&'static str, String)> {
        vec![
            ("rcp", self.rcp.clone()),
            ("site", self.site.clone()),
            ("slr", self.slr.clone()),
        ]
    }

    /// Returns labels with additional key-value pairs.
    pub fn with(&self, extra: &[(&'static str, String)]) -> Vec<(&'static str, String)> {
        let mut labels = self.to_labels();
        labels.extend_from_slice(extra);
        labels
    }
}

/// Describes all metrics used in the simulator.
///
/// Call once at startup, after installing a recorder.
pub fn describe_metrics() {
    for metric in metric_defs::ALL {
        metric.describe();
    }
}

/// Installs a Prometheus recorder serving `/metrics` on the given address.
#[cfg(feature = "prometheus")]
pub fn install_prometheus_exporter(
    addr: std::net::SocketAddr,
) -> Result<(), metrics_exporter_prometheus::BuildError> {
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;
    describe_metrics();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_labels() {
        let labels = ScenarioLabels::new("rcp45", "S15", "mean");
        let label_vec = labels.to_labels();
        assert_eq!(label_vec.len(), 3);
        assert!(label_vec.contains(&("rcp", "rcp45".to_string())));
        assert!(label_vec.contains(&("site", "S15".to_string())));
        assert!(label_vec.contains(&("slr", "mean".to_string())));
    }

    #[test]
    fn test_with_extra_labels() {
        let labels = ScenarioLabels::new("rcp85", "S33", "max");
        let extended = labels.with(&[("outcome", "critical".to_string())]);
        assert_eq!(extended.len(), 4);
        assert!(extended.contains(&("outcome", "critical".to_string())));
    }

    #[test]
    fn test_metric_definitions() {
        assert_eq!(metric_defs::SIM_YEARS.name, "xmarsh.sim.years");
        assert_eq!(metric_defs::SIM_YEARS.kind, MetricKind::Counter);
        assert_eq!(metric_defs::SIM_FINAL_ELEVATION.kind, MetricKind::Gauge);
        assert_eq!(metric_defs::SCENARIO_DURATION.kind, MetricKind::Histogram);
        assert_eq!(metric_defs::SCENARIO_DURATION.unit, Some(Unit::Microseconds));
        assert_eq!(metric_defs::SIM_INUNDATION_EVENTS.kind, MetricKind::Counter);
        assert_eq!(metric_defs::SIM_INUNDATION_EVENTS.unit, Some(Unit::Count));
        assert_eq!(metric_defs::SIM_ANNUAL_DZ_DT.unit, None);
    }

    #[test]
    fn test_labels_accepted_by_macros() {
        let labels = ScenarioLabels::new("rcp26", "S07", "min");
        metrics::counter!(
            metric_defs::SCENARIO_RUNS.name,
            &labels.with(&[("outcome", "declining".to_string())])
        )
        .increment(1);
        metrics::histogram!(metric_defs::SCENARIO_EST_TIME.name, &labels.to_labels()).record(12.5);
    }

    #[test]
    fn test_all_metrics_unique() {
        let mut names: Vec<&str> = metric_defs::ALL.iter().map(|m| m.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), metric_defs::ALL.len());
    }

    #[test]
    fn test_scenario_labels_declared() {
        for key in metric_defs::SCENARIO_LABELS {
            assert!(metric_defs::SCENARIO_RUNS.labels.contains(key));
        }
    }

    #[test]
    fn test_describe_without_recorder() {
        // No recorder installed: must be a no-op.
        describe_metrics();
    }
}
