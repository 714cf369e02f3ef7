//! End-to-end tests of the `xmarsh` binary and the sweep runner.
//!
//! Input tables are written to a scratch data root; the binary is run as a
//! subprocess so that each run gets its own logging and metrics setup.

use marsh_data::{DataLoader, SLR_DIR, TIDES_DIR};
use marsh_model::properties::ResolvedProperties;
use marsh_runner::{run_sweep, SweepPlan};
use std::path::{Path, PathBuf};
use std::process::Command;

// ============================================================================
// Helper Functions
// ============================================================================

fn scratch_root(name: &str) -> PathBuf {
    let root = std::env::temp_dir().join(format!("xmarsh-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&root);
    std::fs::create_dir_all(root.join(TIDES_DIR)).unwrap();
    std::fs::create_dir_all(root.join(SLR_DIR)).unwrap();
    root
}

/// Writes tides for `site` under rcp45 and rcp85, plus both SLR tables.
fn write_site(root: &Path, site: &str) {
    for rcp in ["rcp45", "rcp85"] {
        let mut tides = String::from("year\tseason\thigh_water_height\tnum_tides\n");
        for year in 2020..=2100 {
            for season in ["spring", "summer", "autumn", "winter"] {
                tides.push_str(&format!("{}\t{}\t1.35\t25\n", year, season));
                tides.push_str(&format!("{}\t{}\t1.6\t3\n", year, season));
            }
        }
        std::fs::write(root.join(TIDES_DIR).join(format!("tides_{}_{}.tsv", rcp, site)), tides).unwrap();
    }

    for (suffix, scale) in [("45", 1.0), ("85", 2.0)] {
        let mut slr = String::from("year,delta_min_slr,min_slr,delta_mean_slr,mean_slr,delta_max_slr,max_slr\n");
        for year in 2020..=2100 {
            let t = f64::from(year - 2020);
            let rates = [0.003 * scale, 0.006 * scale, 0.011 * scale];
            slr.push_str(&format!(
                "{},{},{},{},{},{},{}\n",
                year,
                rates[0],
                rates[0] * t,
                rates[1],
                rates[1] * t,
                rates[2],
                rates[2] * t
            ));
        }
        std::fs::write(root.join(SLR_DIR).join(format!("slr{}.csv", suffix)), slr).unwrap();
    }
}

fn xmarsh(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_xmarsh"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to run xmarsh")
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn test_run_json_report() {
    let root = scratch_root("run");
    write_site(&root, "S15");

    let output = xmarsh(&[
        "run",
        "--data-dir",
        root.to_str().unwrap(),
        "--rcp",
        "rcp45",
        "--site",
        "S15",
        "--slr",
        "3",
        "--trajectory",
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["scenario"]["rcp"], "rcp45");
    assert_eq!(report["scenario"]["site"], "S15");
    assert_eq!(report["scenario"]["slr"], "max");
    assert_eq!(report["trajectory"].as_array().unwrap().len(), 81);
    assert!(report["metrics"]["crit_year"].as_i64().is_some());
    assert!(report["generated_at"].as_str().is_some());

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn test_run_missing_site_fails() {
    let root = scratch_root("missing");
    write_site(&root, "S15");

    let output = xmarsh(&[
        "run",
        "--data-dir",
        root.to_str().unwrap(),
        "--rcp",
        "rcp45",
        "--site",
        "S99",
    ]);
    assert!(!output.status.success());

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn test_params_lists_properties() {
    let output = xmarsh(&["params", "--set", "accretion/fd=0.4"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.lines().any(|l| l.starts_with("accretion/fd") && l.contains("0.4*")));
    assert!(stdout.contains("season/fd_scale_winter"));

    let output = xmarsh(&["params", "--set", "sediment/grain_size=0.02"]);
    assert!(!output.status.success());
}

#[test]
fn test_sweep_keeps_plan_order() {
    let root = scratch_root("sweep");
    write_site(&root, "S15");
    write_site(&root, "S33");

    let plan = SweepPlan::from_yaml_str(
        r#"
properties:
  accretion/nourishment_frequency: 10
scenarios:
  - { rcp: rcp85, site: S33, slr: max }
  - { rcp: rcp45, site: S15, slr: min }
  - { rcp: rcp45, site: S15, slr: mean, set: { accretion/rho_deposit: 0.0 } }
  - { rcp: rcp45, site: S33 }
  - { rcp: rcp85, site: S15, slr: mean }
"#,
    )
    .unwrap();

    let results = run_sweep(&DataLoader::new(&root), &ResolvedProperties::new(), &plan, Some(3)).unwrap();

    let ids: Vec<String> = results.scenario_ids().map(|id| id.to_string()).collect();
    assert_eq!(
        ids,
        vec!["rcp85/S33/max", "rcp45/S15/min", "rcp45/S33/mean", "rcp85/S15/mean"]
    );
    assert_eq!(results.failures.len(), 1);
    assert_eq!(results.failures[0].index, 2);

    // Same scenario, same metrics regardless of thread count.
    let serial = run_sweep(&DataLoader::new(&root), &ResolvedProperties::new(), &plan, Some(1)).unwrap();
    for (a, b) in results.reports.iter().zip(&serial.reports) {
        assert_eq!(a.metrics, b.metrics);
    }

    let _ = std::fs::remove_dir_all(&root);
}
