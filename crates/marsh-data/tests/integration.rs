//! Integration tests for marsh-data against files written to a scratch directory.

use approx::assert_relative_eq;
use marsh_common::{Season, SlrVariant};
use marsh_data::{DataLoader, LoadError, Rcp, SLR_DIR, TIDES_DIR};
use std::path::PathBuf;

/// Creates an empty data root unique to this test.
fn scratch_root(name: &str) -> PathBuf {
    let root = std::env::temp_dir().join(format!("marsh-data-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&root);
    std::fs::create_dir_all(root.join(TIDES_DIR)).unwrap();
    std::fs::create_dir_all(root.join(SLR_DIR)).unwrap();
    root
}

fn write_inputs(root: &PathBuf, years: std::ops::RangeInclusive<i32>) {
    let mut tides = String::from("year\tseason\thigh_water_height\tnum_tides\textra\n");
    let mut slr = String::from("max_slr,year,delta_mean_slr,mean_slr,delta_min_slr,min_slr,delta_max_slr\n");
    for year in years {
        let t = f64::from(year - 2020);
        for season in Season::ALL {
            tides.push_str(&format!("{}\t{}\t1.25\t10\tx\n", year, season));
            tides.push_str(&format!("{}\t{}\t1.5\t2\tx\n", year, season));
        }
        slr.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            0.012 * t,
            year,
            0.006,
            0.006 * t,
            0.003,
            0.003 * t,
            0.012
        ));
    }
    std::fs::write(root.join(TIDES_DIR).join("tides_rcp45_S15.tsv"), tides).unwrap();
    std::fs::write(root.join(SLR_DIR).join("slr45.csv"), slr).unwrap();
}

#[test]
fn test_load_scenario_inputs() {
    let root = scratch_root("load");
    write_inputs(&root, 2020..=2100);

    let inputs = DataLoader::new(&root).load(Rcp::Rcp45, "S15").unwrap();
    assert_eq!(inputs.tides.years(), 2020..=2100);
    assert_eq!(inputs.tides.len(), 81 * 4);
    assert_eq!(inputs.slr.len(), 81);

    let winter = inputs.tides.season(2050, Season::Winter).unwrap();
    assert_eq!(winter.high_water_height(), &[1.25, 1.5]);
    assert_eq!(winter.num_tides(), &[10, 2]);

    let max = inputs.slr.get(2030).unwrap().select(SlrVariant::Max);
    assert_relative_eq!(max.delta_slr, 0.012);
    assert_relative_eq!(max.msl, 0.12, epsilon = 1e-12);

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn test_missing_site_file() {
    let root = scratch_root("missing");
    write_inputs(&root, 2020..=2030);

    let result = DataLoader::new(&root).load(Rcp::Rcp45, "S33");
    match result {
        Err(LoadError::Io { path, .. }) => assert!(path.ends_with("tides_rcp45_S33.tsv")),
        other => panic!("expected I/O error, got {:?}", other),
    }

    let result = DataLoader::new(&root).load_slr(Rcp::Rcp26);
    assert!(matches!(result, Err(LoadError::Io { .. })));

    let _ = std::fs::remove_dir_all(&root);
}
