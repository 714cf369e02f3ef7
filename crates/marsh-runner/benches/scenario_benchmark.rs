//! Benchmarks of the scenario pipeline.
//!
//! ```bash
//! cargo bench -p marsh-runner
//! ```
//!
//! - `run_scenario_N_years` - simulate and estimate one scenario of N years
//! - `sweep_N_scenarios` - run N scenarios on shared inputs in parallel

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use marsh_accretion::{run_scenario, ScenarioConfig};
use marsh_common::{Season, SlrTable, SlrTableRow, SlrVariant, TideDataset, TideRecord};
use marsh_data::{Rcp, ScenarioInputs};
use marsh_model::properties::ResolvedProperties;
use marsh_runner::{run_one, ScenarioSpec};
use rayon::prelude::*;

fn inputs(years: i32) -> ScenarioInputs {
    let end = 2020 + years - 1;
    let records = (2020..=end).flat_map(|year| {
        Season::ALL.map(|season| {
            let heights: Vec<f64> = (0..12).map(|i| 1.0 + 0.05 * i as f64).collect();
            let counts: Vec<u32> = (0..12).map(|i| 30 - 2 * i).collect();
            TideRecord::new(year, season, heights, counts).unwrap()
        })
    });
    let slr = SlrTable::new((2020..=end).map(|year| {
        let t = f64::from(year - 2020);
        SlrTableRow {
            year,
            delta_min_slr: 0.003,
            min_slr: 0.003 * t,
            delta_mean_slr: 0.007,
            mean_slr: 0.007 * t,
            delta_max_slr: 0.014,
            max_slr: 0.014 * t,
        }
    }))
    .unwrap();
    ScenarioInputs {
        tides: TideDataset::new(records).unwrap(),
        slr,
    }
}

fn bench_run_scenario(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_scenario");
    let config = ScenarioConfig::default();

    for years in [20, 81, 300] {
        let data = inputs(years);
        group.throughput(Throughput::Elements(years as u64));
        group.bench_with_input(BenchmarkId::new("years", years), &data, |b, data| {
            b.iter(|| run_scenario(black_box(&data.tides), black_box(&data.slr), &config).unwrap());
        });
    }
    group.finish();
}

fn bench_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("sweep");
    let data = inputs(81);
    let props = ResolvedProperties::new();
    let variants = [SlrVariant::Min, SlrVariant::Mean, SlrVariant::Max];

    for count in [3usize, 24, 96] {
        let specs: Vec<ScenarioSpec> = (0..count)
            .map(|i| ScenarioSpec::new(Rcp::Rcp45, "S15").with_slr(variants[i % 3]))
            .collect();
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("scenarios", count), &specs, |b, specs| {
            b.iter(|| {
                specs
                    .par_iter()
                    .map(|spec| run_one(&data, &props, spec, false).unwrap())
                    .count()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_run_scenario, bench_sweep);
criterion_main!(benches);
