//! `xmarsh` - tidal marsh accretion scenarios from the command line.
//!
//! Usage:
//!
//! ```text
//! xmarsh run --data-dir DIR --rcp rcp45 --site S15 [--slr mean] [--set z_init=0.8]
//! xmarsh sweep --data-dir DIR --plan plan.yaml [--jobs 8] [--output results.json]
//! xmarsh params [--config params.yaml]
//! ```

use clap::{Args, Parser, Subcommand};
use marsh_common::SlrVariant;
use marsh_data::{DataLoader, Rcp};
use marsh_runner::{
    emit, init_logging, property_table, render, resolve_properties, run_one, run_sweep,
    OutputFormat, Result, ScenarioSpec, SweepPlan,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

#[derive(Parser, Debug)]
#[command(name = "xmarsh", version)]
#[command(about = "Tidal marsh accretion and critical state estimation")]
struct Cli {
    /// Log level for the marsh crates (overridden by RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Serve Prometheus metrics on this address
    #[cfg(feature = "prometheus")]
    #[arg(long, global = true)]
    metrics_addr: Option<std::net::SocketAddr>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a single scenario
    Run(RunArgs),
    /// Run a plan of scenarios in parallel
    Sweep(SweepArgs),
    /// List every configuration property
    Params(ConfigArgs),
}

#[derive(Args, Debug)]
struct ConfigArgs {
    /// YAML property file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Property override, e.g. `accretion/fd=0.4` (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    overrides: Vec<String>,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Root directory of the input tables
    #[arg(long)]
    data_dir: PathBuf,

    /// Greenhouse gas pathway (rcp26, rcp45, rcp85)
    #[arg(long)]
    rcp: Rcp,

    /// Site identifier
    #[arg(long)]
    site: String,

    /// SLR variant (min, mean, max or 1, 2, 3)
    #[arg(long)]
    slr: Option<SlrVariant>,

    /// Include the elevation trajectory in the report
    #[arg(long)]
    trajectory: bool,

    #[command(flatten)]
    config: ConfigArgs,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct SweepArgs {
    /// Root directory of the input tables
    #[arg(long)]
    data_dir: PathBuf,

    /// YAML sweep plan
    #[arg(long)]
    plan: PathBuf,

    /// Worker threads (defaults to the number of CPUs)
    #[arg(long)]
    jobs: Option<usize>,

    #[command(flatten)]
    config: ConfigArgs,

    #[command(flatten)]
    output: OutputArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    if let Err(e) = start_exporter(&cli) {
        error!("Failed to start metrics exporter: {}", e);
        return ExitCode::FAILURE;
    }

    match execute(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(feature = "prometheus")]
fn start_exporter(cli: &Cli) -> std::result::Result<(), String> {
    match cli.metrics_addr {
        Some(addr) => marsh_metrics::install_prometheus_exporter(addr).map_err(|e| e.to_string()),
        None => Ok(()),
    }
}

#[cfg(not(feature = "prometheus"))]
fn start_exporter(_cli: &Cli) -> std::result::Result<(), String> {
    Ok(())
}

fn execute(command: Command) -> Result<()> {
    match command {
        Command::Run(args) => {
            let props = resolve_properties(args.config.config.as_deref(), &args.config.overrides)?;
            let inputs = DataLoader::new(&args.data_dir).load(args.rcp, &args.site)?;
            let mut spec = ScenarioSpec::new(args.rcp, args.site);
            spec.slr = args.slr;
            let report = run_one(&inputs, &props, &spec, args.trajectory)?;
            emit(&render(&report, args.output.format)?, args.output.output.as_deref())
        }
        Command::Sweep(args) => {
            let props = resolve_properties(args.config.config.as_deref(), &args.config.overrides)?;
            let plan = SweepPlan::from_yaml_file(&args.plan)?;
            let loader = DataLoader::new(&args.data_dir);
            let results = run_sweep(&loader, &props, &plan, args.jobs)?;
            emit(&render(&results, args.output.format)?, args.output.output.as_deref())
        }
        Command::Params(args) => {
            let props = resolve_properties(args.config.as_deref(), &args.overrides)?;
            emit(&property_table(&props), None)
        }
    }
}
