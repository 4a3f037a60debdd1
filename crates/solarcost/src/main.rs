use std::fs;
use std::path::PathBuf;

use clap::Parser;
use solarcost_core::analysis::variance_contributions;
use solarcost_core::config::RunConfig;
use solarcost_core::simulation::run_analysis;

mod data;
mod logging;
mod report;

use data::export::{export_npv_lcoe, export_variance, sanitize_name};
use data::schedule_csv::load_schedule;
use data::yields_csv::load_yields;
use logging::init_logging;

#[derive(Parser, Debug)]
#[command(name = "solarcost")]
#[command(about = "Monte Carlo cost/NPV/LCOE analysis for solar farm designs")]
struct Args {
    /// Directory holding the cost schedule CSV tables
    #[arg(short, long)]
    schedule_dir: PathBuf,

    /// CSV of simulated yield (timestamp,energy_kwh)
    #[arg(short, long)]
    yield_file: PathBuf,

    /// YAML run configuration
    #[arg(short, long)]
    config: PathBuf,

    /// Directory for result CSVs
    #[arg(short, long, default_value = "out")]
    output_dir: PathBuf,

    /// Seed for the Monte Carlo run
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Override the configured iteration count
    #[arg(short = 'n', long)]
    iterations: Option<usize>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_logging(&args.log_level);

    let mut config: RunConfig = serde_saphyr::from_str(&fs::read_to_string(&args.config)?)?;
    if let Some(iterations) = args.iterations {
        config = config.with_iterations(iterations);
    }

    let schedule = load_schedule(&args.schedule_dir)?;
    let yields = load_yields(&args.yield_file)?;
    tracing::info!(
        "loaded {} scenarios, {} components, {} yield points",
        schedule.scenarios.len(),
        schedule.components.len(),
        yields.len()
    );

    let result = run_analysis(&schedule, &yields, &config, args.seed)?;

    for warning in &result.warnings {
        tracing::warn!("schedule: {warning}");
    }
    for failure in &result.failures {
        tracing::error!(
            "scenario '{}' failed at iteration {}: {}",
            failure.name,
            failure.iteration,
            failure.error
        );
    }

    fs::create_dir_all(&args.output_dir)?;
    let mut variance = Vec::with_capacity(result.scenarios.len());
    for scenario in &result.scenarios {
        let tag = sanitize_name(&scenario.name);

        let npv_path = args.output_dir.join(format!("npv_lcoe_{tag}.csv"));
        export_npv_lcoe(scenario, result.iteration_start, &npv_path)?;

        let analysis = variance_contributions(&result.draws, &scenario.npv, config.variance_top_k);
        if !analysis.accounting_consistent {
            tracing::warn!(
                "scenario '{}': variance accounting off target (total r-squared {:.2})",
                scenario.name,
                analysis.total_r_squared
            );
        }
        let variance_path = args.output_dir.join(format!("variance_{tag}.csv"));
        export_variance(&analysis, &variance_path)?;

        variance.push((scenario.name.clone(), analysis));
    }
    tracing::info!("results written to {}", args.output_dir.display());

    report::print_report(&result, &variance);

    Ok(())
}
