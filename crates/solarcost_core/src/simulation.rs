//! Monte Carlo analysis orchestration
//!
//! One `run_analysis` call walks the whole pipeline: validate the schedule,
//! expand it into sampled iterations, project usage and cost, aggregate cash
//! flows, and compute NPV/LCOE per scenario per iteration.
//!
//! Iterations are independent, so they run in parallel batches when the
//! `parallel` feature is enabled. Each iteration derives its RNG from the
//! run seed and its global index, so batch boundaries never shift a draw and
//! a run split across processes reproduces a single-process run exactly.

use rustc_hash::FxHashMap;

use crate::cashflow::aggregate;
use crate::config::RunConfig;
use crate::error::{FinanceError, RunError, ScheduleWarning};
use crate::finance::{KWH_PER_MWH, align_energy, lcoe, npv};
use crate::iterations::IterationSampler;
use crate::model::{
    AnalysisResult, CostSchedule, ParameterDraws, ScenarioFailure, ScenarioId, ScenarioSeries,
    YieldSeries,
};
use crate::projector::{project_costs, project_usage};

#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelIterator, ParallelIterator};

const MAX_BATCH_SIZE: usize = 50;

/// Everything one iteration produces: the draws that went in and the
/// per-scenario outcomes that came out.
struct IterationOutcome {
    draws: Vec<f64>,
    /// `(npv, lcoe)` per scenario, aligned with the sorted scenario-ID list.
    per_scenario: Vec<Result<(f64, f64), FinanceError>>,
}

/// Run a full Monte Carlo cost analysis over a validated-or-validatable
/// schedule and a measured yield series.
///
/// The schedule is cloned and validated internally; data-sanity findings
/// come back in [`AnalysisResult::warnings`]. A scenario whose evaluation
/// fails in any iteration is dropped into [`AnalysisResult::failures`]
/// without disturbing the other scenarios; structural problems (dangling
/// references, an empty energy series, an empty year range) abort the whole
/// run instead.
pub fn run_analysis(
    schedule: &CostSchedule,
    yields: &YieldSeries,
    config: &RunConfig,
    seed: u64,
) -> Result<AnalysisResult, RunError> {
    if config.year_start > config.year_end {
        return Err(RunError::InvalidYearRange {
            start: config.year_start,
            end: config.year_end,
        });
    }

    let mut schedule = schedule.clone();
    let warnings = schedule.validate()?;

    let years: Vec<i32> = config.years().collect();
    let annual_energy = yields.annual_energy_kwh();
    let energy_kwh = align_energy(&annual_energy, &years, config.revenue_start_year)
        .map_err(RunError::Energy)?;

    let scenario_ids = schedule.scenario_ids();
    let sampler = IterationSampler::new(&schedule, config.yield_multiplier, seed);
    let parameter_names = sampler.parameter_names();

    let context = IterationContext {
        sampler: &sampler,
        config,
        scenario_ids: &scenario_ids,
        years: &years,
        energy_kwh: &energy_kwh,
    };

    let outcomes = evaluate_all(&context, config.num_iterations, config.iteration_start)?;

    Ok(assemble_result(
        &schedule,
        &scenario_ids,
        parameter_names,
        outcomes,
        warnings,
        config.iteration_start,
    ))
}

struct IterationContext<'a> {
    sampler: &'a IterationSampler<'a>,
    config: &'a RunConfig,
    scenario_ids: &'a [ScenarioId],
    years: &'a [i32],
    energy_kwh: &'a [f64],
}

/// Evaluate every iteration, in parallel batches where available.
#[cfg(feature = "parallel")]
fn evaluate_all(
    context: &IterationContext<'_>,
    num_iterations: usize,
    iteration_start: u32,
) -> Result<Vec<IterationOutcome>, RunError> {
    let num_batches = num_iterations.div_ceil(MAX_BATCH_SIZE);

    let batches: Vec<Vec<IterationOutcome>> = (0..num_batches)
        .into_par_iter()
        .map(|batch| {
            let offset = batch * MAX_BATCH_SIZE;
            let batch_size = if batch == num_batches - 1 {
                num_iterations - offset
            } else {
                MAX_BATCH_SIZE
            };

            (0..batch_size)
                .map(|i| {
                    let global = iteration_start + (offset + i) as u32;
                    evaluate_iteration(context, global)
                })
                .collect::<Result<Vec<_>, RunError>>()
        })
        .collect::<Result<_, _>>()?;

    Ok(batches.into_iter().flatten().collect())
}

#[cfg(not(feature = "parallel"))]
fn evaluate_all(
    context: &IterationContext<'_>,
    num_iterations: usize,
    iteration_start: u32,
) -> Result<Vec<IterationOutcome>, RunError> {
    (0..num_iterations)
        .map(|i| evaluate_iteration(context, iteration_start + i as u32))
        .collect()
}

/// Sample, project, aggregate, and discount one iteration.
fn evaluate_iteration(
    context: &IterationContext<'_>,
    global_iteration: u32,
) -> Result<IterationOutcome, RunError> {
    let sample = context.sampler.sample(global_iteration)?;

    let years = context.config.years();
    let usage = project_usage(&sample.schedule, years.clone());
    let costs = project_costs(&sample.schedule, years.clone());
    let table = aggregate(&usage, &costs, context.scenario_ids, years)?;

    let energy_kwh: Vec<f64> = context
        .energy_kwh
        .iter()
        .map(|e| e * sample.yield_multiplier)
        .collect();
    let revenue: Vec<f64> = energy_kwh
        .iter()
        .map(|e| e / KWH_PER_MWH * context.config.energy_price_aud_per_mwh)
        .collect();

    let per_scenario = context
        .scenario_ids
        .iter()
        .map(|id| {
            // Scenario IDs come from the validated schedule, so the series
            // is always present.
            let scenario_costs = table
                .scenario_costs(*id)
                .expect("cash-flow table covers every scenario");

            let scenario_npv = npv(
                context.years,
                &revenue,
                scenario_costs,
                context.config.discount_rate,
                context.config.year_start,
            );
            let scenario_lcoe = lcoe(
                context.years,
                scenario_costs,
                &energy_kwh,
                context.config.discount_rate,
                context.config.year_start,
            )?;

            Ok((scenario_npv, scenario_lcoe))
        })
        .collect();

    Ok(IterationOutcome {
        draws: sample.draws,
        per_scenario,
    })
}

/// Pivot per-iteration outcomes into per-scenario series, isolating failed
/// scenarios.
fn assemble_result(
    schedule: &CostSchedule,
    scenario_ids: &[ScenarioId],
    parameter_names: Vec<String>,
    outcomes: Vec<IterationOutcome>,
    warnings: Vec<ScheduleWarning>,
    iteration_start: u32,
) -> AnalysisResult {
    let num_iterations = outcomes.len();

    let mut values = vec![Vec::with_capacity(num_iterations); parameter_names.len()];
    for outcome in &outcomes {
        for (column, draw) in values.iter_mut().zip(&outcome.draws) {
            column.push(*draw);
        }
    }

    let mut series: FxHashMap<ScenarioId, ScenarioSeries> = scenario_ids
        .iter()
        .map(|id| {
            (
                *id,
                ScenarioSeries {
                    scenario_id: *id,
                    name: schedule.scenarios[id].name.clone(),
                    npv: Vec::with_capacity(num_iterations),
                    lcoe: Vec::with_capacity(num_iterations),
                },
            )
        })
        .collect();
    let mut failures: FxHashMap<ScenarioId, ScenarioFailure> = FxHashMap::default();

    for (offset, outcome) in outcomes.into_iter().enumerate() {
        for (id, result) in scenario_ids.iter().zip(outcome.per_scenario) {
            match result {
                Ok((npv, lcoe)) => {
                    if let Some(s) = series.get_mut(id) {
                        s.npv.push(npv);
                        s.lcoe.push(lcoe);
                    }
                }
                Err(error) => {
                    // First failure wins; the scenario is dropped entirely.
                    failures.entry(*id).or_insert_with(|| ScenarioFailure {
                        scenario_id: *id,
                        name: schedule.scenarios[id].name.clone(),
                        iteration: iteration_start + offset as u32,
                        error,
                    });
                }
            }
        }
    }

    let scenarios = scenario_ids
        .iter()
        .filter(|id| !failures.contains_key(id))
        .filter_map(|id| series.remove(id))
        .collect();
    let mut failures: Vec<ScenarioFailure> = failures.into_values().collect();
    failures.sort_by_key(|f| f.scenario_id);

    AnalysisResult {
        iteration_start,
        scenarios,
        failures,
        draws: ParameterDraws {
            names: parameter_names,
            values,
        },
        warnings,
    }
}
