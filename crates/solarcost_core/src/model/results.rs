//! Analysis outputs
//!
//! One `AnalysisResult` holds the per-iteration NPV/LCOE series for every
//! scenario plus the sampled parameter draws that produced them, so the
//! variance analyzer can correlate inputs against outputs afterwards.

use serde::{Deserialize, Serialize};

use crate::error::{FinanceError, ScheduleWarning};
use crate::model::ids::ScenarioId;

/// Per-iteration financial outcomes for one scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSeries {
    pub scenario_id: ScenarioId,
    pub name: String,
    /// Net present value per iteration, AUD. Index 0 within a batch started
    /// at iteration 0 is the deterministic nominal case.
    pub npv: Vec<f64>,
    /// Levelised cost of energy per iteration, AUD/MWh.
    pub lcoe: Vec<f64>,
}

/// A scenario whose evaluation failed; other scenarios are unaffected.
#[derive(Debug, Clone)]
pub struct ScenarioFailure {
    pub scenario_id: ScenarioId,
    pub name: String,
    pub iteration: u32,
    pub error: FinanceError,
}

/// Wide table of sampled input parameters: one column per uncertain
/// parameter, one row per iteration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParameterDraws {
    pub names: Vec<String>,
    /// `values[p][i]` is parameter `p`'s draw in the i-th iteration of the run.
    pub values: Vec<Vec<f64>>,
}

impl ParameterDraws {
    #[must_use]
    pub fn num_iterations(&self) -> usize {
        self.values.first().map_or(0, Vec::len)
    }
}

/// Complete output of one Monte Carlo analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// Global index of the first iteration in this batch.
    pub iteration_start: u32,
    /// Scenario series in ascending scenario-ID order.
    pub scenarios: Vec<ScenarioSeries>,
    /// Scenarios dropped because an iteration failed to evaluate.
    pub failures: Vec<ScenarioFailure>,
    pub draws: ParameterDraws,
    /// Data-sanity findings from schedule validation.
    pub warnings: Vec<ScheduleWarning>,
}

impl AnalysisResult {
    #[must_use]
    pub fn scenario(&self, id: ScenarioId) -> Option<&ScenarioSeries> {
        self.scenarios.iter().find(|s| s.scenario_id == id)
    }

    /// P10/P50/P90 summaries for every surviving scenario.
    #[must_use]
    pub fn summaries(&self) -> Vec<ScenarioSummary> {
        self.scenarios
            .iter()
            .map(|s| ScenarioSummary {
                scenario_id: s.scenario_id,
                name: s.name.clone(),
                npv_p10: percentile(&s.npv, 0.10),
                npv_p50: percentile(&s.npv, 0.50),
                npv_p90: percentile(&s.npv, 0.90),
                lcoe_p10: percentile(&s.lcoe, 0.10),
                lcoe_p50: percentile(&s.lcoe, 0.50),
                lcoe_p90: percentile(&s.lcoe, 0.90),
            })
            .collect()
    }
}

/// Percentile summary of one scenario's NPV and LCOE distributions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub scenario_id: ScenarioId,
    pub name: String,
    pub npv_p10: f64,
    pub npv_p50: f64,
    pub npv_p90: f64,
    pub lcoe_p10: f64,
    pub lcoe_p50: f64,
    pub lcoe_p90: f64,
}

/// Linearly interpolated percentile of an unsorted sample.
///
/// Returns 0.0 for an empty slice rather than panicking.
#[must_use]
pub fn percentile(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let rank = p.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64)
    }
}
