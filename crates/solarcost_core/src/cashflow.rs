//! Cash-flow aggregation
//!
//! Joins the usage-by-year and cost-by-year tables on (component, year),
//! multiplies, and pivots into a Year x Scenario matrix of annual cost.
//! Every (scenario, year) cell is present and zero-filled, so downstream
//! discounting never sees a missing year.

use std::ops::RangeInclusive;

use rustc_hash::FxHashMap;

use crate::error::LookupError;
use crate::model::ScenarioId;
use crate::projector::{CostRecord, UsageRecord};

/// Annual cost per scenario over a contiguous year range.
#[derive(Debug, Clone, PartialEq)]
pub struct CashFlowTable {
    pub years: Vec<i32>,
    pub cost_by_scenario: FxHashMap<ScenarioId, Vec<f64>>,
}

impl CashFlowTable {
    /// The annual cost series for one scenario, aligned with `years`.
    #[must_use]
    pub fn scenario_costs(&self, id: ScenarioId) -> Option<&[f64]> {
        self.cost_by_scenario.get(&id).map(Vec::as_slice)
    }
}

/// Join usage and cost, multiply, and pivot per scenario.
///
/// A usage row whose (component, year) has no cost record is a hard error:
/// the cost table covers every component over the full range, so a miss
/// means a dangling component reference that would otherwise become NaN in
/// the sums.
pub fn aggregate(
    usage: &[UsageRecord],
    costs: &[CostRecord],
    scenario_ids: &[ScenarioId],
    years: RangeInclusive<i32>,
) -> Result<CashFlowTable, LookupError> {
    let year_list: Vec<i32> = years.clone().collect();
    let year_start = *years.start();

    let cost_lookup: FxHashMap<(u32, i32), f64> = costs
        .iter()
        .map(|c| ((c.component_id.0, c.year), c.aud_cost))
        .collect();

    let mut cost_by_scenario: FxHashMap<ScenarioId, Vec<f64>> = scenario_ids
        .iter()
        .map(|id| (*id, vec![0.0; year_list.len()]))
        .collect();

    for record in usage {
        let unit_cost = *cost_lookup
            .get(&(record.component_id.0, record.year))
            .ok_or(LookupError::CostNotProjected {
                component_id: record.component_id,
                year: record.year,
            })?;

        if let Some(series) = cost_by_scenario.get_mut(&record.scenario_id) {
            let index = (record.year - year_start) as usize;
            series[index] += unit_cost * record.quantity;
        }
    }

    Ok(CashFlowTable {
        years: year_list,
        cost_by_scenario,
    })
}
