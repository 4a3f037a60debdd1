//! Usage and cost projection across the analysis year range
//!
//! Pure cross-join-then-filter over one sampled schedule: every
//! scenario-system-component-year combination is generated, with usage
//! zeroed except where the installation/recurring rules hold. No randomness
//! enters here — projecting the same schedule twice is bit-identical.
//!
//! This stage dominates the pipeline's memory footprint
//! (iterations x scenarios x systems x years rows), which is why year
//! ranges and iteration counts stay in the hundreds.

use std::ops::RangeInclusive;

use crate::iterations::SampledSchedule;
use crate::model::{ComponentId, InstallationTiming, ScenarioId, SystemId};

/// Quantity of one component in use for one scenario-year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UsageRecord {
    pub scenario_id: ScenarioId,
    pub system_id: SystemId,
    pub component_id: ComponentId,
    pub year: i32,
    pub quantity: f64,
}

/// Inflated, AUD-converted unit cost of one component in one year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostRecord {
    pub component_id: ComponentId,
    pub year: i32,
    pub aud_cost: f64,
}

/// Quantity-in-use under the recurrence rule.
///
/// Installation costs land only in the install year; per-operation-year
/// costs start the year after install (not in the install year itself).
fn usage_in_year(timing: InstallationTiming, install_year: i32, year: i32) -> bool {
    match timing {
        InstallationTiming::Installation => year == install_year,
        InstallationTiming::PerOperationYear => year > install_year,
    }
}

/// Expand one sampled schedule into per-year component usage.
///
/// One record per scenario-system-component-year combination, zero-quantity
/// rows included. An install year outside the range contributes zero usage
/// everywhere (for Installation timing) by construction.
#[must_use]
pub fn project_usage(sampled: &SampledSchedule, years: RangeInclusive<i32>) -> Vec<UsageRecord> {
    let mut records = Vec::new();

    for install in &sampled.installs {
        for link in &sampled.component_links {
            if link.system_id != install.system_id {
                continue;
            }
            for year in years.clone() {
                let quantity = if usage_in_year(link.timing, install.install_year, year) {
                    install.install_number * link.usage
                } else {
                    0.0
                };
                records.push(UsageRecord {
                    scenario_id: install.scenario_id,
                    system_id: install.system_id,
                    component_id: link.component_id,
                    year,
                    quantity,
                });
            }
        }
    }

    records
}

/// Project every component's unit cost across the year range.
///
/// Cost in a year is `baseline_cost * to_aud * annual_multiplier^(year - baseline_year)`
/// — a simple exponential inflation/deflation model, not a lookup table.
#[must_use]
pub fn project_costs(sampled: &SampledSchedule, years: RangeInclusive<i32>) -> Vec<CostRecord> {
    let mut records = Vec::with_capacity(
        sampled.component_costs.len() * (years.end() - years.start() + 1).max(0) as usize,
    );

    for (component_id, cost) in &sampled.component_costs {
        for year in years.clone() {
            let inflation = cost.annual_multiplier.powi(year - cost.baseline_year);
            records.push(CostRecord {
                component_id: *component_id,
                year,
                aud_cost: cost.baseline_cost * cost.to_aud * inflation,
            });
        }
    }

    records
}
