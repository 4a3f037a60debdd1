//! Tests for cash-flow aggregation
//!
//! These tests verify that:
//! - Every (scenario, year) cell exists and defaults to zero
//! - Usage rows multiply against the matching year's unit cost
//! - A usage row without a projected cost is a hard error

use crate::cashflow::aggregate;
use crate::error::LookupError;
use crate::iterations::IterationSampler;
use crate::model::ScenarioId;
use crate::projector::{CostRecord, UsageRecord, project_costs, project_usage};
use crate::tests::demo_schedule;

#[test]
fn test_every_cell_is_present_and_zero_filled() {
    let schedule = demo_schedule();
    let sampled = IterationSampler::new(&schedule, None, 42)
        .sample(0)
        .unwrap()
        .schedule;

    let years = 2025..=2030;
    let usage = project_usage(&sampled, years.clone());
    let costs = project_costs(&sampled, years.clone());
    let scenario_ids = schedule.scenario_ids();

    let table = aggregate(&usage, &costs, &scenario_ids, years).unwrap();

    assert_eq!(table.years, vec![2025, 2026, 2027, 2028, 2029, 2030]);
    for id in &scenario_ids {
        let series = table.scenario_costs(*id).unwrap();
        assert_eq!(series.len(), 6);
    }

    // Scenario 1 installs in 2025; 2026 carries only the recurring visits.
    let s1 = table.scenario_costs(ScenarioId(1)).unwrap();
    let install_cost = 10.0 * 5.0 * 100.0 * 1.5;
    let visits_2026 = 10.0 * 2.0 * 40.0;
    assert!((s1[0] - install_cost).abs() < 1e-9);
    assert!((s1[1] - visits_2026).abs() < 1e-9);
}

#[test]
fn test_scenario_without_usage_is_all_zero() {
    let schedule = demo_schedule();
    let sampled = IterationSampler::new(&schedule, None, 42)
        .sample(0)
        .unwrap()
        .schedule;

    // Range before scenario 2's install year.
    let years = 2020..=2024;
    let usage = project_usage(&sampled, years.clone());
    let costs = project_costs(&sampled, years.clone());

    let table = aggregate(&usage, &costs, &schedule.scenario_ids(), years).unwrap();
    let s2 = table.scenario_costs(ScenarioId(2)).unwrap();
    assert!(s2.iter().all(|v| *v == 0.0));
}

#[test]
fn test_missing_cost_record_is_an_error() {
    let schedule = demo_schedule();
    let sampled = IterationSampler::new(&schedule, None, 42)
        .sample(0)
        .unwrap()
        .schedule;

    let usage: Vec<UsageRecord> = project_usage(&sampled, 2025..=2026);
    // Drop the rack's cost rows so its usage has nothing to join against.
    let costs: Vec<CostRecord> = project_costs(&sampled, 2025..=2026)
        .into_iter()
        .filter(|c| c.component_id.0 != 10)
        .collect();

    let result = aggregate(&usage, &costs, &schedule.scenario_ids(), 2025..=2026);
    assert!(matches!(
        result,
        Err(LookupError::CostNotProjected { component_id, .. }) if component_id.0 == 10
    ));
}
