//! Tests for the schedule builder DSL and validation
//!
//! These tests verify that:
//! - A well-formed schedule validates without warnings
//! - Dangling foreign keys and duplicate link IDs are hard errors
//! - Bound problems are corrected and reported as warnings

use crate::config::ScheduleBuilder;
use crate::error::{LookupError, ScheduleError, ScheduleWarning, SchemaError};
use crate::model::{InstallationTiming, Uncertain};
use crate::tests::demo_schedule;

#[test]
fn test_demo_schedule_validates_cleanly() {
    let mut schedule = demo_schedule();
    let warnings = schedule.validate().unwrap();
    assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
}

#[test]
fn test_dangling_component_reference_is_an_error() {
    let mut schedule = ScheduleBuilder::new()
        .currency(1, "AUD", Uncertain::fixed(1.0))
        .cost_category(1, "CAPEX")
        .system(1, "Array block")
        .component_link(
            1,
            1,
            999, // no such component
            Uncertain::fixed(1.0),
            InstallationTiming::Installation,
            1,
        )
        .scenario(1, "Test", "t")
        .install(1, 1, 1, Uncertain::fixed(1.0), 2025)
        .build();

    let result = schedule.validate();
    assert!(matches!(
        result,
        Err(ScheduleError::Lookup(LookupError::ComponentNotFound(id))) if id.0 == 999
    ));
}

#[test]
fn test_duplicate_link_id_is_an_error() {
    let mut schedule = ScheduleBuilder::new()
        .currency(1, "AUD", Uncertain::fixed(1.0))
        .system(1, "Array block")
        .scenario(1, "Test", "t")
        .install(7, 1, 1, Uncertain::fixed(1.0), 2025)
        .install(7, 1, 1, Uncertain::fixed(2.0), 2026)
        .build();

    let result = schedule.validate();
    assert!(matches!(
        result,
        Err(ScheduleError::Schema(SchemaError::DuplicateId { id: 7, .. }))
    ));
}

#[test]
fn test_swapped_bounds_are_corrected_and_reported() {
    let mut schedule = ScheduleBuilder::new()
        .currency(1, "AUD", Uncertain::fixed(1.0))
        .cost_category(1, "CAPEX")
        .component(
            10,
            "SAT rack",
            1,
            Uncertain::with_bounds(100.0, 130.0, 80.0), // low and high flipped
            2025,
            Uncertain::fixed(1.0),
        )
        .system(1, "Array block")
        .component_link(
            1,
            1,
            10,
            Uncertain::fixed(1.0),
            InstallationTiming::Installation,
            1,
        )
        .scenario(1, "Test", "t")
        .install(1, 1, 1, Uncertain::fixed(1.0), 2025)
        .build();

    let warnings = schedule.validate().unwrap();
    assert!(warnings
        .iter()
        .any(|w| matches!(w, ScheduleWarning::BoundsSwapped { .. })));

    let rack = &schedule.components[&crate::model::ComponentId(10)];
    assert_eq!(rack.baseline_cost.low, 80.0);
    assert_eq!(rack.baseline_cost.high, 130.0);
}

#[test]
fn test_empty_tables_are_warned() {
    let mut schedule = ScheduleBuilder::new().build();
    let warnings = schedule.validate().unwrap();
    assert!(warnings
        .iter()
        .any(|w| matches!(w, ScheduleWarning::EmptyTable { table: "scenarios" })));
}
