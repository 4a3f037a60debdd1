//! Tests for iteration table generation
//!
//! These tests verify that:
//! - Global iteration 0 reproduces the nominal schedule exactly
//! - The same (seed, iteration) pair always produces the same draws
//! - Splitting a run into batches does not change any draw
//! - Fixed parameters never appear in the draw table

use crate::iterations::{IterationSampler, generate_iterations};
use crate::tests::demo_schedule;

#[test]
fn test_iteration_zero_is_nominal() {
    let schedule = demo_schedule();
    let sampler = IterationSampler::new(&schedule, None, 42);

    let sample = sampler.sample(0).unwrap();

    // The two uncertain parameters (USD rate, rack cost) carry nominals.
    assert_eq!(sample.draws, vec![1.5, 100.0]);

    let (_, rack) = sample
        .schedule
        .component_costs
        .iter()
        .find(|(id, _)| id.0 == 10)
        .unwrap();
    assert_eq!(rack.baseline_cost, 100.0);
    assert_eq!(rack.to_aud, 1.5);
}

#[test]
fn test_only_uncertain_parameters_are_sampled() {
    let schedule = demo_schedule();
    let sampler = IterationSampler::new(&schedule, None, 42);

    let names = sampler.parameter_names();
    assert_eq!(
        names,
        vec!["Currency 2 To_AUD", "Component 10 BaselineCost"]
    );
}

#[test]
fn test_same_iteration_same_draws() {
    let schedule = demo_schedule();
    let sampler = IterationSampler::new(&schedule, None, 42);

    let a = sampler.sample(17).unwrap();
    let b = sampler.sample(17).unwrap();
    assert_eq!(a.draws, b.draws);
}

#[test]
fn test_different_seeds_differ() {
    let schedule = demo_schedule();
    let a = IterationSampler::new(&schedule, None, 1).sample(3).unwrap();
    let b = IterationSampler::new(&schedule, None, 2).sample(3).unwrap();
    assert_ne!(a.draws, b.draws);
}

#[test]
fn test_batch_split_is_invisible() {
    let schedule = demo_schedule();

    let (_, full) = generate_iterations(&schedule, 10, 0, 42).unwrap();
    let (_, first) = generate_iterations(&schedule, 5, 0, 42).unwrap();
    let (_, second) = generate_iterations(&schedule, 5, 5, 42).unwrap();

    for (column, full_values) in full.values.iter().enumerate() {
        let mut joined = first.values[column].clone();
        joined.extend(&second.values[column]);
        assert_eq!(*full_values, joined, "column {column} shifted across the batch split");
    }
}

#[test]
fn test_draws_land_between_bounds_mostly() {
    let schedule = demo_schedule();
    let (_, draws) = generate_iterations(&schedule, 500, 1, 42).unwrap();

    // Rack cost draws: nominal 100, bounds [80, 130] at the 10th/90th.
    let rack = &draws.values[1];
    let in_bounds = rack.iter().filter(|v| (80.0..=130.0).contains(*v)).count();
    assert!(in_bounds > 350, "only {in_bounds}/500 draws inside bounds");
}
