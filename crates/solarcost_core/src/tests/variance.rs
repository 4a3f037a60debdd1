//! Tests for variance-contribution ranking
//!
//! These tests verify that:
//! - A single perfectly correlated input gets ~100% of the contribution
//! - Constant input columns are dropped, not correlated
//! - A constant output yields an empty, inconsistent analysis
//! - The pairwise r-squared accounting lands near 2.0 for one clean driver

use crate::analysis::variance_contributions;
use crate::model::ParameterDraws;

fn draws(columns: Vec<(&str, Vec<f64>)>) -> ParameterDraws {
    ParameterDraws {
        names: columns.iter().map(|(n, _)| n.to_string()).collect(),
        values: columns.into_iter().map(|(_, v)| v).collect(),
    }
}

#[test]
fn test_single_driver_gets_full_contribution() {
    let input = vec![1.0, 2.0, 3.0, 4.0, 5.0];
    let output: Vec<f64> = input.iter().map(|v| 10.0 * v + 3.0).collect();
    let draws = draws(vec![("Component 1 BaselineCost", input)]);

    let analysis = variance_contributions(&draws, &output, 10);

    assert_eq!(analysis.contributions.len(), 1);
    let top = &analysis.contributions[0];
    assert_eq!(top.parameter, "Component 1 BaselineCost");
    assert!((top.contribution_pct - 100.0).abs() < 1e-9);
    assert!((top.r_squared - 1.0).abs() < 1e-9);
    assert!((analysis.total_r_squared - 2.0).abs() < 1e-9);
    assert!(analysis.accounting_consistent);
}

#[test]
fn test_constant_column_is_dropped() {
    let output = vec![1.0, 4.0, 2.0, 8.0, 5.0];
    let draws = draws(vec![
        ("Currency 2 To_AUD", vec![1.5; 5]),
        ("Component 1 BaselineCost", output.clone()),
    ]);

    let analysis = variance_contributions(&draws, &output, 10);

    assert_eq!(analysis.dropped_constant, vec!["Currency 2 To_AUD"]);
    assert_eq!(analysis.contributions.len(), 1);
}

#[test]
fn test_constant_output_yields_no_attribution() {
    let draws = draws(vec![("Component 1 BaselineCost", vec![1.0, 2.0, 3.0])]);
    let analysis = variance_contributions(&draws, &[7.0, 7.0, 7.0], 10);

    assert!(analysis.contributions.is_empty());
    assert!(!analysis.accounting_consistent);
}

#[test]
fn test_percentiles_describe_the_input_distribution() {
    let input: Vec<f64> = (1..=100).map(f64::from).collect();
    let output = input.clone();
    let draws = draws(vec![("X", input)]);

    let analysis = variance_contributions(&draws, &output, 10);
    let top = &analysis.contributions[0];
    assert!((top.p10 - 10.9).abs() < 1e-9);
    assert!((top.p50 - 50.5).abs() < 1e-9);
    assert!((top.p90 - 90.1).abs() < 1e-9);
}

#[test]
fn test_top_k_truncates_the_ranking() {
    let output = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    let noisy: Vec<f64> = vec![1.0, 2.5, 2.5, 4.5, 4.5, 6.0];
    let noisier: Vec<f64> = vec![2.0, 1.0, 4.0, 3.0, 6.0, 5.0];
    let draws = draws(vec![
        ("A", output.clone()),
        ("B", noisy),
        ("C", noisier),
    ]);

    let analysis = variance_contributions(&draws, &output, 2);
    assert_eq!(analysis.contributions.len(), 2);
    assert_eq!(analysis.contributions[0].parameter, "A");
    assert!(
        analysis.contributions[0].r_squared >= analysis.contributions[1].r_squared,
        "ranking must be descending"
    );
}

#[test]
fn test_two_correlated_inputs_are_flagged_inconsistent() {
    // Two copies of the same driver double-count, pushing the total well
    // past 2.0; the diagnostic should trip.
    let output = vec![1.0, 2.0, 3.0, 4.0, 5.0];
    let draws = draws(vec![("A", output.clone()), ("B", output.clone())]);

    let analysis = variance_contributions(&draws, &output, 10);
    assert!((analysis.total_r_squared - 3.0).abs() < 1e-9);
    assert!(!analysis.accounting_consistent);
}
