//! Tests for discounting, NPV, LCOE, and energy alignment
//!
//! These tests verify that:
//! - Discount factors follow 1/(1+r)^offset from the start year
//! - NPV is discounted revenue minus discounted cost
//! - LCOE reports AUD/MWh and refuses a zero energy denominator
//! - The yield window tiles cyclically across the analysis years

use std::collections::BTreeMap;

use crate::error::FinanceError;
use crate::finance::{align_energy, discount_factor, discounted_sum, lcoe, npv};

#[test]
fn test_discount_factors() {
    let rate = 0.07;
    assert_eq!(discount_factor(rate, 0), 1.0);
    assert!((discount_factor(rate, 1) - 0.934579).abs() < 1e-6);
    assert!((discount_factor(rate, 2) - 0.873439).abs() < 1e-6);
}

#[test]
fn test_discounted_sum_over_three_years() {
    let years = [2029, 2030, 2031];
    let costs = [100.0, 100.0, 100.0];

    let total = discounted_sum(&years, &costs, 0.07, 2029);
    let expected = 100.0 + 100.0 / 1.07 + 100.0 / 1.07f64.powi(2);
    assert!((total - expected).abs() < 1e-9);
    assert!((total - 280.80).abs() < 0.01);
}

#[test]
fn test_npv_is_revenue_minus_cost() {
    let years = [2025, 2026];
    let revenue = [200.0, 200.0];
    let costs = [150.0, 50.0];

    let value = npv(&years, &revenue, &costs, 0.05, 2025);
    let expected = (200.0 - 150.0) + (200.0 - 50.0) / 1.05;
    assert!((value - expected).abs() < 1e-9);
}

#[test]
fn test_npv_zero_rate_is_plain_sum() {
    let years = [2025, 2026, 2027];
    let revenue = [10.0, 20.0, 30.0];
    let costs = [5.0, 5.0, 5.0];
    assert!((npv(&years, &revenue, &costs, 0.0, 2025) - 45.0).abs() < 1e-12);
}

#[test]
fn test_lcoe_converts_to_per_mwh() {
    let years = [2025];
    let costs = [60_000.0];
    let energy_kwh = [1_000_000.0]; // 1000 MWh

    let value = lcoe(&years, &costs, &energy_kwh, 0.07, 2025).unwrap();
    assert!((value - 60.0).abs() < 1e-9);
}

#[test]
fn test_lcoe_zero_energy_is_an_error() {
    let years = [2025, 2026];
    let costs = [100.0, 100.0];
    let energy_kwh = [0.0, 0.0];

    let result = lcoe(&years, &costs, &energy_kwh, 0.07, 2025);
    assert_eq!(result, Err(FinanceError::UndefinedLcoe));
}

#[test]
fn test_align_energy_tiles_the_window() {
    let annual: BTreeMap<i32, f64> = BTreeMap::from([(2023, 10.0), (2024, 20.0)]);
    let years = [2025, 2026, 2027, 2028, 2029];

    let aligned = align_energy(&annual, &years, None).unwrap();
    assert_eq!(aligned, vec![10.0, 20.0, 10.0, 20.0, 10.0]);
}

#[test]
fn test_align_energy_zeroes_before_revenue_start() {
    let annual: BTreeMap<i32, f64> = BTreeMap::from([(2023, 10.0)]);
    let years = [2025, 2026, 2027];

    let aligned = align_energy(&annual, &years, Some(2027)).unwrap();
    assert_eq!(aligned, vec![0.0, 0.0, 10.0]);
}

#[test]
fn test_align_energy_empty_series_is_an_error() {
    let annual: BTreeMap<i32, f64> = BTreeMap::new();
    let result = align_energy(&annual, &[2025], None);
    assert_eq!(result, Err(FinanceError::EmptyEnergySeries));
}
