//! Discounting, NPV, and LCOE
//!
//! Annual cash flows are discounted to the start of the analysis window at a
//! fixed rate. LCOE divides discounted cost by discounted energy; a zero
//! energy denominator is an explicit error, never inf or NaN.

use std::collections::BTreeMap;

use crate::error::FinanceError;

/// kWh per MWh, for reporting LCOE in AUD/MWh from kWh energy sums.
pub const KWH_PER_MWH: f64 = 1000.0;

/// Present-value factor for a cash flow `offset` years after the start year.
#[must_use]
pub fn discount_factor(rate: f64, offset: i32) -> f64 {
    1.0 / (1.0 + rate).powi(offset)
}

/// Discounted sum of an annual series.
///
/// `years` and `values` are parallel; each value is discounted by its year's
/// offset from `start_year`.
#[must_use]
pub fn discounted_sum(years: &[i32], values: &[f64], rate: f64, start_year: i32) -> f64 {
    years
        .iter()
        .zip(values)
        .map(|(year, value)| value * discount_factor(rate, year - start_year))
        .sum()
}

/// Net present value of a revenue series against a cost series.
#[must_use]
pub fn npv(years: &[i32], revenue: &[f64], costs: &[f64], rate: f64, start_year: i32) -> f64 {
    discounted_sum(years, revenue, rate, start_year) - discounted_sum(years, costs, rate, start_year)
}

/// Levelised cost of energy in AUD/MWh.
///
/// `energy_kwh` is the delivered-energy series aligned with `years`.
pub fn lcoe(
    years: &[i32],
    costs: &[f64],
    energy_kwh: &[f64],
    rate: f64,
    start_year: i32,
) -> Result<f64, FinanceError> {
    let discounted_cost = discounted_sum(years, costs, rate, start_year);
    let discounted_energy = discounted_sum(years, energy_kwh, rate, start_year);

    if discounted_energy <= 0.0 {
        return Err(FinanceError::UndefinedLcoe);
    }

    Ok(discounted_cost / discounted_energy * KWH_PER_MWH)
}

/// Align an annual energy series to the cost table's year range.
///
/// The yield simulation covers a fixed historical weather window that is
/// usually much shorter than the multi-decade cost schedule, so the window
/// is tiled cyclically across the target years. Years before
/// `revenue_start_year` are zeroed to model a delayed grid connection.
pub fn align_energy(
    annual_energy_kwh: &BTreeMap<i32, f64>,
    years: &[i32],
    revenue_start_year: Option<i32>,
) -> Result<Vec<f64>, FinanceError> {
    if annual_energy_kwh.is_empty() {
        return Err(FinanceError::EmptyEnergySeries);
    }

    let window: Vec<f64> = annual_energy_kwh.values().copied().collect();
    let revenue_start = revenue_start_year.unwrap_or(i32::MIN);

    Ok(years
        .iter()
        .map(|year| {
            if *year < revenue_start {
                0.0
            } else {
                let offset = (year - years[0]).rem_euclid(window.len() as i32) as usize;
                window[offset]
            }
        })
        .collect())
}
