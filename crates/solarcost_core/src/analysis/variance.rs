//! Variance-contribution ranking via pairwise Pearson correlation.

use serde::{Deserialize, Serialize};

use crate::model::{ParameterDraws, percentile};

/// Tolerance on the pairwise-r-squared accounting identity.
const ACCOUNTING_TOLERANCE: f64 = 0.25;

/// Expected total of pairwise r-squared values including the output's
/// self-correlation, when a single independent driver dominates.
const ACCOUNTING_TOTAL: f64 = 2.0;

/// One ranked input parameter's share of output variance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VarianceContribution {
    pub parameter: String,
    /// Share of summed input r-squared, as a percentage.
    pub contribution_pct: f64,
    pub r_squared: f64,
    /// 10th/50th/90th percentile of the parameter's sampled values.
    pub p10: f64,
    pub p50: f64,
    pub p90: f64,
}

/// Result of correlating every sampled input against one output metric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VarianceAnalysis {
    /// Top contributors, highest share first.
    pub contributions: Vec<VarianceContribution>,
    /// Sum of pairwise r-squared values, output self-correlation included.
    pub total_r_squared: f64,
    /// Whether `total_r_squared` is within tolerance of the expected 2.0.
    ///
    /// The pairwise accounting double-counts through the output column, so
    /// the identity is a self-consistency diagnostic, not a statistical
    /// target; callers should surface a warning when this is false.
    pub accounting_consistent: bool,
    /// Input columns dropped because they had no variance across iterations.
    pub dropped_constant: Vec<String>,
}

/// Rank sampled inputs by their correlation with the output metric.
///
/// Constant columns are dropped before correlating (zero variance would
/// produce NaN correlations). Contributions are normalized over the
/// surviving inputs so a single perfectly correlated input reads 100%.
#[must_use]
pub fn variance_contributions(
    draws: &ParameterDraws,
    output: &[f64],
    top_k: usize,
) -> VarianceAnalysis {
    let mut dropped_constant = Vec::new();

    if sample_variance(output) == 0.0 {
        // Output never moved: nothing to attribute.
        return VarianceAnalysis {
            contributions: Vec::new(),
            total_r_squared: 0.0,
            accounting_consistent: false,
            dropped_constant,
        };
    }

    let mut scored: Vec<(usize, f64)> = Vec::new();
    for (index, values) in draws.values.iter().enumerate() {
        if sample_variance(values) == 0.0 {
            dropped_constant.push(draws.names[index].clone());
            continue;
        }
        let r = pearson(values, output);
        scored.push((index, r * r));
    }

    let input_total: f64 = scored.iter().map(|(_, r2)| r2).sum();
    // The output column correlates with itself at r = 1 exactly, hence the
    // +1 in the running total that the ~2.0 identity checks.
    let total_r_squared = input_total + 1.0;

    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    let contributions = scored
        .into_iter()
        .take(top_k)
        .map(|(index, r_squared)| {
            let values = &draws.values[index];
            VarianceContribution {
                parameter: draws.names[index].clone(),
                contribution_pct: if input_total > 0.0 {
                    r_squared / input_total * 100.0
                } else {
                    0.0
                },
                r_squared,
                p10: percentile(values, 0.10),
                p50: percentile(values, 0.50),
                p90: percentile(values, 0.90),
            }
        })
        .collect();

    VarianceAnalysis {
        contributions,
        total_r_squared,
        accounting_consistent: (total_r_squared - ACCOUNTING_TOTAL).abs() <= ACCOUNTING_TOLERANCE,
        dropped_constant,
    }
}

fn sample_variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64
}

/// Pearson correlation; zero when either series has no variance.
fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 {
        return 0.0;
    }
    let x = &x[..n];
    let y = &y[..n];

    let mean_x = x.iter().sum::<f64>() / n as f64;
    let mean_y = y.iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in x.iter().zip(y) {
        cov += (a - mean_x) * (b - mean_y);
        var_x += (a - mean_x).powi(2);
        var_y += (b - mean_y).powi(2);
    }

    if var_x == 0.0 || var_y == 0.0 {
        return 0.0;
    }
    cov / (var_x * var_y).sqrt()
}
