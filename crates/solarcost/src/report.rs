//! Plain-text run report printed to stdout.

use solarcost_core::analysis::VarianceAnalysis;
use solarcost_core::model::AnalysisResult;

/// Print percentile summaries and variance rankings for every scenario.
pub fn print_report(result: &AnalysisResult, variance: &[(String, VarianceAnalysis)]) {
    let num_iterations = result.draws.num_iterations();
    println!("Monte Carlo cost analysis: {num_iterations} iterations");
    println!();

    println!(
        "{:<24} {:>14} {:>14} {:>14} {:>10} {:>10} {:>10}",
        "Scenario", "NPV P10", "NPV P50", "NPV P90", "LCOE P10", "LCOE P50", "LCOE P90"
    );
    for summary in result.summaries() {
        println!(
            "{:<24} {:>14.0} {:>14.0} {:>14.0} {:>10.2} {:>10.2} {:>10.2}",
            summary.name,
            summary.npv_p10,
            summary.npv_p50,
            summary.npv_p90,
            summary.lcoe_p10,
            summary.lcoe_p50,
            summary.lcoe_p90,
        );
    }

    for failure in &result.failures {
        println!(
            "{:<24} FAILED at iteration {}: {}",
            failure.name, failure.iteration, failure.error
        );
    }

    for (name, analysis) in variance {
        println!();
        println!("Variance drivers for {name}:");
        println!(
            "  {:<32} {:>8} {:>10} {:>10} {:>10}",
            "Parameter", "Share", "P10", "P50", "P90"
        );
        for contribution in &analysis.contributions {
            println!(
                "  {:<32} {:>7.1}% {:>10.3} {:>10.3} {:>10.3}",
                contribution.parameter,
                contribution.contribution_pct,
                contribution.p10,
                contribution.p50,
                contribution.p90,
            );
        }
        if !analysis.dropped_constant.is_empty() {
            println!(
                "  (constant inputs dropped: {})",
                analysis.dropped_constant.join(", ")
            );
        }
    }
}
