//! Integration tests for the solar cost analysis engine
//!
//! Tests are organized by topic:
//! - `sampler` - Two-piece log-normal draw statistics
//! - `iterations` - Iteration table generation and determinism
//! - `projector` - Usage and cost projection rules
//! - `cashflow` - Usage/cost joining and scenario pivoting
//! - `finance` - Discounting, NPV, LCOE, and energy alignment
//! - `variance` - Variance-contribution ranking
//! - `builder_dsl` - Schedule builder and validation
//! - `analysis_run` - End-to-end Monte Carlo runs

mod builder_dsl;
mod cashflow;
mod finance;
mod iterations;
mod variance;

use crate::config::ScheduleBuilder;
use crate::model::{CostSchedule, InstallationTiming, Uncertain, YieldSeries};

/// A minimal two-scenario schedule shared by several test modules.
///
/// Scenario 1 installs 10 array blocks in 2025; scenario 2 installs 20 in
/// 2026. Each block uses 5 racks (one-time) and 2 service visits per
/// operating year.
pub(crate) fn demo_schedule() -> CostSchedule {
    ScheduleBuilder::new()
        .currency(1, "AUD", Uncertain::fixed(1.0))
        .currency(2, "USD", Uncertain::with_bounds(1.5, 1.4, 1.7))
        .cost_category(1, "CAPEX")
        .cost_category(2, "OPEX")
        .component(
            10,
            "SAT rack",
            2,
            Uncertain::with_bounds(100.0, 80.0, 130.0),
            2025,
            Uncertain::fixed(1.02),
        )
        .component(
            11,
            "Service visit",
            1,
            Uncertain::fixed(40.0),
            2025,
            Uncertain::fixed(1.0),
        )
        .system(1, "Array block")
        .component_link(
            1,
            1,
            10,
            Uncertain::fixed(5.0),
            InstallationTiming::Installation,
            1,
        )
        .component_link(
            2,
            1,
            11,
            Uncertain::fixed(2.0),
            InstallationTiming::PerOperationYear,
            2,
        )
        .scenario(1, "MAV 2025", "mav")
        .scenario(2, "SAT 2026", "sat")
        .install(1, 1, 1, Uncertain::fixed(10.0), 2025)
        .install(2, 2, 1, Uncertain::fixed(20.0), 2026)
        .build()
}

/// One year of hourly-ish yield data, collapsed to four points for brevity.
pub(crate) fn demo_yields() -> YieldSeries {
    YieldSeries::new(vec![
        (jiff::civil::date(2024, 1, 1).at(12, 0, 0, 0), 500_000.0),
        (jiff::civil::date(2024, 6, 1).at(12, 0, 0, 0), 700_000.0),
        (jiff::civil::date(2025, 1, 1).at(12, 0, 0, 0), 550_000.0),
        (jiff::civil::date(2025, 6, 1).at(12, 0, 0, 0), 650_000.0),
    ])
}
