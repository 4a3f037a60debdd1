//! Run configuration
//!
//! `RunConfig` carries everything about a run that is not part of the cost
//! schedule itself: the analysis window, discounting assumptions, iteration
//! counts, and the optional yield uncertainty. It deserializes from the
//! front-end's YAML run file; every field except the year range has a
//! sensible default.

use serde::{Deserialize, Serialize};

use crate::model::Uncertain;

pub mod builder;

pub use builder::ScheduleBuilder;

fn default_discount_rate() -> f64 {
    0.07
}

fn default_num_iterations() -> usize {
    500
}

fn default_energy_price() -> f64 {
    60.0
}

fn default_variance_top_k() -> usize {
    10
}

/// Configuration for one Monte Carlo analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// First year of the analysis window, inclusive.
    pub year_start: i32,
    /// Last year of the analysis window, inclusive.
    pub year_end: i32,

    /// Annual discount rate applied to both costs and energy.
    #[serde(default = "default_discount_rate")]
    pub discount_rate: f64,

    /// Number of iterations in this run's batch.
    #[serde(default = "default_num_iterations")]
    pub num_iterations: usize,

    /// Global index of the first iteration. Batches of the same seed can be
    /// split across runs; iteration 0 is always the nominal baseline.
    #[serde(default)]
    pub iteration_start: u32,

    /// First year the farm earns revenue. Years before it carry costs but no
    /// energy income. `None` means revenue from `year_start`.
    #[serde(default)]
    pub revenue_start_year: Option<i32>,

    /// Flat electricity price used to turn delivered MWh into revenue.
    #[serde(default = "default_energy_price")]
    pub energy_price_aud_per_mwh: f64,

    /// Optional uncertainty on the annual energy series. When set and not
    /// fixed, it is drawn per iteration and recorded as "YieldMultiplier".
    #[serde(default)]
    pub yield_multiplier: Option<Uncertain>,

    /// How many ranked parameters the variance analysis reports.
    #[serde(default = "default_variance_top_k")]
    pub variance_top_k: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            year_start: 2025,
            year_end: 2054,
            discount_rate: default_discount_rate(),
            num_iterations: default_num_iterations(),
            iteration_start: 0,
            revenue_start_year: None,
            energy_price_aud_per_mwh: default_energy_price(),
            yield_multiplier: None,
            variance_top_k: default_variance_top_k(),
        }
    }
}

impl RunConfig {
    #[must_use]
    pub fn new(year_start: i32, year_end: i32) -> Self {
        Self {
            year_start,
            year_end,
            ..Self::default()
        }
    }

    /// Create a variant with a different iteration count.
    #[must_use]
    pub fn with_iterations(&self, num_iterations: usize) -> Self {
        let mut config = self.clone();
        config.num_iterations = num_iterations;
        config
    }

    #[must_use]
    pub fn years(&self) -> std::ops::RangeInclusive<i32> {
        self.year_start..=self.year_end
    }
}
