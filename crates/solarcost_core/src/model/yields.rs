//! Simulated energy yield input
//!
//! The yield simulator is an external collaborator; all the costing pipeline
//! needs from it is a timestamped energy series that can be summed by
//! calendar year.

use std::collections::BTreeMap;

use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

/// A time-indexed energy series in kWh per interval.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct YieldSeries {
    points: Vec<(DateTime, f64)>,
}

impl YieldSeries {
    #[must_use]
    pub fn new(points: Vec<(DateTime, f64)>) -> Self {
        Self { points }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Total energy per calendar year, in kWh, ordered by year.
    #[must_use]
    pub fn annual_energy_kwh(&self) -> BTreeMap<i32, f64> {
        let mut totals: BTreeMap<i32, f64> = BTreeMap::new();
        for (timestamp, energy) in &self.points {
            *totals.entry(i32::from(timestamp.year())).or_insert(0.0) += energy;
        }
        totals
    }
}
