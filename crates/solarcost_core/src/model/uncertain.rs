//! Uncertain parameter values
//!
//! An `Uncertain` replaces the `<name>` / `<name>_L` / `<name>_H` /
//! `<name>_D` column groups of the relational cost database with one typed
//! value: a nominal estimate plus low/high bounds and a distribution family.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{SampleError, ScheduleWarning};
use crate::sampler;

/// How a bound ratio counts as "suspiciously far" from nominal
const FAR_BOUND_RATIO: f64 = 3.0;

/// Distribution family for an uncertain parameter.
///
/// Only the two-piece log-normal is implemented; any other family named in
/// input data is rejected at parse time rather than silently mis-sampled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Distribution {
    #[default]
    TwoPieceLogNormal,
}

impl Distribution {
    /// Parse a distribution name from a `<name>_D` cell.
    pub fn parse(name: &str) -> Result<Self, SampleError> {
        match name.trim() {
            "" | "TwoPieceLogNormal" | "two-piece log-normal" => {
                Ok(Distribution::TwoPieceLogNormal)
            }
            other => Err(SampleError::UnsupportedDistribution(other.to_string())),
        }
    }
}

/// A parameter with a nominal value and optional spread.
///
/// A fixed value is represented as `low == nominal == high`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Uncertain {
    pub nominal: f64,
    pub low: f64,
    pub high: f64,
    #[serde(default)]
    pub distribution: Distribution,
}

impl Uncertain {
    /// A value with no spread; sampling always returns `value`.
    #[must_use]
    pub fn fixed(value: f64) -> Self {
        Self {
            nominal: value,
            low: value,
            high: value,
            distribution: Distribution::default(),
        }
    }

    /// A value sampled between `low` and `high` (~10th/90th percentile bounds).
    #[must_use]
    pub fn with_bounds(nominal: f64, low: f64, high: f64) -> Self {
        Self {
            nominal,
            low,
            high,
            distribution: Distribution::default(),
        }
    }

    /// True when the bounds carry no spread around the nominal value.
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        self.low == self.nominal && self.high == self.nominal
    }

    /// Bound sanity checks, applied before any sampling.
    ///
    /// Fixes what it safely can (swapped bounds, zero bounds) and reports
    /// everything it found. `field` names the parameter in warnings, e.g.
    /// `"Component 4 BaselineCost"`.
    pub fn normalize(&mut self, field: &str) -> Vec<ScheduleWarning> {
        let mut warnings = Vec::new();

        if self.low > self.high {
            warnings.push(ScheduleWarning::BoundsSwapped {
                field: field.to_string(),
                low: self.low,
                high: self.high,
            });
            std::mem::swap(&mut self.low, &mut self.high);
        }

        if self.low == 0.0 && self.high == 0.0 && self.nominal != 0.0 {
            warnings.push(ScheduleWarning::DegenerateBounds {
                field: field.to_string(),
                nominal: self.nominal,
            });
            self.low = self.nominal;
            self.high = self.nominal;
            return warnings;
        }

        if self.nominal < self.low || self.nominal > self.high {
            warnings.push(ScheduleWarning::BoundsExcludeNominal {
                field: field.to_string(),
                nominal: self.nominal,
                low: self.low,
                high: self.high,
            });
        }

        // Ratio checks are only meaningful for positive values, and the
        // lower ratio is skipped when low == 0 (would divide by zero).
        if self.nominal > 0.0 {
            let high_ratio = self.high / self.nominal;
            if high_ratio > FAR_BOUND_RATIO {
                warnings.push(ScheduleWarning::BoundsFarFromNominal {
                    field: field.to_string(),
                    ratio: high_ratio,
                });
            }
            if self.low > 0.0 {
                let low_ratio = self.nominal / self.low;
                if low_ratio > FAR_BOUND_RATIO {
                    warnings.push(ScheduleWarning::BoundsFarFromNominal {
                        field: field.to_string(),
                        ratio: low_ratio,
                    });
                }
            }
        }

        warnings
    }

    /// Draw one value from this parameter's distribution.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self.distribution {
            Distribution::TwoPieceLogNormal => {
                sampler::two_piece_lognormal(rng, self.nominal, self.low, self.high)
            }
        }
    }
}
