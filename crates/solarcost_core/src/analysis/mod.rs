//! Post-run sensitivity analysis
//!
//! Correlates the sampled input parameters of a Monte Carlo run against a
//! computed output metric (per-scenario NPV) to rank which uncertain inputs
//! drive output variance.

mod variance;

pub use variance::*;
