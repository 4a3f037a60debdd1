//! Solar farm cost analysis library
//!
//! This crate provides a Monte Carlo techno-economic analysis engine for
//! utility-scale solar farm designs. It supports:
//! - A relational cost schedule (scenarios, systems, components, currencies)
//! - Bounded-uncertain parameters sampled from a two-piece log-normal
//! - Usage and cost projection over a multi-decade year range
//! - Per-scenario NPV and LCOE distributions against a measured yield series
//! - Variance-contribution ranking of the uncertain inputs
//!
//! # Builder DSL
//!
//! Use the fluent builder API for ergonomic schedule setup:
//!
//! ```ignore
//! use solarcost_core::config::ScheduleBuilder;
//! use solarcost_core::model::{InstallationTiming, Uncertain};
//!
//! let schedule = ScheduleBuilder::new()
//!     .currency(1, "AUD", Uncertain::fixed(1.0))
//!     .cost_category(1, "CAPEX")
//!     .component(10, "SAT rack", 1, Uncertain::with_bounds(100.0, 80.0, 130.0), 2025,
//!         Uncertain::fixed(1.02))
//!     .system(1, "Array block")
//!     .component_link(1, 1, 10, Uncertain::fixed(50.0), InstallationTiming::Installation, 1)
//!     .scenario(1, "MAV 2028", "mav")
//!     .install(1, 1, 1, Uncertain::fixed(4.0), 2028)
//!     .build();
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod analysis;
pub mod cashflow;
pub mod error;
pub mod finance;
pub mod iterations;
pub mod projector;
pub mod sampler;
pub mod simulation;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use config::{RunConfig, ScheduleBuilder};
pub use model::{AnalysisResult, CostSchedule, Uncertain, YieldSeries};
pub use simulation::run_analysis;
