use std::fmt;

use crate::model::{
    ComponentId, CostCategoryId, CurrencyId, ScenarioId, ScenarioSystemId, SystemComponentId,
    SystemId,
};

/// Errors related to foreign-key lookups between schedule tables
#[derive(Debug, Clone, PartialEq)]
pub enum LookupError {
    ScenarioNotFound(ScenarioId),
    SystemNotFound(SystemId),
    ComponentNotFound(ComponentId),
    CurrencyNotFound(CurrencyId),
    CostCategoryNotFound(CostCategoryId),
    /// A usage row referenced a component-year with no projected cost.
    /// The cost table is built for every component over the full year range,
    /// so this indicates an inconsistent sampled schedule.
    CostNotProjected { component_id: ComponentId, year: i32 },
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::ScenarioNotFound(id) => write!(f, "scenario {id:?} not found"),
            LookupError::SystemNotFound(id) => write!(f, "system {id:?} not found"),
            LookupError::ComponentNotFound(id) => write!(f, "component {id:?} not found"),
            LookupError::CurrencyNotFound(id) => write!(f, "currency {id:?} not found"),
            LookupError::CostCategoryNotFound(id) => {
                write!(f, "cost category {id:?} not found")
            }
            LookupError::CostNotProjected { component_id, year } => {
                write!(f, "no projected cost for component {component_id:?} in year {year}")
            }
        }
    }
}

impl std::error::Error for LookupError {}

/// Errors raised when input tables cannot be mapped onto the schedule schema.
///
/// These are hard failures: a column that cannot be classified as fixed or
/// bounded would silently corrupt every downstream draw if ignored.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaError {
    UnclassifiedColumn { table: String, column: String },
    MissingColumn { table: String, column: String },
    InvalidCell {
        table: String,
        column: String,
        row: usize,
        message: String,
    },
    DuplicateId { table: String, id: u32 },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::UnclassifiedColumn { table, column } => {
                write!(
                    f,
                    "table '{table}': column '{column}' is neither a known field nor part of a \
                     low/high/distribution bound group"
                )
            }
            SchemaError::MissingColumn { table, column } => {
                write!(f, "table '{table}': required column '{column}' is missing")
            }
            SchemaError::InvalidCell {
                table,
                column,
                row,
                message,
            } => {
                write!(f, "table '{table}' row {row}, column '{column}': {message}")
            }
            SchemaError::DuplicateId { table, id } => {
                write!(f, "table '{table}': duplicate id {id}")
            }
        }
    }
}

impl std::error::Error for SchemaError {}

/// Errors related to random sampling of uncertain parameters
#[derive(Debug, Clone, PartialEq)]
pub enum SampleError {
    /// A distribution family other than the two-piece log-normal was named.
    /// Unknown families must fail loudly rather than silently mis-sample.
    UnsupportedDistribution(String),
}

impl fmt::Display for SampleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleError::UnsupportedDistribution(name) => {
                write!(f, "unsupported distribution family '{name}'")
            }
        }
    }
}

impl std::error::Error for SampleError {}

/// Errors from discounting and LCOE calculations
#[derive(Debug, Clone, PartialEq)]
pub enum FinanceError {
    /// Discounted energy summed to zero; LCOE is undefined, not infinite.
    UndefinedLcoe,
    /// The yield series produced no annual energy totals.
    EmptyEnergySeries,
}

impl fmt::Display for FinanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FinanceError::UndefinedLcoe => {
                write!(f, "discounted energy is zero, LCOE is undefined")
            }
            FinanceError::EmptyEnergySeries => write!(f, "yield series contains no energy data"),
        }
    }
}

impl std::error::Error for FinanceError {}

/// Errors from schedule validation (referential integrity plus schema checks)
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleError {
    Lookup(LookupError),
    Schema(SchemaError),
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleError::Lookup(e) => write!(f, "{e}"),
            ScheduleError::Schema(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ScheduleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScheduleError::Lookup(e) => Some(e),
            ScheduleError::Schema(e) => Some(e),
        }
    }
}

impl From<LookupError> for ScheduleError {
    fn from(e: LookupError) -> Self {
        ScheduleError::Lookup(e)
    }
}

impl From<SchemaError> for ScheduleError {
    fn from(e: SchemaError) -> Self {
        ScheduleError::Schema(e)
    }
}

/// Top-level error for a Monte Carlo analysis run
#[derive(Debug, Clone, PartialEq)]
pub enum RunError {
    Schedule(ScheduleError),
    Lookup(LookupError),
    Sample(SampleError),
    /// The configured year range is empty
    InvalidYearRange { start: i32, end: i32 },
    /// The yield series could not be turned into annual revenue/energy
    Energy(FinanceError),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::Schedule(e) => write!(f, "{e}"),
            RunError::Lookup(e) => write!(f, "{e}"),
            RunError::Sample(e) => write!(f, "{e}"),
            RunError::InvalidYearRange { start, end } => {
                write!(f, "invalid year range: {start}..={end}")
            }
            RunError::Energy(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunError::Schedule(e) => Some(e),
            RunError::Lookup(e) => Some(e),
            RunError::Sample(e) => Some(e),
            RunError::Energy(e) => Some(e),
            RunError::InvalidYearRange { .. } => None,
        }
    }
}

impl From<ScheduleError> for RunError {
    fn from(e: ScheduleError) -> Self {
        RunError::Schedule(e)
    }
}

impl From<LookupError> for RunError {
    fn from(e: LookupError) -> Self {
        RunError::Lookup(e)
    }
}

impl From<SampleError> for RunError {
    fn from(e: SampleError) -> Self {
        RunError::Sample(e)
    }
}

/// Data-sanity findings that do not abort the run.
///
/// Callers decide how loud these should be: the CLI logs them, automated
/// regression tests can assert on them.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleWarning {
    /// Low and high bounds were inverted and have been swapped back.
    BoundsSwapped { field: String, low: f64, high: f64 },
    /// Nominal value falls outside the declared [low, high] interval.
    BoundsExcludeNominal {
        field: String,
        nominal: f64,
        low: f64,
        high: f64,
    },
    /// Both bounds were zero for a non-zero nominal; collapsed to no variance.
    DegenerateBounds { field: String, nominal: f64 },
    /// A bound sits more than 3x away from nominal, likely a data-entry error.
    BoundsFarFromNominal { field: String, ratio: f64 },
    /// A schedule table has no rows.
    EmptyTable { table: &'static str },
}

impl fmt::Display for ScheduleWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleWarning::BoundsSwapped { field, low, high } => {
                write!(f, "{field}: low {low} > high {high}, bounds swapped")
            }
            ScheduleWarning::BoundsExcludeNominal {
                field,
                nominal,
                low,
                high,
            } => {
                write!(f, "{field}: nominal {nominal} outside bounds [{low}, {high}]")
            }
            ScheduleWarning::DegenerateBounds { field, nominal } => {
                write!(
                    f,
                    "{field}: zero bounds with non-zero nominal {nominal}, treated as fixed"
                )
            }
            ScheduleWarning::BoundsFarFromNominal { field, ratio } => {
                write!(f, "{field}: bound is {ratio:.1}x away from nominal")
            }
            ScheduleWarning::EmptyTable { table } => write!(f, "table '{table}' has no rows"),
        }
    }
}
