//! File loading and export for the CLI
//!
//! The cost schedule lives in a directory of CSVs (one file per relational
//! table), the yield series in a single CSV, and results go back out as
//! CSVs. All schema problems surface as typed errors before any analysis
//! runs.

pub mod export;
pub mod schedule_csv;
pub mod yields_csv;

use std::fmt;

use solarcost_core::error::{SampleError, SchemaError};

/// Error types for loading input files
#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Csv(csv::Error),
    Schema(SchemaError),
    Sample(SampleError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "IO error: {e}"),
            LoadError::Csv(e) => write!(f, "CSV error: {e}"),
            LoadError::Schema(e) => write!(f, "{e}"),
            LoadError::Sample(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Csv(e) => Some(e),
            LoadError::Schema(e) => Some(e),
            LoadError::Sample(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        LoadError::Io(e)
    }
}

impl From<csv::Error> for LoadError {
    fn from(e: csv::Error) -> Self {
        LoadError::Csv(e)
    }
}

impl From<SchemaError> for LoadError {
    fn from(e: SchemaError) -> Self {
        LoadError::Schema(e)
    }
}

impl From<SampleError> for LoadError {
    fn from(e: SampleError) -> Self {
        LoadError::Sample(e)
    }
}
