//! Yield series loading
//!
//! The yield simulation exports `timestamp,energy_kwh` rows; timestamps are
//! civil datetimes (no zone), energy is the interval's delivered kWh.

use std::path::Path;

use solarcost_core::error::SchemaError;
use solarcost_core::model::YieldSeries;

use super::LoadError;

const TABLE: &str = "yields";

/// Load a yield series from a `timestamp,energy_kwh` CSV.
pub fn load_yields(path: &Path) -> Result<YieldSeries, LoadError> {
    let mut reader = csv::Reader::from_path(path)?;

    let headers = reader.headers()?.clone();
    for (expected, actual) in ["timestamp", "energy_kwh"].iter().zip(headers.iter()) {
        if *expected != actual.trim() {
            return Err(SchemaError::UnclassifiedColumn {
                table: TABLE.to_string(),
                column: actual.trim().to_string(),
            }
            .into());
        }
    }
    if headers.len() < 2 {
        return Err(SchemaError::MissingColumn {
            table: TABLE.to_string(),
            column: "energy_kwh".to_string(),
        }
        .into());
    }

    let mut points = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let timestamp_cell = record.get(0).unwrap_or("").trim();
        let energy_cell = record.get(1).unwrap_or("").trim();

        let timestamp: jiff::civil::DateTime = timestamp_cell.parse().map_err(|_| {
            invalid_cell(row, "timestamp", format!("'{timestamp_cell}' is not a datetime"))
        })?;
        let energy_kwh: f64 = energy_cell.parse().map_err(|_| {
            invalid_cell(row, "energy_kwh", format!("'{energy_cell}' is not a number"))
        })?;

        points.push((timestamp, energy_kwh));
    }

    Ok(YieldSeries::new(points))
}

fn invalid_cell(row: usize, column: &str, message: String) -> LoadError {
    SchemaError::InvalidCell {
        table: TABLE.to_string(),
        column: column.to_string(),
        row,
        message,
    }
    .into()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_load_and_aggregate_by_year() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("yields.csv");
        fs::write(
            &path,
            "timestamp,energy_kwh\n\
             2024-01-01T12:00:00,500\n\
             2024-06-01T12:00:00,700\n\
             2025-01-01T12:00:00,550\n",
        )
        .unwrap();

        let series = load_yields(&path).unwrap();
        assert_eq!(series.len(), 3);

        let annual = series.annual_energy_kwh();
        assert_eq!(annual[&2024], 1200.0);
        assert_eq!(annual[&2025], 550.0);
    }

    #[test]
    fn test_wrong_header_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("yields.csv");
        fs::write(&path, "time,power_kw\n2024-01-01T12:00:00,500\n").unwrap();

        let result = load_yields(&path);
        assert!(matches!(result, Err(LoadError::Schema(_))));
    }

    #[test]
    fn test_bad_timestamp_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("yields.csv");
        fs::write(&path, "timestamp,energy_kwh\nyesterday,500\n").unwrap();

        let result = load_yields(&path);
        assert!(matches!(
            result,
            Err(LoadError::Schema(SchemaError::InvalidCell { row: 0, .. }))
        ));
    }
}
