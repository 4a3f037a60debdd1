//! CSV export for analysis results.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use solarcost_core::analysis::VarianceAnalysis;
use solarcost_core::model::ScenarioSeries;

const NPV_LCOE_HEADER: &str = "iteration,npv_aud,lcoe_aud_per_mwh";
const VARIANCE_HEADER: &str = "parameter,contribution_pct,r_squared,p10,p50,p90";

/// Turn a scenario name into a filesystem-safe file-name fragment.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Exports one scenario's per-iteration NPV/LCOE series to a CSV file.
pub fn export_npv_lcoe(
    series: &ScenarioSeries,
    iteration_start: u32,
    path: &Path,
) -> io::Result<()> {
    let file = File::create(path)?;
    write_npv_lcoe(series, iteration_start, io::BufWriter::new(file))
}

/// Writes one scenario's per-iteration NPV/LCOE series as CSV.
///
/// One row per iteration, carrying the global iteration index so batched
/// runs can be concatenated. Produces deterministic output for identical
/// inputs.
pub fn write_npv_lcoe(
    series: &ScenarioSeries,
    iteration_start: u32,
    writer: impl Write,
) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(NPV_LCOE_HEADER.split(','))?;
    for (offset, (npv, lcoe)) in series.npv.iter().zip(&series.lcoe).enumerate() {
        wtr.write_record(&[
            (iteration_start + offset as u32).to_string(),
            format!("{npv:.2}"),
            format!("{lcoe:.4}"),
        ])?;
    }

    wtr.flush()
}

/// Exports a variance-contribution ranking to a CSV file.
pub fn export_variance(analysis: &VarianceAnalysis, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_variance(analysis, io::BufWriter::new(file))
}

/// Writes a variance-contribution ranking as CSV, highest share first.
pub fn write_variance(analysis: &VarianceAnalysis, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(VARIANCE_HEADER.split(','))?;
    for contribution in &analysis.contributions {
        wtr.write_record(&[
            contribution.parameter.clone(),
            format!("{:.2}", contribution.contribution_pct),
            format!("{:.4}", contribution.r_squared),
            format!("{:.4}", contribution.p10),
            format!("{:.4}", contribution.p50),
            format!("{:.4}", contribution.p90),
        ])?;
    }

    wtr.flush()
}

#[cfg(test)]
mod tests {
    use solarcost_core::model::{ParameterDraws, ScenarioId};

    use super::*;

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("MAV 2028 (rev B)"), "mav_2028__rev_b_");
        assert_eq!(sanitize_name("plain"), "plain");
    }

    #[test]
    fn test_npv_lcoe_round_trip() {
        let series = ScenarioSeries {
            scenario_id: ScenarioId(1),
            name: "MAV 2028".to_string(),
            npv: vec![-1000.5, 2000.25],
            lcoe: vec![55.1234, 48.9],
        };

        let mut buffer = Vec::new();
        write_npv_lcoe(&series, 10, &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("iteration,npv_aud,lcoe_aud_per_mwh"));
        assert_eq!(lines.next(), Some("10,-1000.50,55.1234"));
        assert_eq!(lines.next(), Some("11,2000.25,48.9000"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_variance_export_writes_ranked_rows() {
        let draws = ParameterDraws {
            names: vec!["Component 10 BaselineCost".to_string()],
            values: vec![vec![1.0, 2.0, 3.0, 4.0, 5.0]],
        };
        let output = vec![2.0, 4.0, 6.0, 8.0, 10.0];
        let analysis =
            solarcost_core::analysis::variance_contributions(&draws, &output, 10);

        let mut buffer = Vec::new();
        write_variance(&analysis, &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("parameter,contribution_pct,r_squared,p10,p50,p90")
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("Component 10 BaselineCost,100.00,1.0000"));
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("npv_lcoe_test.csv");
        let series = ScenarioSeries {
            scenario_id: ScenarioId(1),
            name: "Test".to_string(),
            npv: vec![1.0],
            lcoe: vec![2.0],
        };

        export_npv_lcoe(&series, 0, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("0,1.00,2.0000"));
    }
}
