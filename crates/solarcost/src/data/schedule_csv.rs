//! Cost schedule loading from a directory of CSV tables
//!
//! One file per relational table. Uncertain columns follow the
//! `<name>` / `<name>_L` / `<name>_H` / optional `<name>_D` convention:
//! the base column carries the nominal value, `_L`/`_H` the ~10th/90th
//! percentile bounds, `_D` the distribution family. Missing bound columns
//! mean the value is fixed.
//!
//! Header classification is strict: every header must be a known fixed
//! column or part of a known bound group, otherwise loading fails with
//! `SchemaError::UnclassifiedColumn`. A silently ignored column would mean
//! silently ignored uncertainty.

use std::path::Path;

use solarcost_core::error::SchemaError;
use solarcost_core::model::{
    Component, ComponentId, CostCategory, CostCategoryId, CostSchedule, Currency, CurrencyId,
    Distribution, InstallationTiming, Scenario, ScenarioId, ScenarioSystemId, ScenarioSystemLink,
    System, SystemComponentId, SystemComponentLink, SystemId, Uncertain,
};

use super::LoadError;

/// Load the full cost schedule from `dir`.
///
/// Expects `scenarios.csv`, `scenario_systems.csv`, `systems.csv`,
/// `system_components.csv`, `components.csv`, `currencies.csv`, and
/// `cost_categories.csv`. The result is schema-checked here but not
/// validated; callers run [`CostSchedule::validate`] before analysis.
pub fn load_schedule(dir: &Path) -> Result<CostSchedule, LoadError> {
    let mut schedule = CostSchedule::default();

    let scenarios = Table::open(dir, "scenarios.csv", &["ID", "Name", "Tag"], &[])?;
    for row in 0..scenarios.num_rows() {
        let id = ScenarioId(scenarios.parse_u32(row, "ID")?);
        let scenario = Scenario {
            id,
            name: scenarios.get(row, "Name")?.to_string(),
            tag: scenarios.get(row, "Tag")?.to_string(),
        };
        if schedule.scenarios.insert(id, scenario).is_some() {
            return Err(scenarios.duplicate(id.0));
        }
    }

    let systems = Table::open(dir, "systems.csv", &["ID", "Name"], &[])?;
    for row in 0..systems.num_rows() {
        let id = SystemId(systems.parse_u32(row, "ID")?);
        let system = System {
            id,
            name: systems.get(row, "Name")?.to_string(),
        };
        if schedule.systems.insert(id, system).is_some() {
            return Err(systems.duplicate(id.0));
        }
    }

    let currencies = Table::open(dir, "currencies.csv", &["ID", "Code"], &["To_AUD"])?;
    for row in 0..currencies.num_rows() {
        let id = CurrencyId(currencies.parse_u32(row, "ID")?);
        let currency = Currency {
            id,
            code: currencies.get(row, "Code")?.to_string(),
            to_aud: currencies.parse_uncertain(row, "To_AUD")?,
        };
        if schedule.currencies.insert(id, currency).is_some() {
            return Err(currencies.duplicate(id.0));
        }
    }

    let categories = Table::open(dir, "cost_categories.csv", &["ID", "ShortName"], &[])?;
    for row in 0..categories.num_rows() {
        let id = CostCategoryId(categories.parse_u32(row, "ID")?);
        let category = CostCategory {
            id,
            short_name: categories.get(row, "ShortName")?.to_string(),
        };
        if schedule.cost_categories.insert(id, category).is_some() {
            return Err(categories.duplicate(id.0));
        }
    }

    let components = Table::open(
        dir,
        "components.csv",
        &["ID", "Name", "CurrencyID", "BaselineYear"],
        &["BaselineCost", "AnnualMultiplier"],
    )?;
    for row in 0..components.num_rows() {
        let id = ComponentId(components.parse_u32(row, "ID")?);
        let component = Component {
            id,
            name: components.get(row, "Name")?.to_string(),
            currency_id: CurrencyId(components.parse_u32(row, "CurrencyID")?),
            baseline_cost: components.parse_uncertain(row, "BaselineCost")?,
            baseline_year: components.parse_i32(row, "BaselineYear")?,
            annual_multiplier: components.parse_uncertain(row, "AnnualMultiplier")?,
        };
        if schedule.components.insert(id, component).is_some() {
            return Err(components.duplicate(id.0));
        }
    }

    let links = Table::open(
        dir,
        "system_components.csv",
        &["ID", "SystemID", "ComponentID", "Timing", "CostCategoryID"],
        &["Usage"],
    )?;
    for row in 0..links.num_rows() {
        let timing_cell = links.get(row, "Timing")?;
        let timing = InstallationTiming::parse(timing_cell).ok_or_else(|| {
            links.invalid_cell(row, "Timing", format!("unknown timing '{timing_cell}'"))
        })?;
        schedule.system_components.push(SystemComponentLink {
            id: SystemComponentId(links.parse_u32(row, "ID")?),
            system_id: SystemId(links.parse_u32(row, "SystemID")?),
            component_id: ComponentId(links.parse_u32(row, "ComponentID")?),
            usage: links.parse_uncertain(row, "Usage")?,
            timing,
            cost_category_id: CostCategoryId(links.parse_u32(row, "CostCategoryID")?),
        });
    }

    let installs = Table::open(
        dir,
        "scenario_systems.csv",
        &["ID", "ScenarioID", "SystemID", "InstallYear"],
        &["InstallNumber"],
    )?;
    for row in 0..installs.num_rows() {
        schedule.scenario_systems.push(ScenarioSystemLink {
            id: ScenarioSystemId(installs.parse_u32(row, "ID")?),
            scenario_id: ScenarioId(installs.parse_u32(row, "ScenarioID")?),
            system_id: SystemId(installs.parse_u32(row, "SystemID")?),
            install_number: installs.parse_uncertain(row, "InstallNumber")?,
            install_year: installs.parse_i32(row, "InstallYear")?,
        });
    }

    Ok(schedule)
}

/// One loaded CSV table with strict, classified headers.
struct Table {
    name: String,
    headers: Vec<String>,
    records: Vec<csv::StringRecord>,
}

impl Table {
    /// Read `file` under `dir` and classify every header.
    ///
    /// `fixed` names plain columns; `uncertain` names bound groups whose
    /// base column is required and whose `_L`/`_H`/`_D` columns are
    /// optional.
    fn open(
        dir: &Path,
        file: &str,
        fixed: &[&str],
        uncertain: &[&str],
    ) -> Result<Self, LoadError> {
        let name = file.trim_end_matches(".csv").to_string();
        let mut reader = csv::Reader::from_path(dir.join(file))?;

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        for header in &headers {
            let known = fixed.contains(&header.as_str())
                || uncertain.contains(&header.as_str())
                || uncertain.iter().any(|base| {
                    ["_L", "_H", "_D"]
                        .iter()
                        .any(|suffix| header == &format!("{base}{suffix}"))
                });
            if !known {
                return Err(SchemaError::UnclassifiedColumn {
                    table: name,
                    column: header.clone(),
                }
                .into());
            }
        }
        for required in fixed.iter().chain(uncertain) {
            if !headers.iter().any(|h| h == required) {
                return Err(SchemaError::MissingColumn {
                    table: name,
                    column: (*required).to_string(),
                }
                .into());
            }
        }

        let records = reader.records().collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            name,
            headers,
            records,
        })
    }

    fn num_rows(&self) -> usize {
        self.records.len()
    }

    fn column(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column)
    }

    fn get(&self, row: usize, column: &str) -> Result<&str, LoadError> {
        let index = self.column(column).ok_or_else(|| SchemaError::MissingColumn {
            table: self.name.clone(),
            column: column.to_string(),
        })?;
        Ok(self.records[row].get(index).unwrap_or("").trim())
    }

    /// Optional cell access for bound columns; `None` when the column is
    /// absent or the cell is blank.
    fn get_optional(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.column(column)?;
        let cell = self.records[row].get(index)?.trim();
        (!cell.is_empty()).then_some(cell)
    }

    fn parse_u32(&self, row: usize, column: &str) -> Result<u32, LoadError> {
        let cell = self.get(row, column)?;
        cell.parse()
            .map_err(|_| self.invalid_cell(row, column, format!("'{cell}' is not an integer")))
    }

    fn parse_i32(&self, row: usize, column: &str) -> Result<i32, LoadError> {
        let cell = self.get(row, column)?;
        cell.parse()
            .map_err(|_| self.invalid_cell(row, column, format!("'{cell}' is not a year")))
    }

    fn parse_f64_cell(&self, row: usize, column: &str, cell: &str) -> Result<f64, LoadError> {
        cell.parse()
            .map_err(|_| self.invalid_cell(row, column, format!("'{cell}' is not a number")))
    }

    /// Assemble an `Uncertain` from a bound group. Missing or blank bound
    /// cells default to the nominal value (fixed).
    fn parse_uncertain(&self, row: usize, base: &str) -> Result<Uncertain, LoadError> {
        let nominal = {
            let cell = self.get(row, base)?;
            self.parse_f64_cell(row, base, cell)?
        };

        let low_column = format!("{base}_L");
        let low = match self.get_optional(row, &low_column) {
            Some(cell) => self.parse_f64_cell(row, &low_column, cell)?,
            None => nominal,
        };
        let high_column = format!("{base}_H");
        let high = match self.get_optional(row, &high_column) {
            Some(cell) => self.parse_f64_cell(row, &high_column, cell)?,
            None => nominal,
        };

        let distribution = match self.get_optional(row, &format!("{base}_D")) {
            Some(cell) => Distribution::parse(cell)?,
            None => Distribution::default(),
        };

        Ok(Uncertain {
            nominal,
            low,
            high,
            distribution,
        })
    }

    fn invalid_cell(&self, row: usize, column: &str, message: String) -> LoadError {
        SchemaError::InvalidCell {
            table: self.name.clone(),
            column: column.to_string(),
            row,
            message,
        }
        .into()
    }

    fn duplicate(&self, id: u32) -> LoadError {
        SchemaError::DuplicateId {
            table: self.name.clone(),
            id,
        }
        .into()
    }
}
