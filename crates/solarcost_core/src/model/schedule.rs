//! The relational cost schedule
//!
//! Seven linked tables describe which components are installed in which
//! scenario and year, and what each one costs. Tables keyed by ID live in
//! `FxHashMap`s; the two many-to-many link tables are plain row vectors.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::error::{LookupError, ScheduleError, ScheduleWarning, SchemaError};
use crate::model::ids::{
    ComponentId, CostCategoryId, CurrencyId, ScenarioId, ScenarioSystemId, SystemComponentId,
    SystemId,
};
use crate::model::uncertain::Uncertain;

/// When a component's cost recurs within a scenario.
///
/// An exhaustive enum rather than a string tag: a new timing kind cannot be
/// silently ignored by a match arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstallationTiming {
    /// One-time cost, incurred only in the install year.
    Installation,
    /// Recurring cost, incurred every year strictly after the install year.
    PerOperationYear,
}

impl InstallationTiming {
    /// Parse the timing tag used by the cost database.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "Installation" => Some(InstallationTiming::Installation),
            "PerOperationYear" => Some(InstallationTiming::PerOperationYear),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            InstallationTiming::Installation => "Installation",
            InstallationTiming::PerOperationYear => "PerOperationYear",
        }
    }
}

/// One named configuration to be costed (e.g. "MAV 2028")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub id: ScenarioId,
    pub name: String,
    pub tag: String,
}

/// A scenario installs `install_number` units of a system in `install_year`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSystemLink {
    pub id: ScenarioSystemId,
    pub scenario_id: ScenarioId,
    pub system_id: SystemId,
    pub install_number: Uncertain,
    pub install_year: i32,
}

/// A purchasable sub-assembly (e.g. "SAT rack", "inverter")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct System {
    pub id: SystemId,
    pub name: String,
}

/// A component makes up part of a system, with a usage multiplier and timing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemComponentLink {
    pub id: SystemComponentId,
    pub system_id: SystemId,
    pub component_id: ComponentId,
    pub usage: Uncertain,
    pub timing: InstallationTiming,
    pub cost_category_id: CostCategoryId,
}

/// An individual cost line item with currency and inflation model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    pub id: ComponentId,
    pub name: String,
    pub currency_id: CurrencyId,
    pub baseline_cost: Uncertain,
    pub baseline_year: i32,
    /// Exponential inflation/deflation factor applied per year away from
    /// the baseline year.
    pub annual_multiplier: Uncertain,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Currency {
    pub id: CurrencyId,
    pub code: String,
    pub to_aud: Uncertain,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostCategory {
    pub id: CostCategoryId,
    pub short_name: String,
}

/// The full relational cost schedule, loaded once per run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CostSchedule {
    pub scenarios: FxHashMap<ScenarioId, Scenario>,
    pub scenario_systems: Vec<ScenarioSystemLink>,
    pub systems: FxHashMap<SystemId, System>,
    pub system_components: Vec<SystemComponentLink>,
    pub components: FxHashMap<ComponentId, Component>,
    pub currencies: FxHashMap<CurrencyId, Currency>,
    pub cost_categories: FxHashMap<CostCategoryId, CostCategory>,
}

impl CostSchedule {
    /// Check referential integrity and normalize all uncertain bounds.
    ///
    /// Dangling foreign keys and duplicate link IDs are hard errors — left
    /// alone they become NaNs in aggregate sums. Bound problems (swapped,
    /// degenerate, implausibly wide) are corrected where safe and returned
    /// as warnings for the caller to judge.
    pub fn validate(&mut self) -> Result<Vec<ScheduleWarning>, ScheduleError> {
        let mut warnings = Vec::new();

        for (table, empty) in [
            ("scenarios", self.scenarios.is_empty()),
            ("scenario_systems", self.scenario_systems.is_empty()),
            ("systems", self.systems.is_empty()),
            ("system_components", self.system_components.is_empty()),
            ("components", self.components.is_empty()),
            ("currencies", self.currencies.is_empty()),
        ] {
            if empty {
                warnings.push(ScheduleWarning::EmptyTable { table });
            }
        }

        let mut seen_links: FxHashSet<u32> = FxHashSet::default();
        for link in &self.scenario_systems {
            if !seen_links.insert(link.id.0) {
                return Err(SchemaError::DuplicateId {
                    table: "scenario_systems".to_string(),
                    id: link.id.0,
                }
                .into());
            }
            if !self.scenarios.contains_key(&link.scenario_id) {
                return Err(LookupError::ScenarioNotFound(link.scenario_id).into());
            }
            if !self.systems.contains_key(&link.system_id) {
                return Err(LookupError::SystemNotFound(link.system_id).into());
            }
        }

        seen_links.clear();
        for link in &self.system_components {
            if !seen_links.insert(link.id.0) {
                return Err(SchemaError::DuplicateId {
                    table: "system_components".to_string(),
                    id: link.id.0,
                }
                .into());
            }
            if !self.systems.contains_key(&link.system_id) {
                return Err(LookupError::SystemNotFound(link.system_id).into());
            }
            if !self.components.contains_key(&link.component_id) {
                return Err(LookupError::ComponentNotFound(link.component_id).into());
            }
            if !self.cost_categories.contains_key(&link.cost_category_id) {
                return Err(LookupError::CostCategoryNotFound(link.cost_category_id).into());
            }
        }

        for component in self.components.values() {
            if !self.currencies.contains_key(&component.currency_id) {
                return Err(LookupError::CurrencyNotFound(component.currency_id).into());
            }
        }

        for currency in self.currencies.values_mut() {
            let field = format!("Currency {} To_AUD", currency.id.0);
            warnings.extend(currency.to_aud.normalize(&field));
        }
        for component in self.components.values_mut() {
            let cost_field = format!("Component {} BaselineCost", component.id.0);
            warnings.extend(component.baseline_cost.normalize(&cost_field));
            let mult_field = format!("Component {} AnnualMultiplier", component.id.0);
            warnings.extend(component.annual_multiplier.normalize(&mult_field));
        }
        for link in &mut self.scenario_systems {
            let field = format!("ScenarioSystem {} InstallNumber", link.id.0);
            warnings.extend(link.install_number.normalize(&field));
        }
        for link in &mut self.system_components {
            let field = format!("SystemComponent {} Usage", link.id.0);
            warnings.extend(link.usage.normalize(&field));
        }

        Ok(warnings)
    }

    /// Scenario IDs in ascending order, for deterministic output.
    #[must_use]
    pub fn scenario_ids(&self) -> Vec<ScenarioId> {
        let mut ids: Vec<_> = self.scenarios.keys().copied().collect();
        ids.sort();
        ids
    }
}
