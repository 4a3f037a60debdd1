//! Schedule builder
//!
//! Fluent API for assembling a `CostSchedule` in code, mainly for tests and
//! embedded use where loading the relational tables from files would be
//! overkill.
//!
//! # Example
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

use crate::model::{
    Component, ComponentId, CostCategory, CostCategoryId, CostSchedule, Currency, CurrencyId,
    InstallationTiming, Scenario, ScenarioId, ScenarioSystemId, ScenarioSystemLink, System,
    SystemComponentId, SystemComponentLink, SystemId, Uncertain,
};

/// Builder for assembling cost schedules row by row.
#[derive(Debug, Clone, Default)]
pub struct ScheduleBuilder {
    schedule: CostSchedule,
}

impl ScheduleBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn currency(mut self, id: u32, code: &str, to_aud: Uncertain) -> Self {
        self.schedule.currencies.insert(
            CurrencyId(id),
            Currency {
                id: CurrencyId(id),
                code: code.to_string(),
                to_aud,
            },
        );
        self
    }

    #[must_use]
    pub fn cost_category(mut self, id: u32, short_name: &str) -> Self {
        self.schedule.cost_categories.insert(
            CostCategoryId(id),
            CostCategory {
                id: CostCategoryId(id),
                short_name: short_name.to_string(),
            },
        );
        self
    }

    #[must_use]
    pub fn component(
        mut self,
        id: u32,
        name: &str,
        currency_id: u32,
        baseline_cost: Uncertain,
        baseline_year: i32,
        annual_multiplier: Uncertain,
    ) -> Self {
        self.schedule.components.insert(
            ComponentId(id),
            Component {
                id: ComponentId(id),
                name: name.to_string(),
                currency_id: CurrencyId(currency_id),
                baseline_cost,
                baseline_year,
                annual_multiplier,
            },
        );
        self
    }

    #[must_use]
    pub fn system(mut self, id: u32, name: &str) -> Self {
        self.schedule.systems.insert(
            SystemId(id),
            System {
                id: SystemId(id),
                name: name.to_string(),
            },
        );
        self
    }

    /// Link a component into a system with a usage multiplier and timing.
    #[must_use]
    pub fn component_link(
        mut self,
        id: u32,
        system_id: u32,
        component_id: u32,
        usage: Uncertain,
        timing: InstallationTiming,
        cost_category_id: u32,
    ) -> Self {
        self.schedule.system_components.push(SystemComponentLink {
            id: SystemComponentId(id),
            system_id: SystemId(system_id),
            component_id: ComponentId(component_id),
            usage,
            timing,
            cost_category_id: CostCategoryId(cost_category_id),
        });
        self
    }

    #[must_use]
    pub fn scenario(mut self, id: u32, name: &str, tag: &str) -> Self {
        self.schedule.scenarios.insert(
            ScenarioId(id),
            Scenario {
                id: ScenarioId(id),
                name: name.to_string(),
                tag: tag.to_string(),
            },
        );
        self
    }

    /// Record that a scenario installs `install_number` units of a system in
    /// `install_year`.
    #[must_use]
    pub fn install(
        mut self,
        id: u32,
        scenario_id: u32,
        system_id: u32,
        install_number: Uncertain,
        install_year: i32,
    ) -> Self {
        self.schedule.scenario_systems.push(ScenarioSystemLink {
            id: ScenarioSystemId(id),
            scenario_id: ScenarioId(scenario_id),
            system_id: SystemId(system_id),
            install_number,
            install_year,
        });
        self
    }

    /// Finish building. The schedule is not validated here; run
    /// [`CostSchedule::validate`] before handing it to an analysis.
    #[must_use]
    pub fn build(self) -> CostSchedule {
        self.schedule
    }
}
