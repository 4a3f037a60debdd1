//! Iteration table generation
//!
//! Expands the nominal cost schedule into one fully-concrete
//! `SampledSchedule` per Monte Carlo iteration. Fixed fields are copied
//! through; bounded fields are drawn from their distribution — except in
//! global iteration 0, which always carries the nominal values so every run
//! has a deterministic baseline.
//!
//! Every draw is also recorded into a [`ParameterDraws`] wide table so the
//! variance analyzer can correlate inputs against computed outputs.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rustc_hash::FxHashMap;

use crate::error::LookupError;
use crate::model::{
    ComponentId, CostSchedule, CurrencyId, InstallationTiming, ParameterDraws, ScenarioId,
    SystemId, Uncertain,
};

/// Concrete cost figures for one component in one iteration, with the
/// currency conversion already resolved.
#[derive(Debug, Clone, Copy)]
pub struct SampledComponentCost {
    pub baseline_cost: f64,
    pub baseline_year: i32,
    pub annual_multiplier: f64,
    pub to_aud: f64,
}

/// A scenario-system install with a concrete quantity.
#[derive(Debug, Clone, Copy)]
pub struct SampledInstall {
    pub scenario_id: ScenarioId,
    pub system_id: SystemId,
    pub install_number: f64,
    pub install_year: i32,
}

/// A system-component link with a concrete usage multiplier.
#[derive(Debug, Clone, Copy)]
pub struct SampledComponentLink {
    pub system_id: SystemId,
    pub component_id: ComponentId,
    pub usage: f64,
    pub timing: InstallationTiming,
}

/// The cost schedule with every uncertain field resolved for one iteration.
#[derive(Debug, Clone)]
pub struct SampledSchedule {
    pub iteration: u32,
    pub installs: Vec<SampledInstall>,
    pub component_links: Vec<SampledComponentLink>,
    /// Sorted by component ID for deterministic projection order.
    pub component_costs: Vec<(ComponentId, SampledComponentCost)>,
}

/// Which field of the schedule a sampled parameter feeds.
#[derive(Debug, Clone, Copy)]
enum ParamTarget {
    CurrencyToAud(CurrencyId),
    ComponentBaselineCost(ComponentId),
    ComponentMultiplier(ComponentId),
    /// Index into `CostSchedule::scenario_systems`.
    InstallNumber(usize),
    /// Index into `CostSchedule::system_components`.
    LinkUsage(usize),
    YieldMultiplier,
}

struct ParamSpec {
    name: String,
    target: ParamTarget,
    value: Uncertain,
}

/// One iteration's sampled schedule plus the raw draws that produced it.
#[derive(Debug, Clone)]
pub struct IterationSample {
    pub schedule: SampledSchedule,
    /// Scaling applied to the annual energy series (1.0 when yield is fixed).
    pub yield_multiplier: f64,
    /// Aligned with [`IterationSampler::parameter_names`].
    pub draws: Vec<f64>,
}

/// Stateless per-iteration sampler over a validated schedule.
///
/// Sampling order is fixed (currencies, components, installs, links, yield —
/// each sorted or in table order), and each iteration derives its own RNG
/// from `(seed, global_iteration)`, so results do not depend on how
/// iterations are batched across process runs.
pub struct IterationSampler<'a> {
    schedule: &'a CostSchedule,
    specs: Vec<ParamSpec>,
    seed: u64,
}

impl<'a> IterationSampler<'a> {
    #[must_use]
    pub fn new(
        schedule: &'a CostSchedule,
        yield_multiplier: Option<Uncertain>,
        seed: u64,
    ) -> Self {
        let mut specs = Vec::new();

        let mut currency_ids: Vec<_> = schedule.currencies.keys().copied().collect();
        currency_ids.sort();
        for id in currency_ids {
            let currency = &schedule.currencies[&id];
            if !currency.to_aud.is_fixed() {
                specs.push(ParamSpec {
                    name: format!("Currency {} To_AUD", id.0),
                    target: ParamTarget::CurrencyToAud(id),
                    value: currency.to_aud,
                });
            }
        }

        let mut component_ids: Vec<_> = schedule.components.keys().copied().collect();
        component_ids.sort();
        for id in component_ids {
            let component = &schedule.components[&id];
            if !component.baseline_cost.is_fixed() {
                specs.push(ParamSpec {
                    name: format!("Component {} BaselineCost", id.0),
                    target: ParamTarget::ComponentBaselineCost(id),
                    value: component.baseline_cost,
                });
            }
            if !component.annual_multiplier.is_fixed() {
                specs.push(ParamSpec {
                    name: format!("Component {} AnnualMultiplier", id.0),
                    target: ParamTarget::ComponentMultiplier(id),
                    value: component.annual_multiplier,
                });
            }
        }

        for (index, link) in schedule.scenario_systems.iter().enumerate() {
            if !link.install_number.is_fixed() {
                specs.push(ParamSpec {
                    name: format!("ScenarioSystem {} InstallNumber", link.id.0),
                    target: ParamTarget::InstallNumber(index),
                    value: link.install_number,
                });
            }
        }

        for (index, link) in schedule.system_components.iter().enumerate() {
            if !link.usage.is_fixed() {
                specs.push(ParamSpec {
                    name: format!("SystemComponent {} Usage", link.id.0),
                    target: ParamTarget::LinkUsage(index),
                    value: link.usage,
                });
            }
        }

        if let Some(multiplier) = yield_multiplier
            && !multiplier.is_fixed()
        {
            specs.push(ParamSpec {
                name: "YieldMultiplier".to_string(),
                target: ParamTarget::YieldMultiplier,
                value: multiplier,
            });
        }

        Self {
            schedule,
            specs,
            seed,
        }
    }

    /// Names of all sampled parameters, in draw order.
    #[must_use]
    pub fn parameter_names(&self) -> Vec<String> {
        self.specs.iter().map(|s| s.name.clone()).collect()
    }

    /// Produce the sampled schedule for one global iteration index.
    ///
    /// Iteration 0 reproduces the nominal schedule exactly.
    pub fn sample(&self, global_iteration: u32) -> Result<IterationSample, LookupError> {
        let draws: Vec<f64> = if global_iteration == 0 {
            self.specs.iter().map(|s| s.value.nominal).collect()
        } else {
            let mut rng = SmallRng::seed_from_u64(iteration_seed(self.seed, global_iteration));
            self.specs.iter().map(|s| s.value.sample(&mut rng)).collect()
        };

        // Start from nominal values, then overwrite the sampled targets.
        let mut currency_values: FxHashMap<CurrencyId, f64> = self
            .schedule
            .currencies
            .iter()
            .map(|(id, c)| (*id, c.to_aud.nominal))
            .collect();
        let mut baseline_costs: FxHashMap<ComponentId, f64> = self
            .schedule
            .components
            .iter()
            .map(|(id, c)| (*id, c.baseline_cost.nominal))
            .collect();
        let mut multipliers: FxHashMap<ComponentId, f64> = self
            .schedule
            .components
            .iter()
            .map(|(id, c)| (*id, c.annual_multiplier.nominal))
            .collect();

        let mut installs: Vec<SampledInstall> = self
            .schedule
            .scenario_systems
            .iter()
            .map(|link| SampledInstall {
                scenario_id: link.scenario_id,
                system_id: link.system_id,
                install_number: link.install_number.nominal,
                install_year: link.install_year,
            })
            .collect();
        let mut component_links: Vec<SampledComponentLink> = self
            .schedule
            .system_components
            .iter()
            .map(|link| SampledComponentLink {
                system_id: link.system_id,
                component_id: link.component_id,
                usage: link.usage.nominal,
                timing: link.timing,
            })
            .collect();
        let mut yield_multiplier = 1.0;

        for (spec, value) in self.specs.iter().zip(&draws) {
            match spec.target {
                ParamTarget::CurrencyToAud(id) => {
                    currency_values.insert(id, *value);
                }
                ParamTarget::ComponentBaselineCost(id) => {
                    baseline_costs.insert(id, *value);
                }
                ParamTarget::ComponentMultiplier(id) => {
                    multipliers.insert(id, *value);
                }
                ParamTarget::InstallNumber(index) => {
                    installs[index].install_number = *value;
                }
                ParamTarget::LinkUsage(index) => {
                    component_links[index].usage = *value;
                }
                ParamTarget::YieldMultiplier => {
                    yield_multiplier = *value;
                }
            }
        }

        let mut component_costs = Vec::with_capacity(self.schedule.components.len());
        let mut component_ids: Vec<_> = self.schedule.components.keys().copied().collect();
        component_ids.sort();
        for id in component_ids {
            let component = &self.schedule.components[&id];
            let to_aud = *currency_values
                .get(&component.currency_id)
                .ok_or(LookupError::CurrencyNotFound(component.currency_id))?;
            component_costs.push((
                id,
                SampledComponentCost {
                    baseline_cost: baseline_costs[&id],
                    baseline_year: component.baseline_year,
                    annual_multiplier: multipliers[&id],
                    to_aud,
                },
            ));
        }

        Ok(IterationSample {
            schedule: SampledSchedule {
                iteration: global_iteration,
                installs,
                component_links,
                component_costs,
            },
            yield_multiplier,
            draws,
        })
    }
}

/// Expand a schedule into `num_iterations` sampled copies starting at
/// `iteration_start`, plus the wide table of draws that produced them.
pub fn generate_iterations(
    schedule: &CostSchedule,
    num_iterations: usize,
    iteration_start: u32,
    seed: u64,
) -> Result<(Vec<SampledSchedule>, ParameterDraws), LookupError> {
    let sampler = IterationSampler::new(schedule, None, seed);
    let names = sampler.parameter_names();
    let mut values = vec![Vec::with_capacity(num_iterations); names.len()];
    let mut schedules = Vec::with_capacity(num_iterations);

    for offset in 0..num_iterations {
        let sample = sampler.sample(iteration_start + offset as u32)?;
        for (column, draw) in values.iter_mut().zip(&sample.draws) {
            column.push(*draw);
        }
        schedules.push(sample.schedule);
    }

    Ok((schedules, ParameterDraws { names, values }))
}

/// Splitmix-style mix of the run seed and global iteration index.
///
/// Derived per iteration (not per batch) so batch boundaries cannot shift
/// any draw.
fn iteration_seed(seed: u64, global_iteration: u32) -> u64 {
    (seed ^ u64::from(global_iteration).wrapping_mul(0x9E37_79B9_7F4A_7C15))
        .wrapping_mul(0xBF58_476D_1CE4_E5B9)
}
