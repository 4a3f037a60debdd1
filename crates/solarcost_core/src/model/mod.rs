mod ids;
mod results;
mod schedule;
mod uncertain;
mod yields;

pub use ids::{
    ComponentId, CostCategoryId, CurrencyId, ScenarioId, ScenarioSystemId, SystemComponentId,
    SystemId,
};
pub use results::{
    AnalysisResult, ParameterDraws, ScenarioFailure, ScenarioSeries, ScenarioSummary, percentile,
};
pub use schedule::{
    Component, CostCategory, CostSchedule, Currency, InstallationTiming, Scenario,
    ScenarioSystemLink, System, SystemComponentLink,
};
pub use uncertain::{Distribution, Uncertain};
pub use yields::YieldSeries;
