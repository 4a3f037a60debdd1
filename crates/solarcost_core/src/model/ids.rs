//! Unique identifiers for cost-schedule entities
//!
//! Each table gets its own ID type so scenario, system, and component keys
//! cannot be mixed up in joins.

use serde::{Deserialize, Serialize};

/// Unique identifier for a costed scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ScenarioId(pub u32);

/// Unique identifier for a purchasable system (sub-assembly)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SystemId(pub u32);

/// Unique identifier for a cost line item
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ComponentId(pub u32);

/// Unique identifier for a currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CurrencyId(pub u32);

/// Unique identifier for a cost category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CostCategoryId(pub u32);

/// Unique identifier for a scenario-system link row
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ScenarioSystemId(pub u32);

/// Unique identifier for a system-component link row
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SystemComponentId(pub u32);
