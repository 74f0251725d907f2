//! Planner configuration: fee schedules, lending policy and the bank catalog.
//!
//! Every field defaults to the compiled-in Malaysian reference data, so an
//! empty document (or no document at all) reproduces the stock behaviour.

use serde::{Deserialize, Serialize};

#[cfg(feature = "affordability")]
use crate::affordability::dsr::AffordabilityPolicy;
#[cfg(feature = "comparison")]
use crate::comparison::catalog::BankCatalog;
#[cfg(feature = "costs")]
use crate::costs::malaysia::CostSchedule;
use crate::PlannerResult;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    #[cfg(feature = "costs")]
    pub cost_schedule: CostSchedule,
    #[cfg(feature = "affordability")]
    pub affordability: AffordabilityPolicy,
    #[cfg(feature = "comparison")]
    pub catalog: BankCatalog,
}

impl PlannerConfig {
    /// Parse a JSON document, falling back to defaults for missing sections.
    pub fn from_json(json: &str) -> PlannerResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> PlannerResult<()> {
        #[cfg(feature = "costs")]
        self.cost_schedule.validate()?;
        #[cfg(feature = "affordability")]
        self.affordability.validate()?;
        #[cfg(feature = "comparison")]
        self.catalog.validate()?;
        Ok(())
    }
}
