pub mod config;
pub mod error;
pub mod format;
pub mod forms;
pub mod parse;
pub mod time_value;
pub mod types;

#[cfg(feature = "amortization")]
pub mod amortization;

#[cfg(feature = "costs")]
pub mod costs;

#[cfg(feature = "affordability")]
pub mod affordability;

#[cfg(feature = "comparison")]
pub mod comparison;

#[cfg(feature = "calculator")]
pub mod calculator;

pub use config::PlannerConfig;
pub use error::PlannerError;
pub use types::*;

/// Standard result type for all mortgage-planner operations
pub type PlannerResult<T> = Result<T, PlannerError>;
