use clap::Args;
use serde_json::Value;

use mortgage_planner_core::affordability::dsr::{self, AffordabilityInput};
use mortgage_planner_core::forms::AffordabilityForm;
use mortgage_planner_core::PlannerConfig;

use crate::input;

/// Arguments for the DSR affordability check.
///
/// Omitted flags keep the calculator defaults (8000 / 2000 / 4.5 / 30).
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct AffordabilityArgs {
    /// Gross monthly income in RM
    #[arg(long, alias = "income")]
    pub monthly_income: Option<String>,

    /// Existing monthly debt commitments in RM
    #[arg(long, alias = "commitments")]
    pub monthly_commitments: Option<String>,

    /// Annual interest rate in percent
    #[arg(long)]
    pub interest_rate: Option<String>,

    /// Tenure in years
    #[arg(long)]
    pub tenure: Option<String>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_affordability(
    args: AffordabilityArgs,
    config: &PlannerConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let afford_input: AffordabilityInput = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => {
            let defaults = AffordabilityForm::default();
            AffordabilityForm {
                monthly_income: args.monthly_income.unwrap_or(defaults.monthly_income),
                monthly_commitments: args
                    .monthly_commitments
                    .unwrap_or(defaults.monthly_commitments),
                interest_rate: args.interest_rate.unwrap_or(defaults.interest_rate),
                tenure: args.tenure.unwrap_or(defaults.tenure),
            }
            .to_input()
        }
    };

    let result = dsr::calculate_affordability(&afford_input, &config.affordability)?;
    Ok(serde_json::to_value(result)?)
}
