use clap::Args;
use serde_json::Value;

use mortgage_planner_core::amortization::schedule::{self, LoanInput};
use mortgage_planner_core::calculator::{self, MortgageInput};
use mortgage_planner_core::costs::malaysia::{self, PropertyCostInput};
use mortgage_planner_core::forms::MortgageForm;
use mortgage_planner_core::parse::parse_number;
use mortgage_planner_core::PlannerConfig;

use crate::input;

/// Arguments for the full purchase calculation.
///
/// Flags take text exactly as typed into the calculator; anything that does
/// not start with a number reads as zero. Omitted flags keep the form defaults.
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct MortgageArgs {
    /// Property price in RM (default 600000)
    #[arg(long)]
    pub property_value: Option<String>,

    /// Loan amount in RM (default 500000)
    #[arg(long)]
    pub loan_amount: Option<String>,

    /// Annual interest rate in percent, e.g. 4.5 (default 4.5)
    #[arg(long)]
    pub interest_rate: Option<String>,

    /// Tenure in years (default 30)
    #[arg(long)]
    pub tenure: Option<String>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for a bare instalment calculation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct AmortizeArgs {
    /// Loan amount in RM
    #[arg(long)]
    pub principal: Option<String>,

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

/// Arguments for upfront cost estimation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct CostsArgs {
    /// Property price in RM
    #[arg(long)]
    pub property_value: Option<String>,

    /// Loan amount in RM, used for the MRTA premium
    #[arg(long)]
    pub loan_amount: Option<String>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_mortgage(
    args: MortgageArgs,
    config: &PlannerConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let mortgage_input: MortgageInput = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => {
            let defaults = MortgageForm::default();
            MortgageForm {
                property_value: args.property_value.unwrap_or(defaults.property_value),
                loan_amount: args.loan_amount.unwrap_or(defaults.loan_amount),
                interest_rate: args.interest_rate.unwrap_or(defaults.interest_rate),
                tenure: args.tenure.unwrap_or(defaults.tenure),
            }
            .to_input()
        }
    };

    let result = calculator::calculate_mortgage(&mortgage_input, config)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_amortize(args: AmortizeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan: LoanInput = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => LoanInput {
            principal: required(args.principal.as_deref(), "--principal")?,
            annual_rate_percent: required(args.interest_rate.as_deref(), "--interest-rate")?,
            term_years: required(args.tenure.as_deref(), "--tenure")?,
        },
    };

    let result = schedule::calculate_amortization(&loan)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_costs(args: CostsArgs, config: &PlannerConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let cost_input: PropertyCostInput = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => PropertyCostInput {
            property_value: required(args.property_value.as_deref(), "--property-value")?,
            loan_principal: args.loan_amount.as_deref().map(parse_number).unwrap_or_default(),
        },
    };

    let result = malaysia::calculate_costs(&cost_input, &config.cost_schedule)?;
    Ok(serde_json::to_value(result)?)
}

fn required(
    value: Option<&str>,
    flag: &str,
) -> Result<rust_decimal::Decimal, Box<dyn std::error::Error>> {
    value
        .map(parse_number)
        .ok_or_else(|| format!("{flag} is required (or pass --input <file.json> / stdin)").into())
}
