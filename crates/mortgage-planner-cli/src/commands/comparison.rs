use clap::Args;
use serde_json::Value;

use mortgage_planner_core::comparison::catalog::BankCatalog;
use mortgage_planner_core::comparison::quotes::{self, ComparisonInput};
use mortgage_planner_core::comparison::selection::{
    ComparisonSelection, SelectionChange, MAX_SELECTION,
};
use mortgage_planner_core::forms::ComparisonForm;
use mortgage_planner_core::parse::parse_number;
use mortgage_planner_core::PlannerConfig;

use crate::input;

/// Arguments for bank package comparison
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct CompareArgs {
    /// Loan amount in RM (default 500000)
    #[arg(long)]
    pub loan_amount: Option<String>,

    /// Tenure in years (default 30)
    #[arg(long)]
    pub tenure: Option<String>,

    /// Product ids to compare, in order (default maybank,cimb,public-bank)
    #[arg(long = "bank", value_delimiter = ',')]
    pub banks: Vec<String>,

    /// Gross monthly income, checked against each package's minimum
    #[arg(long)]
    pub monthly_income: Option<String>,

    /// Property price, checked against each package's maximum LTV
    #[arg(long)]
    pub property_value: Option<String>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for listing the catalog
#[derive(Args)]
pub struct BanksArgs {
    /// Show a single product by id
    #[arg(long)]
    pub id: Option<String>,
}

pub fn run_compare(
    args: CompareArgs,
    config: &PlannerConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let cmp_input: ComparisonInput = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => {
            let defaults = ComparisonForm::default();
            let mut cmp_input = ComparisonForm {
                loan_amount: args.loan_amount.unwrap_or(defaults.loan_amount),
                tenure: args.tenure.unwrap_or(defaults.tenure),
                selected_banks: defaults.selected_banks,
            }
            .to_input();
            if !args.banks.is_empty() {
                cmp_input.selection = select(&args.banks, &config.catalog);
            }
            cmp_input.monthly_income = args.monthly_income.as_deref().map(parse_number);
            cmp_input.property_value = args.property_value.as_deref().map(parse_number);
            cmp_input
        }
    };

    let result = quotes::calculate_comparison(&cmp_input, &config.catalog)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_banks(args: BanksArgs, config: &PlannerConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let catalog = &config.catalog;
    match args.id {
        Some(id) => {
            let product = catalog
                .get(&id)
                .ok_or_else(|| {
                    let known: Vec<&str> = catalog.ids().collect();
                    format!("Unknown bank product '{}'. Known ids: {}", id, known.join(", "))
                })?;
            Ok(serde_json::to_value(product)?)
        }
        None => Ok(serde_json::to_value(&catalog.products)?),
    }
}

/// Build a selection in flag order, dropping banks once the cap is reached.
///
/// Ids missing from the catalog are dropped before they can take a slot.
fn select(banks: &[String], catalog: &BankCatalog) -> ComparisonSelection {
    let mut selection = ComparisonSelection::empty();
    for id in banks {
        if !catalog.contains(id) {
            tracing::warn!(%id, "unknown bank product, not added to comparison");
            continue;
        }
        if selection.add(id.as_str()) == SelectionChange::Rejected {
            tracing::warn!(%id, max = MAX_SELECTION, "comparison is full, bank not added");
        }
    }
    selection
}
