//! The mortgage calculator: one form, amortization and upfront costs together.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::schedule::{compute_amortization, AmortizationResult, LoanInput};
use crate::config::PlannerConfig;
use crate::costs::malaysia::{compute_costs, CostBreakdown, PropertyCostInput};
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Years};
use crate::PlannerResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageInput {
    pub property_value: Money,
    pub loan_amount: Money,
    pub annual_rate_percent: Percent,
    pub term_years: Years,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageAnalysis {
    pub amortization: AmortizationResult,
    pub costs: CostBreakdown,
    /// Property value not covered by the loan.
    pub down_payment: Money,
    /// Down payment plus every upfront cost.
    pub cash_required: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_to_value_percent: Option<Percent>,
}

/// Run both engines on one set of inputs.
///
/// Returns `None` when no amortization schedule is defined, or when the
/// down payment or loan-to-value cannot be represented; the costs are then
/// withheld too, matching what the calculator displays.
pub fn analyze_mortgage(input: &MortgageInput, config: &PlannerConfig) -> Option<MortgageAnalysis> {
    let loan = LoanInput {
        principal: input.loan_amount,
        annual_rate_percent: input.annual_rate_percent,
        term_years: input.term_years,
    };

    let amortization = compute_amortization(&loan)?;

    let costs = compute_costs(
        &PropertyCostInput {
            property_value: input.property_value,
            loan_principal: input.loan_amount,
        },
        &config.cost_schedule,
    );

    let down_payment = input.property_value.checked_sub(input.loan_amount)?;
    let loan_to_value_percent = if input.property_value > Decimal::ZERO {
        Some(
            input
                .loan_amount
                .checked_div(input.property_value)?
                .checked_mul(dec!(100))?,
        )
    } else {
        None
    };

    Some(MortgageAnalysis {
        cash_required: down_payment.checked_add(costs.total_upfront)?,
        amortization,
        costs,
        down_payment,
        loan_to_value_percent,
    })
}

/// Envelope-wrapped [`analyze_mortgage`].
pub fn calculate_mortgage(
    input: &MortgageInput,
    config: &PlannerConfig,
) -> PlannerResult<ComputationOutput<Option<MortgageAnalysis>>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    config.validate()?;
    let analysis = analyze_mortgage(input, config);

    match &analysis {
        None => warnings.push(
            "Loan amount, interest rate and tenure must all be positive, and the figures within \
             numeric range, to produce a schedule."
                .into(),
        ),
        Some(a) => {
            if input.loan_amount > input.property_value {
                warnings.push("Loan amount exceeds property value.".into());
            } else if let Some(ltv) = a.loan_to_value_percent {
                let cap = config.affordability.financing_ratio_percent;
                if ltv > cap {
                    warnings.push(format!(
                        "Loan-to-value of {}% is above the usual {}% financing limit.",
                        ltv.round_dp(1),
                        cap
                    ));
                }
            }
        }
    }

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "valuation_cap": config.cost_schedule.valuation_cap.to_string(),
        "mrta_rate": config.cost_schedule.mrta_rate.to_string(),
        "financing_ratio_percent": config.affordability.financing_ratio_percent.to_string(),
    });

    Ok(with_metadata(
        "Mortgage calculator (amortization with Malaysian upfront costs)",
        &assumptions,
        warnings,
        elapsed,
        analysis,
    ))
}
