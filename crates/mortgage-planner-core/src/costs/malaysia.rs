//! Upfront transaction costs of a Malaysian property purchase.
//!
//! Stamp duty on the memorandum of transfer and the solicitor's scale fee are
//! progressive bracket schedules; the bank valuation fee is a capped
//! percentage of value and MRTA is a flat percentage of the loan.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::brackets::{BracketSchedule, FeeBracket};
use crate::error::PlannerError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::PlannerResult;

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostSchedule {
    pub stamp_duty: BracketSchedule,
    pub legal_fees: BracketSchedule,
    pub valuation_rate: Rate,
    pub valuation_cap: Money,
    /// Mortgage Reducing Term Assurance premium as a fraction of principal.
    pub mrta_rate: Rate,
}

impl Default for CostSchedule {
    fn default() -> Self {
        Self {
            stamp_duty: BracketSchedule {
                brackets: vec![
                    FeeBracket::new(Decimal::ZERO, Some(dec!(100_000)), Decimal::ZERO, dec!(0.01)),
                    FeeBracket::new(dec!(100_000), Some(dec!(500_000)), dec!(1_000), dec!(0.02)),
                    FeeBracket::new(dec!(500_000), Some(dec!(1_000_000)), dec!(9_000), dec!(0.03)),
                    FeeBracket::new(dec!(1_000_000), None, dec!(24_000), dec!(0.04)),
                ],
                floor: None,
            },
            legal_fees: BracketSchedule {
                brackets: vec![
                    FeeBracket::new(Decimal::ZERO, Some(dec!(150_000)), dec!(1_000), dec!(0.01)),
                    FeeBracket::new(dec!(150_000), Some(dec!(1_000_000)), dec!(2_500), dec!(0.008)),
                    FeeBracket::new(dec!(1_000_000), None, dec!(9_300), dec!(0.007)),
                ],
                floor: Some(dec!(500)),
            },
            valuation_rate: dec!(0.0025),
            valuation_cap: dec!(2_500),
            mrta_rate: dec!(0.006),
        }
    }
}

impl CostSchedule {
    pub fn validate(&self) -> PlannerResult<()> {
        self.stamp_duty.validate("stamp_duty")?;
        self.legal_fees.validate("legal_fees")?;
        if self.valuation_rate < Decimal::ZERO {
            return Err(PlannerError::InvalidInput {
                field: "valuation_rate".into(),
                reason: "Valuation rate cannot be negative".into(),
            });
        }
        if self.valuation_cap < Decimal::ZERO {
            return Err(PlannerError::InvalidInput {
                field: "valuation_cap".into(),
                reason: "Valuation cap cannot be negative".into(),
            });
        }
        if self.mrta_rate < Decimal::ZERO {
            return Err(PlannerError::InvalidInput {
                field: "mrta_rate".into(),
                reason: "MRTA rate cannot be negative".into(),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyCostInput {
    pub property_value: Money,
    pub loan_principal: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub stamp_duty: Money,
    pub legal_fees: Money,
    pub valuation_fee: Money,
    pub mortgage_insurance: Money,
    pub total_upfront: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Break down upfront costs. Never fails; inputs are not clamped, and
/// amounts beyond the Decimal range saturate at its bounds.
pub fn compute_costs(input: &PropertyCostInput, schedule: &CostSchedule) -> CostBreakdown {
    let stamp_duty = schedule.stamp_duty.apply(input.property_value);
    let legal_fees = schedule.legal_fees.apply(input.property_value);
    let valuation_fee = input
        .property_value
        .saturating_mul(schedule.valuation_rate)
        .min(schedule.valuation_cap);
    let mortgage_insurance = input.loan_principal.saturating_mul(schedule.mrta_rate);

    CostBreakdown {
        stamp_duty,
        legal_fees,
        valuation_fee,
        mortgage_insurance,
        total_upfront: stamp_duty
            .saturating_add(legal_fees)
            .saturating_add(valuation_fee)
            .saturating_add(mortgage_insurance),
    }
}

/// Envelope-wrapped [`compute_costs`].
pub fn calculate_costs(
    input: &PropertyCostInput,
    schedule: &CostSchedule,
) -> PlannerResult<ComputationOutput<CostBreakdown>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.property_value < Decimal::ZERO || input.loan_principal < Decimal::ZERO {
        warnings.push("Negative amounts were priced as entered; results may be negative.".into());
    }
    if input.property_value.is_zero() {
        warnings.push("Property value is zero; only the base legal fee applies.".into());
    }

    let breakdown = compute_costs(input, schedule);

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "valuation_rate": schedule.valuation_rate.to_string(),
        "valuation_cap": schedule.valuation_cap.to_string(),
        "mrta_rate": schedule.mrta_rate.to_string(),
        "legal_fee_floor": schedule.legal_fees.floor.map(|f| f.to_string()),
    });

    Ok(with_metadata(
        "Malaysia upfront costs (progressive stamp duty and legal scale)",
        &assumptions,
        warnings,
        elapsed,
        breakdown,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
