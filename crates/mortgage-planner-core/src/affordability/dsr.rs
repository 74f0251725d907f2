//! Income-based affordability under a debt-service-ratio ceiling.
//!
//! Malaysian lenders cap total monthly debt service at a share of gross
//! income. Whatever headroom remains under the cap is treated as the new
//! instalment and discounted back into a maximum loan; the maximum property
//! value then follows from the financing ratio.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::PlannerError;
use crate::time_value;
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Years};
use crate::PlannerResult;

const HUNDRED: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AffordabilityPolicy {
    /// Ceiling on total debt service as a percentage of gross income.
    pub max_dsr_percent: Percent,
    /// Maximum loan as a percentage of property value.
    pub financing_ratio_percent: Percent,
    /// Ratios at or below this are banded `Excellent`.
    pub excellent_dsr_percent: Percent,
}

impl Default for AffordabilityPolicy {
    fn default() -> Self {
        Self {
            max_dsr_percent: dec!(35),
            financing_ratio_percent: dec!(90),
            excellent_dsr_percent: dec!(30),
        }
    }
}

impl AffordabilityPolicy {
    pub fn validate(&self) -> PlannerResult<()> {
        if self.max_dsr_percent <= Decimal::ZERO {
            return Err(PlannerError::InvalidInput {
                field: "max_dsr_percent".into(),
                reason: "Maximum DSR must be positive".into(),
            });
        }
        if self.financing_ratio_percent <= Decimal::ZERO || self.financing_ratio_percent > HUNDRED {
            return Err(PlannerError::InvalidInput {
                field: "financing_ratio_percent".into(),
                reason: "Financing ratio must be in (0, 100]".into(),
            });
        }
        if self.excellent_dsr_percent > self.max_dsr_percent {
            return Err(PlannerError::InvalidInput {
                field: "excellent_dsr_percent".into(),
                reason: "Excellent threshold cannot exceed the maximum DSR".into(),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffordabilityInput {
    pub monthly_income: Money,
    /// Car loans, personal loans, card minimums and other existing debt service.
    pub monthly_commitments: Money,
    pub annual_rate_percent: Percent,
    pub term_years: Years,
}

/// Risk label shown next to the debt-service ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DsrBand {
    Excellent,
    Good,
    HighRisk,
}

impl DsrBand {
    pub fn classify(dsr_percent: Percent, policy: &AffordabilityPolicy) -> Self {
        if dsr_percent <= policy.excellent_dsr_percent {
            DsrBand::Excellent
        } else if dsr_percent <= policy.max_dsr_percent {
            DsrBand::Good
        } else {
            DsrBand::HighRisk
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DsrBand::Excellent => "Excellent",
            DsrBand::Good => "Good",
            DsrBand::HighRisk => "High Risk",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityResult {
    pub max_loan_amount: Money,
    pub max_property_value: Money,
    /// Monthly instalment the applicant can take on under the cap.
    pub serviceable_monthly_payment: Money,
    /// Commitments plus the serviceable instalment over income. In the
    /// success branch this is the policy cap itself.
    pub debt_service_ratio_percent: Percent,
    pub dsr_band: DsrBand,
    /// False when existing commitments already use up the cap.
    pub can_service_loan: bool,
}

/// Either no answer yet, or an assessment (which may be zero capacity).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "assessment", rename_all = "snake_case")]
pub enum Affordability {
    Invalid,
    Assessed(AffordabilityResult),
}

impl Affordability {
    pub fn assessment(&self) -> Option<&AffordabilityResult> {
        match self {
            Affordability::Invalid => None,
            Affordability::Assessed(r) => Some(r),
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Size the largest serviceable loan for an income.
///
/// `Invalid` when income, rate or term is not positive, or when the figures
/// fall outside the Decimal range.
pub fn compute_affordability(
    input: &AffordabilityInput,
    policy: &AffordabilityPolicy,
) -> Affordability {
    match assess(input, policy) {
        Some(result) => Affordability::Assessed(result),
        None => Affordability::Invalid,
    }
}

fn assess(input: &AffordabilityInput, policy: &AffordabilityPolicy) -> Option<AffordabilityResult> {
    let rate = time_value::monthly_rate(input.annual_rate_percent);
    let periods = time_value::monthly_periods(input.term_years)?;

    if input.monthly_income <= Decimal::ZERO || rate <= Decimal::ZERO || periods <= Decimal::ZERO {
        return None;
    }

    let income = input.monthly_income;
    let commitments = input.monthly_commitments;
    let available = income
        .checked_mul(policy.max_dsr_percent / HUNDRED)?
        .checked_sub(commitments)?;

    if available <= Decimal::ZERO {
        let dsr = percent_of_income(commitments, income)?;
        tracing::debug!(%income, %commitments, dsr = %dsr, "no capacity under DSR cap");
        return Some(AffordabilityResult {
            max_loan_amount: Decimal::ZERO,
            max_property_value: Decimal::ZERO,
            serviceable_monthly_payment: Decimal::ZERO,
            debt_service_ratio_percent: dsr,
            dsr_band: DsrBand::classify(dsr, policy),
            can_service_loan: false,
        });
    }

    let max_loan = time_value::present_value_of_payment(available, rate, periods)?;
    let max_property = max_loan.checked_div(policy.financing_ratio_percent / HUNDRED)?;
    let dsr = percent_of_income(commitments.checked_add(available)?, income)?;

    tracing::debug!(%income, %commitments, max_loan = %max_loan, "affordability computed");

    Some(AffordabilityResult {
        max_loan_amount: max_loan,
        max_property_value: max_property,
        serviceable_monthly_payment: available,
        debt_service_ratio_percent: dsr,
        dsr_band: DsrBand::classify(dsr, policy),
        can_service_loan: true,
    })
}

fn percent_of_income(amount: Money, income: Money) -> Option<Percent> {
    amount.checked_div(income)?.checked_mul(HUNDRED)
}

/// Envelope-wrapped [`compute_affordability`].
pub fn calculate_affordability(
    input: &AffordabilityInput,
    policy: &AffordabilityPolicy,
) -> PlannerResult<ComputationOutput<Affordability>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    policy.validate()?;
    let outcome = compute_affordability(input, policy);

    match &outcome {
        Affordability::Invalid => warnings.push(
            "Income, interest rate and tenure must all be positive, and the figures within \
             numeric range, to assess affordability."
                .into(),
        ),
        Affordability::Assessed(r) if !r.can_service_loan => warnings.push(format!(
            "Existing commitments already reach {}% of income ({}; recommended: at most {}%). \
             Consider reducing existing debts before applying for a mortgage.",
            r.debt_service_ratio_percent.round_dp(1),
            r.dsr_band.label(),
            policy.max_dsr_percent,
        )),
        Affordability::Assessed(_) => {}
    }

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "max_dsr_percent": policy.max_dsr_percent.to_string(),
        "financing_ratio_percent": policy.financing_ratio_percent.to_string(),
        "reported_dsr": "commitments plus serviceable instalment over income",
    });

    Ok(with_metadata(
        "DSR-capped affordability (inverted level-payment annuity)",
        &assumptions,
        warnings,
        elapsed,
        outcome,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn input(income: Money, commitments: Money) -> AffordabilityInput {
        AffordabilityInput {
            monthly_income: income,
            monthly_commitments: commitments,
            annual_rate_percent: dec!(4.5),
            term_years: dec!(30),
        }
    }

    #[test]
    fn test_headroom_becomes_instalment() {
        let out = compute_affordability(&input(dec!(8000), dec!(2000)), &AffordabilityPolicy::default());
        let r = out.assessment().unwrap();
        assert_eq!(r.serviceable_monthly_payment, dec!(800));
        assert_eq!(r.debt_service_ratio_percent, dec!(35));
        assert_eq!(r.dsr_band, DsrBand::Good);
        assert!(r.can_service_loan);
        // 800 * (1.00375^360 - 1) / (0.00375 * 1.00375^360) ≈ 157,890
        assert!((r.max_loan_amount - dec!(157_890)).abs() < dec!(5), "got {}", r.max_loan_amount);
        assert_eq!(r.max_property_value, r.max_loan_amount / dec!(0.9));
    }

    #[test]
    fn test_commitments_over_cap() {
        let out = compute_affordability(&input(dec!(4000), dec!(3000)), &AffordabilityPolicy::default());
        let r = out.assessment().unwrap();
        assert_eq!(r.max_loan_amount, Decimal::ZERO);
        assert_eq!(r.max_property_value, Decimal::ZERO);
        assert_eq!(r.serviceable_monthly_payment, Decimal::ZERO);
        assert_eq!(r.debt_service_ratio_percent, dec!(75));
        assert_eq!(r.dsr_band, DsrBand::HighRisk);
        assert!(!r.can_service_loan);
    }

    #[test]
    fn test_commitments_exactly_at_cap() {
        let out = compute_affordability(&input(dec!(10_000), dec!(3500)), &AffordabilityPolicy::default());
        let r = out.assessment().unwrap();
        assert!(!r.can_service_loan);
        assert_eq!(r.debt_service_ratio_percent, dec!(35));
    }

    #[test]
    fn test_invalid_inputs() {
        let policy = AffordabilityPolicy::default();
        assert_eq!(compute_affordability(&input(Decimal::ZERO, dec!(0)), &policy), Affordability::Invalid);

        let mut zero_rate = input(dec!(8000), dec!(0));
        zero_rate.annual_rate_percent = Decimal::ZERO;
        assert_eq!(compute_affordability(&zero_rate, &policy), Affordability::Invalid);

        let mut zero_term = input(dec!(8000), dec!(0));
        zero_term.term_years = Decimal::ZERO;
        assert_eq!(compute_affordability(&zero_term, &policy), Affordability::Invalid);
    }

    #[test]
    fn test_band_thresholds() {
        let p = AffordabilityPolicy::default();
        assert_eq!(DsrBand::classify(dec!(30), &p), DsrBand::Excellent);
        assert_eq!(DsrBand::classify(dec!(30.1), &p), DsrBand::Good);
        assert_eq!(DsrBand::classify(dec!(35), &p), DsrBand::Good);
        assert_eq!(DsrBand::classify(dec!(35.01), &p), DsrBand::HighRisk);
        assert_eq!(DsrBand::HighRisk.label(), "High Risk");
    }

    #[test]
    fn test_envelope_warns_when_over_cap() {
        let out = calculate_affordability(&input(dec!(4000), dec!(3000)), &AffordabilityPolicy::default())
            .unwrap();
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].contains("75"));
        assert!(out.warnings[0].contains("High Risk"));
    }

    #[test]
    fn test_policy_validation() {
        let mut p = AffordabilityPolicy::default();
        p.financing_ratio_percent = dec!(120);
        assert!(p.validate().is_err());
    }
}
