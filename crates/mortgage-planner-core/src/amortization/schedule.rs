//! Fixed-rate level-payment amortization.
//!
//! Converts an annual percentage and a term in years into monthly terms and
//! prices the standard annuity. All math in `rust_decimal::Decimal`; nothing
//! is rounded here, display rounding happens in [`crate::format`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::time_value::{self, ZeroRatePolicy};
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rate, Years};
use crate::PlannerResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanInput {
    pub principal: Money,
    /// Annual rate as a percentage (4.5 = 4.5%).
    pub annual_rate_percent: Percent,
    pub term_years: Years,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationResult {
    pub monthly_payment: Money,
    pub total_payment: Money,
    /// Always `total_payment - principal`.
    pub total_interest: Money,
    pub number_of_payments: Decimal,
    pub monthly_rate: Rate,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Price a loan with the calculator's rules: a zero rate has no schedule.
///
/// `None` means the input is insufficient (non-positive principal, rate or
/// term) or the schedule is too large to represent, and nothing should be
/// displayed.
pub fn compute_amortization(input: &LoanInput) -> Option<AmortizationResult> {
    amortize(
        input.principal,
        input.annual_rate_percent,
        input.term_years,
        ZeroRatePolicy::Undefined,
    )
}

/// Shared entry point for every caller that needs a level-payment schedule.
pub fn amortize(
    principal: Money,
    annual_rate_percent: Percent,
    term_years: Years,
    policy: ZeroRatePolicy,
) -> Option<AmortizationResult> {
    let rate = time_value::monthly_rate(annual_rate_percent);
    let periods = time_value::monthly_periods(term_years)?;
    let payment = time_value::level_payment(principal, rate, periods, policy)?;

    let total_payment = if rate.is_zero() {
        principal
    } else {
        payment.checked_mul(periods)?
    };

    let result = AmortizationResult {
        monthly_payment: payment,
        total_payment,
        total_interest: total_payment.checked_sub(principal)?,
        number_of_payments: periods,
        monthly_rate: rate,
    };

    tracing::debug!(
        %principal,
        %annual_rate_percent,
        %term_years,
        monthly_payment = %result.monthly_payment,
        "amortization computed"
    );

    Some(result)
}

/// Envelope-wrapped [`compute_amortization`] for the CLI and bindings.
pub fn calculate_amortization(
    input: &LoanInput,
) -> PlannerResult<ComputationOutput<Option<AmortizationResult>>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let result = compute_amortization(input);
    if result.is_none() {
        warnings.push(
            "Principal, interest rate and tenure must all be positive, and the schedule \
             within numeric range, to produce a schedule."
                .into(),
        );
    }

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "compounding": "monthly",
        "zero_rate_policy": ZeroRatePolicy::Undefined,
    });

    Ok(with_metadata(
        "Fixed-rate level-payment amortization",
        &assumptions,
        warnings,
        elapsed,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn base_input() -> LoanInput {
        LoanInput {
            principal: dec!(500_000),
            annual_rate_percent: dec!(4.5),
            term_years: dec!(30),
        }
    }

    #[test]
    fn test_standard_thirty_year_loan() {
        let r = compute_amortization(&base_input()).unwrap();
        assert!((r.monthly_payment - dec!(2533.43)).abs() < dec!(0.01));
        assert_eq!(r.number_of_payments, dec!(360));
        assert_eq!(r.monthly_rate, dec!(0.00375));
        assert_eq!(r.total_interest, r.total_payment - dec!(500_000));
    }

    #[test]
    fn test_zero_rate_has_no_schedule() {
        let mut input = base_input();
        input.annual_rate_percent = Decimal::ZERO;
        assert_eq!(compute_amortization(&input), None);
    }

    #[test]
    fn test_zero_term_has_no_schedule() {
        let mut input = base_input();
        input.term_years = Decimal::ZERO;
        assert_eq!(compute_amortization(&input), None);
    }

    #[test]
    fn test_straight_line_zero_rate() {
        let r = amortize(dec!(360_000), Decimal::ZERO, dec!(30), ZeroRatePolicy::StraightLine)
            .unwrap();
        assert_eq!(r.monthly_payment, dec!(1000));
        assert_eq!(r.total_payment, dec!(360_000));
        assert_eq!(r.total_interest, Decimal::ZERO);
    }

    #[test]
    fn test_envelope_warns_on_insufficient_input() {
        let mut input = base_input();
        input.principal = Decimal::ZERO;
        let out = calculate_amortization(&input).unwrap();
        assert!(out.result.is_none());
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.metadata.precision, "rust_decimal_128bit");
    }
}
