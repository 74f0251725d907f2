//! Level-payment annuity math shared by every engine.
//!
//! The amortization, affordability and comparison calculators all go through
//! [`level_payment`] or its inverse [`present_value_of_payment`], so a change
//! to the formula or to the zero-rate handling lands everywhere at once.
//!
//! Both are written in discount form, `1 - (1+r)^-n`, so the power shrinks
//! toward zero instead of growing past the Decimal range. A result that still
//! cannot be represented is reported as `None`, the same "no result" a
//! non-positive input produces.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Percent, Rate, Years};

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// How a zero periodic rate is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroRatePolicy {
    /// No payment is defined at a zero rate; the caller shows nothing.
    #[default]
    Undefined,
    /// Principal is repaid in equal instalments with no interest.
    StraightLine,
}

/// Convert an annual percentage (4.5) into a monthly fractional rate (0.00375).
pub fn monthly_rate(annual_rate_percent: Percent) -> Rate {
    annual_rate_percent / dec!(100) / MONTHS_PER_YEAR
}

/// Number of monthly instalments in a term. Fractional years stay fractional.
pub fn monthly_periods(term_years: Years) -> Option<Decimal> {
    term_years.checked_mul(MONTHS_PER_YEAR)
}

/// `(1 + rate)^-periods`, the value today of one unit due after `periods`.
///
/// Lies in `(0, 1]` for a non-negative rate and may round to zero for long or
/// steep schedules. `None` when the exponent is beyond what can be evaluated.
pub fn discount_factor(rate: Rate, periods: Decimal) -> Option<Decimal> {
    let v = Decimal::ONE.checked_div(Decimal::ONE.checked_add(rate)?)?;
    if periods.fract().is_zero() {
        periods.to_i64().and_then(|n| v.checked_powi(n))
    } else {
        v.checked_powd(periods)
    }
}

/// Level monthly payment that retires `principal` over `periods` at `rate`.
///
/// `payment = P * r / (1 - (1+r)^-n)`
///
/// `None` when the schedule is undefined: non-positive principal or periods,
/// a negative rate, a zero rate under [`ZeroRatePolicy::Undefined`], or a
/// payment outside the Decimal range.
pub fn level_payment(
    principal: Money,
    rate: Rate,
    periods: Decimal,
    policy: ZeroRatePolicy,
) -> Option<Money> {
    if principal <= Decimal::ZERO || periods <= Decimal::ZERO || rate < Decimal::ZERO {
        return None;
    }

    if rate.is_zero() {
        return match policy {
            ZeroRatePolicy::Undefined => None,
            ZeroRatePolicy::StraightLine => principal.checked_div(periods),
        };
    }

    let denom = Decimal::ONE - discount_factor(rate, periods)?;
    if denom <= Decimal::ZERO {
        return None;
    }

    principal.checked_mul(rate)?.checked_div(denom)
}

/// Present value of `periods` level payments of `payment` at `rate`.
///
/// `PV = pmt * (1 - (1+r)^-n) / r`
///
/// Only defined for a positive rate and positive periods.
pub fn present_value_of_payment(payment: Money, rate: Rate, periods: Decimal) -> Option<Money> {
    if rate <= Decimal::ZERO || periods <= Decimal::ZERO {
        return None;
    }

    let annuity = Decimal::ONE - discount_factor(rate, periods)?;
    payment.checked_mul(annuity)?.checked_div(rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_number;
    use rust_decimal_macros::dec;

    #[test]
    fn test_monthly_rate_conversion() {
        assert_eq!(monthly_rate(dec!(4.5)), dec!(0.00375));
        assert_eq!(monthly_periods(dec!(30)), Some(dec!(360)));
    }

    #[test]
    fn test_level_payment_standard_mortgage() {
        let pmt = level_payment(dec!(500_000), dec!(0.00375), dec!(360), ZeroRatePolicy::Undefined)
            .unwrap();
        // 500k at 4.5% over 30 years ≈ 2533.43
        assert!((pmt - dec!(2533.43)).abs() < dec!(0.01), "got {pmt}");
    }

    #[test]
    fn test_zero_rate_policies_diverge() {
        let undefined = level_payment(dec!(120_000), Decimal::ZERO, dec!(120), ZeroRatePolicy::Undefined);
        assert_eq!(undefined, None);

        let straight =
            level_payment(dec!(120_000), Decimal::ZERO, dec!(120), ZeroRatePolicy::StraightLine);
        assert_eq!(straight, Some(dec!(1000)));
    }

    #[test]
    fn test_non_positive_principal_is_undefined() {
        for policy in [ZeroRatePolicy::Undefined, ZeroRatePolicy::StraightLine] {
            assert_eq!(level_payment(Decimal::ZERO, dec!(0.004), dec!(360), policy), None);
            assert_eq!(level_payment(dec!(-5), dec!(0.004), dec!(360), policy), None);
            assert_eq!(level_payment(dec!(1000), dec!(0.004), Decimal::ZERO, policy), None);
        }
    }

    #[test]
    fn test_present_value_inverts_payment() {
        let pv = present_value_of_payment(dec!(800), dec!(0.00375), dec!(360)).unwrap();
        let pmt = level_payment(pv, dec!(0.00375), dec!(360), ZeroRatePolicy::Undefined).unwrap();
        assert!((pmt - dec!(800)).abs() < dec!(0.000001));
    }

    #[test]
    fn test_fractional_periods() {
        // 2.5 years -> 30 payments, integral; 2.55 years -> 30.6, fractional
        let whole = level_payment(
            dec!(10_000),
            dec!(0.005),
            monthly_periods(dec!(2.5)).unwrap(),
            ZeroRatePolicy::Undefined,
        )
        .unwrap();
        let frac = level_payment(
            dec!(10_000),
            dec!(0.005),
            monthly_periods(dec!(2.55)).unwrap(),
            ZeroRatePolicy::Undefined,
        )
        .unwrap();
        assert!(frac < whole);
    }

    #[test]
    fn test_steep_rate_short_term_tends_to_interest_only() {
        // 12000% a year is 10 a month; (1/11)^27 is negligible, so pmt ≈ P * r
        let rate = monthly_rate(dec!(12000));
        let periods = monthly_periods(dec!(2.25)).unwrap();
        let pmt = level_payment(dec!(500_000), rate, periods, ZeroRatePolicy::Undefined).unwrap();
        assert!((pmt - dec!(5_000_000)).abs() < dec!(0.01), "got {pmt}");

        let pv = present_value_of_payment(dec!(800), rate, periods).unwrap();
        assert!((pv - dec!(80)).abs() < dec!(0.01), "got {pv}");
    }

    #[test]
    fn test_out_of_range_is_no_result() {
        let huge = parse_number("7e28");
        assert_eq!(monthly_periods(huge), None);
        assert_eq!(level_payment(huge, huge, dec!(360), ZeroRatePolicy::Undefined), None);
        assert_eq!(present_value_of_payment(huge, dec!(0.000001), dec!(360)), None);
        // Integral but beyond i64
        assert_eq!(discount_factor(dec!(0.01), dec!(100_000_000_000_000_000_000)), None);
    }
}
