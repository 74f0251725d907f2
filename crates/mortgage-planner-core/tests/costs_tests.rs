use mortgage_planner_core::costs::malaysia::{self, CostSchedule, PropertyCostInput};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn costs(value: Decimal, loan: Decimal) -> malaysia::CostBreakdown {
    malaysia::compute_costs(
        &PropertyCostInput {
            property_value: value,
            loan_principal: loan,
        },
        &CostSchedule::default(),
    )
}

// ===========================================================================
// Reference scenario
// ===========================================================================

#[test]
fn test_six_hundred_thousand_breakdown() {
    let c = costs(dec!(600_000), dec!(500_000));
    assert_eq!(
        c,
        malaysia::CostBreakdown {
            // 9000 + 100k * 3%
            stamp_duty: dec!(12_000),
            // 2500 + 450k * 0.8%
            legal_fees: dec!(6_100),
            // 600k * 0.25%, below the 2500 cap
            valuation_fee: dec!(1_500),
            // 500k * 0.6%
            mortgage_insurance: dec!(3_000),
            total_upfront: dec!(22_600),
        }
    );
}

#[test]
fn test_total_is_unrounded_sum() {
    let c = costs(dec!(333_333.33), dec!(299_999.99));
    assert_eq!(
        c.total_upfront,
        c.stamp_duty + c.legal_fees + c.valuation_fee + c.mortgage_insurance
    );
    assert_ne!(c.mortgage_insurance.fract(), Decimal::ZERO);
}

// ===========================================================================
// Bracket boundaries
// ===========================================================================

#[test]
fn test_stamp_duty_continuous_at_boundaries() {
    let epsilon = dec!(0.0001);
    for boundary in [dec!(100_000), dec!(500_000), dec!(1_000_000)] {
        let at = costs(boundary, Decimal::ZERO).stamp_duty;
        let above = costs(boundary + epsilon, Decimal::ZERO).stamp_duty;
        assert!(above > at);
        assert!(above - at < dec!(0.001), "jump at {boundary}: {at} -> {above}");
    }
}

#[test]
fn test_stamp_duty_bracket_values() {
    assert_eq!(costs(dec!(100_000), Decimal::ZERO).stamp_duty, dec!(1_000));
    assert_eq!(costs(dec!(500_000), Decimal::ZERO).stamp_duty, dec!(9_000));
    assert_eq!(costs(dec!(1_000_000), Decimal::ZERO).stamp_duty, dec!(24_000));
    assert_eq!(costs(dec!(1_500_000), Decimal::ZERO).stamp_duty, dec!(44_000));
}

#[test]
fn test_legal_fees_continuous_at_boundaries() {
    assert_eq!(costs(dec!(150_000), Decimal::ZERO).legal_fees, dec!(2_500));
    assert_eq!(costs(dec!(1_000_000), Decimal::ZERO).legal_fees, dec!(9_300));
    let just_above = costs(dec!(150_000.01), Decimal::ZERO).legal_fees;
    assert!(just_above - dec!(2_500) < dec!(0.001));
}

#[test]
fn test_valuation_fee_cap() {
    // Cap reached at exactly 1,000,000
    assert_eq!(costs(dec!(1_000_000), Decimal::ZERO).valuation_fee, dec!(2_500));
    assert_eq!(costs(dec!(5_000_000), Decimal::ZERO).valuation_fee, dec!(2_500));
    assert_eq!(costs(dec!(999_600), Decimal::ZERO).valuation_fee, dec!(2_499));
}

// ===========================================================================
// Legal fee floor
// ===========================================================================

#[test]
fn test_legal_fee_floor() {
    let schedule = CostSchedule::default();
    // At zero value the first bracket charges its 1000 base, above the floor.
    assert_eq!(schedule.legal_fees.apply_unfloored(Decimal::ZERO), dec!(1_000));
    assert_eq!(schedule.legal_fees.apply(Decimal::ZERO), dec!(1_000));
    // Below the scale the floor takes over.
    assert_eq!(schedule.legal_fees.apply_unfloored(dec!(-70_000)), dec!(300));
    assert_eq!(schedule.legal_fees.apply(dec!(-70_000)), dec!(500));
}

#[test]
fn test_custom_schedule_floor_binds_at_zero() {
    let mut schedule = CostSchedule::default();
    schedule.legal_fees.brackets[0].base = Decimal::ZERO;
    let c = malaysia::compute_costs(
        &PropertyCostInput {
            property_value: Decimal::ZERO,
            loan_principal: Decimal::ZERO,
        },
        &schedule,
    );
    assert_eq!(schedule.legal_fees.apply_unfloored(Decimal::ZERO), Decimal::ZERO);
    assert_eq!(c.legal_fees, dec!(500));
    assert_eq!(c.total_upfront, dec!(500));
}

#[test]
fn test_mrta_uncapped() {
    let c = costs(dec!(10_000_000), dec!(9_000_000));
    assert_eq!(c.mortgage_insurance, dec!(54_000));
}
