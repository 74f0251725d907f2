use mortgage_planner_core::affordability::dsr::{
    self, Affordability, AffordabilityInput, AffordabilityPolicy, DsrBand,
};
use mortgage_planner_core::amortization::schedule::{compute_amortization, LoanInput};
use mortgage_planner_core::forms::AffordabilityForm;
use mortgage_planner_core::parse::parse_number;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn input(income: Decimal, commitments: Decimal, rate: Decimal, years: Decimal) -> AffordabilityInput {
    AffordabilityInput {
        monthly_income: income,
        monthly_commitments: commitments,
        annual_rate_percent: rate,
        term_years: years,
    }
}

// ===========================================================================
// Reference scenarios
// ===========================================================================

#[test]
fn test_default_form_scenario() {
    let out = dsr::compute_affordability(
        &AffordabilityForm::default().to_input(),
        &AffordabilityPolicy::default(),
    );
    let r = out.assessment().expect("expected an assessment");

    // 8000 * 35% - 2000
    assert_eq!(r.serviceable_monthly_payment, dec!(800));
    // Echoes the policy cap exactly
    assert_eq!(r.debt_service_ratio_percent, dec!(35));
    // r = 0.00375, n = 360: 800 * (f - 1) / (r * f) ≈ 157,888.93
    assert!((r.max_loan_amount - dec!(157_888.93)).abs() < dec!(0.01));
    assert!((r.max_property_value - dec!(175_432.14)).abs() < dec!(0.01));
}

#[test]
fn test_commitments_exceed_cap() {
    let out = dsr::compute_affordability(
        &input(dec!(4000), dec!(3000), dec!(4.5), dec!(30)),
        &AffordabilityPolicy::default(),
    );
    let r = out.assessment().unwrap();
    assert_eq!(r.max_loan_amount, Decimal::ZERO);
    assert_eq!(r.max_property_value, Decimal::ZERO);
    assert_eq!(r.serviceable_monthly_payment, Decimal::ZERO);
    assert_eq!(r.debt_service_ratio_percent, dec!(75));
    assert_eq!(r.dsr_band, DsrBand::HighRisk);
}

#[test]
fn test_zero_capacity_distinct_from_invalid() {
    let policy = AffordabilityPolicy::default();
    let over = dsr::compute_affordability(&input(dec!(4000), dec!(3000), dec!(4.5), dec!(30)), &policy);
    let invalid = dsr::compute_affordability(&input(dec!(4000), dec!(3000), Decimal::ZERO, dec!(30)), &policy);
    assert!(matches!(over, Affordability::Assessed(_)));
    assert_eq!(invalid, Affordability::Invalid);
}

// ===========================================================================
// Round trip through the amortization engine
// ===========================================================================

#[test]
fn test_max_loan_reproduces_instalment() {
    let policy = AffordabilityPolicy::default();
    let cases = [
        (dec!(8000), dec!(2000), dec!(4.5), dec!(30)),
        (dec!(12_500), dec!(750), dec!(3.9), dec!(35)),
        (dec!(5200), Decimal::ZERO, dec!(5.25), dec!(20)),
    ];
    for (income, commitments, rate, years) in cases {
        let out = dsr::compute_affordability(&input(income, commitments, rate, years), &policy);
        let r = out.assessment().unwrap();

        let schedule = compute_amortization(&LoanInput {
            principal: r.max_loan_amount,
            annual_rate_percent: rate,
            term_years: years,
        })
        .unwrap();

        assert!(
            (schedule.monthly_payment - r.serviceable_monthly_payment).abs() < dec!(0.0001),
            "payment {} vs available {}",
            schedule.monthly_payment,
            r.serviceable_monthly_payment
        );
    }
}

// ===========================================================================
// Policy
// ===========================================================================

#[test]
fn test_custom_policy_moves_cap() {
    let policy = AffordabilityPolicy {
        max_dsr_percent: dec!(60),
        financing_ratio_percent: dec!(80),
        excellent_dsr_percent: dec!(40),
    };
    let out = dsr::compute_affordability(&input(dec!(10_000), dec!(1000), dec!(4), dec!(30)), &policy);
    let r = out.assessment().unwrap();
    assert_eq!(r.serviceable_monthly_payment, dec!(5000));
    assert_eq!(r.debt_service_ratio_percent, dec!(60));
    assert_eq!(r.max_property_value, r.max_loan_amount / dec!(0.8));
    assert_eq!(r.dsr_band, DsrBand::Good);
}

#[test]
fn test_envelope_serialization_shape() {
    let out = dsr::calculate_affordability(
        &input(dec!(8000), dec!(2000), dec!(4.5), dec!(30)),
        &AffordabilityPolicy::default(),
    )
    .unwrap();
    let json = serde_json::to_value(&out).unwrap();
    assert_eq!(json["result"]["status"], "assessed");
    assert_eq!(json["result"]["assessment"]["dsr_band"], "good");
    assert!(out.warnings.is_empty());
}

// ===========================================================================
// Edge of the Decimal range
// ===========================================================================

#[test]
fn test_steep_rate_short_tenure_is_finite() {
    let form = AffordabilityForm {
        interest_rate: "12000".into(),
        tenure: "2.25".into(),
        ..AffordabilityForm::default()
    };
    let out = dsr::compute_affordability(&form.to_input(), &AffordabilityPolicy::default());
    let r = out.assessment().expect("steep rate still has a finite answer");
    // 10% a month for 27 months: the loan is barely more than one month's interest cover
    assert_eq!(r.serviceable_monthly_payment, dec!(800));
    assert!((r.max_loan_amount - dec!(80)).abs() < dec!(0.01), "got {}", r.max_loan_amount);
}

#[test]
fn test_tiny_income_with_large_commitments_is_invalid() {
    let form = AffordabilityForm {
        monthly_income: "1e-20".into(),
        monthly_commitments: "10000000000".into(),
        ..AffordabilityForm::default()
    };
    let out = dsr::compute_affordability(&form.to_input(), &AffordabilityPolicy::default());
    assert_eq!(out, Affordability::Invalid);
}

#[test]
fn test_huge_income_or_tenure_never_panics() {
    let policy = AffordabilityPolicy::default();
    let cases = [
        input(parse_number("7e28"), Decimal::ZERO, dec!(4.5), dec!(30)),
        input(dec!(8000), parse_number("-7e28"), dec!(4.5), dec!(30)),
        input(dec!(8000), dec!(2000), dec!(4.5), parse_number("7e28")),
        input(dec!(8000), dec!(2000), parse_number("1e-27"), dec!(30)),
    ];
    for case in cases {
        match dsr::compute_affordability(&case, &policy) {
            Affordability::Invalid => {}
            Affordability::Assessed(r) => assert!(r.max_loan_amount >= Decimal::ZERO),
        }
    }
}
