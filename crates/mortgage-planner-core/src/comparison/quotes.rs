//! Side-by-side quotes for the selected bank packages.
//!
//! Every selected product is priced on the same principal and tenure at its
//! own rate. A zero-rate product is priced straight-line rather than dropped,
//! so a promotional 0% package still shows up in the comparison.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::catalog::{BankCatalog, BankProduct};
use super::selection::ComparisonSelection;
use crate::amortization::schedule::{amortize, AmortizationResult};
use crate::time_value::ZeroRatePolicy;
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Years};
use crate::PlannerResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonInput {
    pub principal: Money,
    pub term_years: Years,
    #[serde(default)]
    pub selection: ComparisonSelection,
    /// Gross monthly income, for the minimum-income check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_income: Option<Money>,
    /// Property value, for the maximum-LTV check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_value: Option<Money>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductQuote {
    pub product: BankProduct,
    pub schedule: AmortizationResult,
    /// True for every product whose rate equals the lowest selected rate.
    pub is_best_rate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meets_min_income: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub within_max_ltv: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateRange {
    pub min_percent: Percent,
    pub max_percent: Percent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonOutput {
    /// In selection order.
    pub quotes: Vec<ProductQuote>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_rate_percent: Option<Percent>,
    /// Only present when more than one product is quoted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_range: Option<RateRange>,
    /// Highest minus lowest monthly payment across the quotes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_payment_spread: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_to_value_percent: Option<Percent>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Quote every selected product that exists in `catalog`.
///
/// A product whose schedule falls outside the Decimal range is left out of
/// the quotes rather than failing the whole comparison.
pub fn compare_products(input: &ComparisonInput, catalog: &BankCatalog) -> ComparisonOutput {
    compare_with_warnings(input, catalog).0
}

/// Envelope-wrapped [`compare_products`].
pub fn calculate_comparison(
    input: &ComparisonInput,
    catalog: &BankCatalog,
) -> PlannerResult<ComputationOutput<ComparisonOutput>> {
    let start = Instant::now();
    catalog.validate()?;

    let (output, warnings) = compare_with_warnings(input, catalog);

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "selection": input.selection.iter().collect::<Vec<_>>(),
        "zero_rate_policy": ZeroRatePolicy::StraightLine,
        "best_rate_ties": "all tied products flagged",
    });

    Ok(with_metadata(
        "Bank package comparison (level-payment amortization per product)",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn compare_with_warnings(
    input: &ComparisonInput,
    catalog: &BankCatalog,
) -> (ComparisonOutput, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();

    let mut selected: Vec<&BankProduct> = Vec::with_capacity(input.selection.len());
    for id in input.selection.iter() {
        match catalog.get(id) {
            Some(p) => selected.push(p),
            None => {
                tracing::debug!(%id, "selected product not in catalog");
                warnings.push(format!("Unknown bank product '{id}' was skipped."));
            }
        }
    }

    let best_rate = selected.iter().map(|p| p.interest_rate_percent).min();

    let ltv = match input.property_value {
        Some(v) if v > Decimal::ZERO => input
            .principal
            .checked_div(v)
            .and_then(|ratio| ratio.checked_mul(dec!(100))),
        _ => None,
    };

    let mut quotes: Vec<ProductQuote> = Vec::with_capacity(selected.len());
    if input.principal > Decimal::ZERO && input.term_years > Decimal::ZERO {
        for product in &selected {
            let schedule = match amortize(
                input.principal,
                product.interest_rate_percent,
                input.term_years,
                ZeroRatePolicy::StraightLine,
            ) {
                Some(s) => s,
                None => {
                    tracing::warn!(id = %product.id, "schedule out of range, product not quoted");
                    warnings.push(format!(
                        "{} could not be quoted: the figures are out of numeric range.",
                        product.bank_name
                    ));
                    continue;
                }
            };

            quotes.push(ProductQuote {
                product: (*product).clone(),
                schedule,
                is_best_rate: Some(product.interest_rate_percent) == best_rate,
                meets_min_income: input.monthly_income.map(|inc| inc >= product.min_income),
                within_max_ltv: ltv.map(|l| l <= product.max_loan_to_value_percent),
            });
        }
    } else if !selected.is_empty() {
        warnings.push("Loan amount and tenure must both be positive to quote packages.".into());
    }

    if let Some(income) = input.monthly_income {
        for q in quotes.iter().filter(|q| q.meets_min_income == Some(false)) {
            warnings.push(format!(
                "{} requires a minimum income of {}; {} entered.",
                q.product.bank_name, q.product.min_income, income
            ));
        }
    }

    let rate_range = if quotes.len() > 1 {
        let rates = quotes.iter().map(|q| q.product.interest_rate_percent);
        match (rates.clone().min(), rates.max()) {
            (Some(min_percent), Some(max_percent)) => Some(RateRange {
                min_percent,
                max_percent,
            }),
            _ => None,
        }
    } else {
        None
    };

    let payments = quotes.iter().map(|q| q.schedule.monthly_payment);
    let monthly_payment_spread = match (payments.clone().min(), payments.max()) {
        (Some(lo), Some(hi)) if quotes.len() > 1 => hi.checked_sub(lo),
        _ => None,
    };

    tracing::debug!(quoted = quotes.len(), best_rate = ?best_rate, "comparison computed");

    (
        ComparisonOutput {
            quotes,
            best_rate_percent: best_rate,
            rate_range,
            monthly_payment_spread,
            loan_to_value_percent: ltv,
        },
        warnings,
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
