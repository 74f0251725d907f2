use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;

use mortgage_planner_core::comparison::selection::{ComparisonSelection, SelectionChange};
use mortgage_planner_core::forms::{AffordabilityForm, ComparisonForm, MortgageForm};
use mortgage_planner_core::PlannerConfig;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Parse an optional config document; `None` gives the built-in defaults.
fn load_config(config_json: Option<String>) -> NapiResult<PlannerConfig> {
    match config_json {
        Some(json) => PlannerConfig::from_json(&json).map_err(to_napi_error),
        None => Ok(PlannerConfig::default()),
    }
}

fn to_json<T: Serialize>(value: &T) -> NapiResult<String> {
    serde_json::to_string(value).map_err(to_napi_error)
}

fn parse_decimal(text: &str) -> NapiResult<Decimal> {
    Decimal::from_str(text.trim()).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Calculator
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_mortgage(input_json: String, config_json: Option<String>) -> NapiResult<String> {
    let input: mortgage_planner_core::calculator::MortgageInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let config = load_config(config_json)?;
    let output = mortgage_planner_core::calculator::calculate_mortgage(&input, &config)
        .map_err(to_napi_error)?;
    to_json(&output)
}

#[napi]
pub fn calculate_amortization(input_json: String) -> NapiResult<String> {
    let input: mortgage_planner_core::amortization::schedule::LoanInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = mortgage_planner_core::amortization::schedule::calculate_amortization(&input)
        .map_err(to_napi_error)?;
    to_json(&output)
}

#[napi]
pub fn calculate_costs(input_json: String, config_json: Option<String>) -> NapiResult<String> {
    let input: mortgage_planner_core::costs::malaysia::PropertyCostInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let config = load_config(config_json)?;
    let output =
        mortgage_planner_core::costs::malaysia::calculate_costs(&input, &config.cost_schedule)
            .map_err(to_napi_error)?;
    to_json(&output)
}

// ---------------------------------------------------------------------------
// Affordability
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_affordability(
    input_json: String,
    config_json: Option<String>,
) -> NapiResult<String> {
    let input: mortgage_planner_core::affordability::dsr::AffordabilityInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let config = load_config(config_json)?;
    let output =
        mortgage_planner_core::affordability::dsr::calculate_affordability(&input, &config.affordability)
            .map_err(to_napi_error)?;
    to_json(&output)
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

#[napi]
pub fn compare_banks(input_json: String, config_json: Option<String>) -> NapiResult<String> {
    let input: mortgage_planner_core::comparison::quotes::ComparisonInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let config = load_config(config_json)?;
    let output =
        mortgage_planner_core::comparison::quotes::calculate_comparison(&input, &config.catalog)
            .map_err(to_napi_error)?;
    to_json(&output)
}

#[napi]
pub fn bank_catalog(config_json: Option<String>) -> NapiResult<String> {
    let config = load_config(config_json)?;
    to_json(&config.catalog.products)
}

#[derive(Serialize)]
struct ToggleOutcome {
    selection: ComparisonSelection,
    change: SelectionChange,
}

/// Toggle a bank in a selection list; a fourth bank leaves the list unchanged.
#[napi]
pub fn toggle_bank(selection_json: String, bank_id: String) -> NapiResult<String> {
    let mut selection: ComparisonSelection =
        serde_json::from_str(&selection_json).map_err(to_napi_error)?;
    let change = selection.toggle(&bank_id);
    to_json(&ToggleOutcome { selection, change })
}

// ---------------------------------------------------------------------------
// Forms & formatting
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct DefaultForms {
    mortgage: MortgageForm,
    affordability: AffordabilityForm,
    comparison: ComparisonForm,
}

#[napi]
pub fn default_forms() -> NapiResult<String> {
    to_json(&DefaultForms {
        mortgage: MortgageForm::default(),
        affordability: AffordabilityForm::default(),
        comparison: ComparisonForm::default(),
    })
}

/// Lenient numeric parse of a form field, returned as a decimal string.
#[napi]
pub fn parse_number(text: String) -> String {
    mortgage_planner_core::parse::parse_number(&text).to_string()
}

#[napi]
pub fn format_ringgit(amount: String) -> NapiResult<String> {
    Ok(mortgage_planner_core::format::format_ringgit(parse_decimal(&amount)?))
}

#[napi]
pub fn format_percent(value: String) -> NapiResult<String> {
    Ok(mortgage_planner_core::format::format_percent(parse_decimal(&value)?))
}

/// Bank package rate as quoted, e.g. `4.4%`.
#[napi]
pub fn format_rate(value: String) -> NapiResult<String> {
    Ok(mortgage_planner_core::format::format_rate(parse_decimal(&value)?))
}
