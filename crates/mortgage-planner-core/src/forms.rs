//! Raw form state for each calculator tab.
//!
//! Fields hold exactly what the user typed. Converting to an engine input
//! runs every field through [`parse_number`], so a half-typed or cleared
//! field never blocks recomputation; it simply reads as zero.

use serde::{Deserialize, Serialize};

use crate::parse::parse_number;

#[cfg(feature = "affordability")]
use crate::affordability::dsr::AffordabilityInput;
#[cfg(feature = "calculator")]
use crate::calculator::MortgageInput;
#[cfg(feature = "comparison")]
use crate::comparison::quotes::ComparisonInput;
#[cfg(feature = "comparison")]
use crate::comparison::selection::ComparisonSelection;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MortgageForm {
    pub property_value: String,
    pub loan_amount: String,
    pub interest_rate: String,
    pub tenure: String,
}

impl Default for MortgageForm {
    fn default() -> Self {
        Self {
            property_value: "600000".into(),
            loan_amount: "500000".into(),
            interest_rate: "4.5".into(),
            tenure: "30".into(),
        }
    }
}

#[cfg(feature = "calculator")]
impl MortgageForm {
    pub fn to_input(&self) -> MortgageInput {
        MortgageInput {
            property_value: parse_number(&self.property_value),
            loan_amount: parse_number(&self.loan_amount),
            annual_rate_percent: parse_number(&self.interest_rate),
            term_years: parse_number(&self.tenure),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AffordabilityForm {
    pub monthly_income: String,
    pub monthly_commitments: String,
    pub interest_rate: String,
    pub tenure: String,
}

impl Default for AffordabilityForm {
    fn default() -> Self {
        Self {
            monthly_income: "8000".into(),
            monthly_commitments: "2000".into(),
            interest_rate: "4.5".into(),
            tenure: "30".into(),
        }
    }
}

#[cfg(feature = "affordability")]
impl AffordabilityForm {
    pub fn to_input(&self) -> AffordabilityInput {
        AffordabilityInput {
            monthly_income: parse_number(&self.monthly_income),
            monthly_commitments: parse_number(&self.monthly_commitments),
            annual_rate_percent: parse_number(&self.interest_rate),
            term_years: parse_number(&self.tenure),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonForm {
    pub loan_amount: String,
    pub tenure: String,
    pub selected_banks: Vec<String>,
}

impl Default for ComparisonForm {
    fn default() -> Self {
        Self {
            loan_amount: "500000".into(),
            tenure: "30".into(),
            selected_banks: vec!["maybank".into(), "cimb".into(), "public-bank".into()],
        }
    }
}

#[cfg(feature = "comparison")]
impl ComparisonForm {
    pub fn to_input(&self) -> ComparisonInput {
        ComparisonInput {
            principal: parse_number(&self.loan_amount),
            term_years: parse_number(&self.tenure),
            selection: ComparisonSelection::from_ids(self.selected_banks.iter().cloned()),
            monthly_income: None,
            property_value: None,
        }
    }
}
