//! Reference catalog of bank home-loan packages.
//!
//! Rates are indicative reference data compiled into the default catalog;
//! nothing is fetched. A replacement catalog can be supplied through
//! [`crate::PlannerConfig`].

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::PlannerError;
use crate::types::{Money, Percent};
use crate::PlannerResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankProduct {
    pub id: String,
    pub bank_name: String,
    pub package_name: String,
    pub interest_rate_percent: Percent,
    /// Years before early settlement is penalty-free. Reference only.
    pub lock_in_years: u32,
    pub min_income: Money,
    pub max_loan_to_value_percent: Percent,
    #[serde(default)]
    pub features: Vec<String>,
    /// Display colour hint for the presentation layer.
    #[serde(default)]
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankCatalog {
    pub products: Vec<BankProduct>,
}

impl Default for BankCatalog {
    fn default() -> Self {
        Self {
            products: vec![
                BankProduct::maybank(),
                BankProduct::cimb(),
                BankProduct::public_bank(),
                BankProduct::rhb(),
            ],
        }
    }
}

impl BankProduct {
    pub fn maybank() -> Self {
        Self {
            id: "maybank".to_string(),
            bank_name: "Maybank".to_string(),
            package_name: "Home Loan-i".to_string(),
            interest_rate_percent: dec!(4.25),
            lock_in_years: 3,
            min_income: dec!(3000),
            max_loan_to_value_percent: dec!(90),
            features: vec![
                "BRR + 1.75%".to_string(),
                "Flexible payment".to_string(),
                "Online application".to_string(),
            ],
            color: "yellow".to_string(),
        }
    }

    pub fn cimb() -> Self {
        Self {
            id: "cimb".to_string(),
            bank_name: "CIMB".to_string(),
            package_name: "Conventional Home Loan".to_string(),
            interest_rate_percent: dec!(4.35),
            lock_in_years: 5,
            min_income: dec!(3000),
            max_loan_to_value_percent: dec!(90),
            features: vec![
                "BLR - 2.00%".to_string(),
                "No early settlement penalty after lock-in".to_string(),
                "Free valuation".to_string(),
            ],
            color: "red".to_string(),
        }
    }

    pub fn public_bank() -> Self {
        Self {
            id: "public-bank".to_string(),
            bank_name: "Public Bank".to_string(),
            package_name: "PB Home Loan".to_string(),
            interest_rate_percent: dec!(4.15),
            lock_in_years: 3,
            min_income: dec!(2500),
            max_loan_to_value_percent: dec!(95),
            features: vec![
                "BLR - 2.10%".to_string(),
                "Lower minimum income".to_string(),
                "Higher LTV ratio".to_string(),
            ],
            color: "blue".to_string(),
        }
    }

    pub fn rhb() -> Self {
        Self {
            id: "rhb".to_string(),
            bank_name: "RHB Bank".to_string(),
            package_name: "Smart Home Loan".to_string(),
            interest_rate_percent: dec!(4.40),
            lock_in_years: 2,
            min_income: dec!(3500),
            max_loan_to_value_percent: dec!(90),
            features: vec![
                "BRR + 1.85%".to_string(),
                "Shortest lock-in period".to_string(),
                "Cashback promotion".to_string(),
            ],
            color: "green".to_string(),
        }
    }
}

impl BankCatalog {
    pub fn get(&self, id: &str) -> Option<&BankProduct> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.products.iter().map(|p| p.id.as_str())
    }

    /// Ids must be unique and non-empty; rates and LTVs must be sane.
    pub fn validate(&self) -> PlannerResult<()> {
        let mut seen = HashSet::new();
        for p in &self.products {
            if p.id.trim().is_empty() {
                return Err(PlannerError::InvalidInput {
                    field: "catalog.id".into(),
                    reason: format!("Product '{}' has an empty id", p.package_name),
                });
            }
            if !seen.insert(p.id.as_str()) {
                return Err(PlannerError::InvalidInput {
                    field: "catalog.id".into(),
                    reason: format!("Duplicate product id '{}'", p.id),
                });
            }
            if p.interest_rate_percent < Decimal::ZERO {
                return Err(PlannerError::InvalidInput {
                    field: format!("catalog.{}.interest_rate_percent", p.id),
                    reason: "Interest rate cannot be negative".into(),
                });
            }
            if p.max_loan_to_value_percent <= Decimal::ZERO
                || p.max_loan_to_value_percent > dec!(100)
            {
                return Err(PlannerError::InvalidInput {
                    field: format!("catalog.{}.max_loan_to_value_percent", p.id),
                    reason: "Max LTV must be in (0, 100]".into(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let c = BankCatalog::default();
        assert_eq!(c.ids().collect::<Vec<_>>(), vec!["maybank", "cimb", "public-bank", "rhb"]);
        assert_eq!(c.get("public-bank").unwrap().interest_rate_percent, dec!(4.15));
        assert!(c.get("hsbc").is_none());
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut c = BankCatalog::default();
        c.products.push(BankProduct::cimb());
        let err = c.validate().unwrap_err();
        match err {
            PlannerError::InvalidInput { field, .. } => assert_eq!(field, "catalog.id"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_rate_rejected() {
        let mut c = BankCatalog::default();
        c.products[0].interest_rate_percent = dec!(-1);
        assert!(c.validate().is_err());
    }
}
