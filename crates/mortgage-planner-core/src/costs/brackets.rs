//! Progressive fee schedules.
//!
//! A schedule is an ordered list of brackets. A value is priced by the first
//! bracket whose upper bound contains it: `base + (value - lower) * rate`.
//! Bases carry the cumulative fee of the brackets below, so the schedule is
//! continuous at the boundaries when configured that way.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PlannerError;
use crate::types::{Money, Rate};
use crate::PlannerResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeBracket {
    /// Value from which `marginal_rate` accrues.
    pub lower: Money,
    /// Inclusive upper bound; `None` for the top bracket.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper: Option<Money>,
    /// Fixed amount charged on entering the bracket.
    pub base: Money,
    pub marginal_rate: Rate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BracketSchedule {
    pub brackets: Vec<FeeBracket>,
    /// Minimum fee after bracket pricing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<Money>,
}

impl FeeBracket {
    pub fn new(lower: Money, upper: Option<Money>, base: Money, marginal_rate: Rate) -> Self {
        Self {
            lower,
            upper,
            base,
            marginal_rate,
        }
    }

    fn contains(&self, value: Money) -> bool {
        self.upper.map_or(true, |u| value <= u)
    }

    /// Saturates at the Decimal bounds rather than overflowing.
    fn price(&self, value: Money) -> Money {
        let marginal = value
            .saturating_sub(self.lower)
            .saturating_mul(self.marginal_rate);
        self.base.saturating_add(marginal)
    }
}

impl BracketSchedule {
    /// Price `value` against the schedule. Values below every bound fall into
    /// the first bracket, so negative inputs yield the formula's result.
    pub fn apply(&self, value: Money) -> Money {
        let raw = self.apply_unfloored(value);
        match self.floor {
            Some(floor) => raw.max(floor),
            None => raw,
        }
    }

    /// Bracket price before the floor is applied.
    pub fn apply_unfloored(&self, value: Money) -> Money {
        self.brackets
            .iter()
            .find(|b| b.contains(value))
            .map(|b| b.price(value))
            .unwrap_or(Decimal::ZERO)
    }

    /// Upper bounds must ascend and only the last bracket may be open.
    pub fn validate(&self, field: &str) -> PlannerResult<()> {
        if self.brackets.is_empty() {
            return Err(PlannerError::InvalidInput {
                field: field.into(),
                reason: "At least one bracket is required".into(),
            });
        }

        let last = self.brackets.len() - 1;
        let mut previous_upper: Option<Money> = None;
        for (i, b) in self.brackets.iter().enumerate() {
            match b.upper {
                None if i != last => {
                    return Err(PlannerError::InvalidInput {
                        field: field.into(),
                        reason: format!("Bracket {i} is open-ended but is not the last bracket"),
                    });
                }
                Some(u) => {
                    if let Some(prev) = previous_upper {
                        if u <= prev {
                            return Err(PlannerError::InvalidInput {
                                field: field.into(),
                                reason: format!("Bracket {i} upper bound must exceed {prev}"),
                            });
                        }
                    }
                    previous_upper = Some(u);
                }
                None => {}
            }
            if b.marginal_rate < Decimal::ZERO {
                return Err(PlannerError::InvalidInput {
                    field: field.into(),
                    reason: format!("Bracket {i} marginal rate cannot be negative"),
                });
            }
        }
        Ok(())
    }
}
