//! Display formatting. Values are rounded here and nowhere else.

use rust_decimal::{Decimal, RoundingStrategy};

/// Whole Ringgit with comma grouping: `RM12,000`, `-RM1,600`.
pub fn format_ringgit(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().normalize().to_string();
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}RM{}", group_thousands(&digits))
}

/// Ratio to one decimal place: `35.0%`.
pub fn format_percent(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(1);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    format!("{rounded}%")
}

/// Quoted interest rate as stored, trailing zeros dropped: `4.25%`, `4.4%`.
pub fn format_rate(percent: Decimal) -> String {
    format!("{}%", percent.normalize())
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
