//! Lenient parsing of numeric form fields.
//!
//! Form values arrive as free text. A field is read the way a browser's
//! `parseFloat` reads it: leading whitespace is skipped and the longest
//! numeric prefix is taken, so `"500,000"` reads as 500 and `"4.5%"` as 4.5.
//! Anything without a numeric prefix reads as zero. Parsing never fails.

use rust_decimal::Decimal;
use std::str::FromStr;

const MAX_EXPONENT: i32 = 28;

/// Parse a form value, treating empty or unparseable text as zero.
pub fn parse_number(text: &str) -> Decimal {
    let Some(prefix) = numeric_prefix(text.trim_start()) else {
        return Decimal::ZERO;
    };

    let parsed = if let Some((_, exp)) = prefix.split_once('e') {
        // Beyond 28 places nothing fits in a Decimal.
        match exp.parse::<i32>() {
            Ok(e) if e.abs() <= MAX_EXPONENT => Decimal::from_scientific(&prefix),
            _ => return Decimal::ZERO,
        }
    } else {
        Decimal::from_str(&prefix)
    };

    parsed.unwrap_or(Decimal::ZERO)
}

/// Normalised numeric prefix: `[-]digits[.digits][e[-]digits]`.
fn numeric_prefix(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    let mut i = 0;
    let mut out = String::new();

    if let Some(&sign) = bytes.first() {
        if sign == b'-' || sign == b'+' {
            if sign == b'-' {
                out.push('-');
            }
            i += 1;
        }
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = &s[int_start..i];

    let mut frac_digits = "";
    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        frac_digits = &s[frac_start..j];
        i = j;
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return None;
    }

    out.push_str(if int_digits.is_empty() { "0" } else { int_digits });
    if !frac_digits.is_empty() {
        out.push('.');
        out.push_str(frac_digits);
    }

    // Exponent only counts when at least one digit follows it.
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        let mut exp = String::from("e");
        if j < bytes.len() && (bytes[j] == b'-' || bytes[j] == b'+') {
            if bytes[j] == b'-' {
                exp.push('-');
            }
            j += 1;
        }
        let digits_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > digits_start {
            exp.push_str(&s[digits_start..j]);
            out.push_str(&exp);
        }
    }

    Some(out)
}
