use serde_json::Value;

use super::format_scalar;

/// Field paths tried in order; the first non-null one is printed.
const PRIORITY_PATHS: &[&str] = &[
    "amortization.monthly_payment",
    "monthly_payment",
    "assessment.max_loan_amount",
    "total_upfront",
    "best_rate_percent",
];

/// Print just the headline number from the output.
pub fn print_minimal(value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if result.is_object() {
        for path in PRIORITY_PATHS {
            if let Some(val) = lookup(result, path).filter(|v| !v.is_null()) {
                println!("{}", format_scalar(val));
                return;
            }
        }

        if let Some((key, val)) = result.as_object().and_then(|m| m.iter().next()) {
            println!("{}: {}", key, format_scalar(val));
            return;
        }
    }

    if result.is_null() {
        println!("null");
    } else {
        println!("{}", format_scalar(result));
    }
}

fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |v, key| v.get(key))
}
