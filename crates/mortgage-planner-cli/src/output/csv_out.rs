use serde_json::Value;
use std::io;

use super::{flatten, format_scalar};

/// Write output as CSV to stdout.
///
/// A result holding a list of quotes is written one row per quote; any other
/// result is written as two-column `field,value` pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => match result.get("quotes") {
                Some(Value::Array(quotes)) => write_array_csv(&mut wtr, quotes),
                _ => write_pairs(&mut wtr, result),
            },
            Some(Value::Null) => {}
            _ => write_pairs(&mut wtr, map),
        },
        Value::Array(arr) => write_array_csv(&mut wtr, arr),
        _ => {
            let _ = wtr.write_record([&format_scalar(value)]);
        }
    }

    let _ = wtr.flush();
}

fn write_pairs(wtr: &mut csv::Writer<io::StdoutLock<'_>>, map: &serde_json::Map<String, Value>) {
    let _ = wtr.write_record(["field", "value"]);
    for (key, val) in flatten(map) {
        let _ = wtr.write_record([key.as_str(), &format_scalar(&val)]);
    }
}

fn write_array_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, arr: &[Value]) {
    let rows: Vec<Vec<(String, Value)>> = arr
        .iter()
        .filter_map(Value::as_object)
        .map(flatten)
        .collect();

    let Some(first) = rows.first() else {
        for item in arr {
            let _ = wtr.write_record([&format_scalar(item)]);
        }
        return;
    };

    let headers: Vec<&str> = first.iter().map(|(k, _)| k.as_str()).collect();
    let _ = wtr.write_record(&headers);
    for row in &rows {
        let cells: Vec<String> = headers
            .iter()
            .map(|h| {
                row.iter()
                    .find(|(k, _)| k == h)
                    .map(|(_, v)| format_scalar(v))
                    .unwrap_or_default()
            })
            .collect();
        let _ = wtr.write_record(&cells);
    }
}
