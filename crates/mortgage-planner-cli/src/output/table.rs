use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{flatten, format_scalar, nested_tables};

/// Format output as tables using the tabled crate.
///
/// Nested objects become dotted rows; lists of objects (bank quotes, the
/// catalog) are rendered as their own tables beneath the result.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(result) => print_result_table(result, map),
            None => print_object(map),
        },
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", value),
    }
}

fn print_result_table(result: &Value, envelope: &Map<String, Value>) {
    match result {
        Value::Object(res_map) => print_object(res_map),
        Value::Null => println!("(no result)"),
        other => println!("{}", format_scalar(other)),
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_object(map: &Map<String, Value>) {
    let rows = flatten(map);
    if !rows.is_empty() {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in &rows {
            builder.push_record([key.as_str(), &format_scalar(val)]);
        }
        println!("{}", Table::from(builder));
    }

    for (key, items) in nested_tables(map) {
        println!("\n{}:", key);
        print_array_table(items);
    }
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    let rows: Vec<Vec<(String, Value)>> = arr
        .iter()
        .filter_map(Value::as_object)
        .map(flatten)
        .collect();

    if rows.is_empty() {
        for item in arr {
            println!("{}", format_scalar(item));
        }
        return;
    }

    let headers: Vec<String> = rows[0].iter().map(|(k, _)| k.clone()).collect();
    let mut builder = Builder::default();
    builder.push_record(headers.iter().map(String::as_str));
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
        builder.push_record(cells);
    }
    println!("{}", Table::from(builder));
}
