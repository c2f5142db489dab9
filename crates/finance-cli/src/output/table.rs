use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{flatten_fields, record_arrays, record_headers, record_row, result_of, scalar_text};

/// Format output as tables: one Field/Value table for the scalar result
/// fields, then one table per list of records (schedule rows, daily series).
pub fn print_table(value: &Value) {
    match result_of(value) {
        Value::Object(result) => print_result(result),
        Value::Array(records) => print_records(records),
        other => println!("{}", scalar_text(other)),
    }

    if let Value::Object(envelope) = value {
        print_envelope_notes(envelope);
    }
}

fn print_result(result: &Map<String, Value>) {
    let fields = flatten_fields(result);
    if !fields.is_empty() {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in fields {
            builder.push_record([key, val]);
        }
        println!("{}", Table::from(builder));
    }

    for (name, records) in record_arrays(result) {
        println!("\n{}:", name);
        print_records(records);
    }
}

fn print_records(records: &[Value]) {
    if records.is_empty() {
        println!("(empty)");
        return;
    }
    let headers = record_headers(records);
    if headers.is_empty() {
        for item in records {
            println!("{}", scalar_text(item));
        }
        return;
    }

    let mut builder = Builder::default();
    builder.push_record(headers.clone());
    for record in records {
        builder.push_record(record_row(record, &headers));
    }
    println!("{}", Table::from(builder));
}

fn print_envelope_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}
