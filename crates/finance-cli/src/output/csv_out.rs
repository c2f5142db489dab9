use serde_json::Value;
use std::io;

use super::{flatten_fields, record_arrays, record_headers, record_row, result_of, scalar_text};

/// Write output as CSV to stdout.
///
/// Results carrying a list of records (an amortization schedule, a daily
/// series) export that list with one row per record; anything else is
/// written as two-column field/value pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match result_of(value) {
        Value::Object(result) => {
            if let Some((_, records)) = record_arrays(result).into_iter().next() {
                write_records(&mut wtr, records);
            } else {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in flatten_fields(result) {
                    let _ = wtr.write_record([key, val]);
                }
            }
        }
        Value::Array(records) => write_records(&mut wtr, records),
        other => {
            let _ = wtr.write_record([scalar_text(other)]);
        }
    }

    let _ = wtr.flush();
}

fn write_records(wtr: &mut csv::Writer<io::StdoutLock<'_>>, records: &[Value]) {
    let headers = record_headers(records);
    if headers.is_empty() {
        for item in records {
            let _ = wtr.write_record([scalar_text(item)]);
        }
        return;
    }

    let _ = wtr.write_record(&headers);
    for record in records {
        let _ = wtr.write_record(record_row(record, &headers));
    }
}
