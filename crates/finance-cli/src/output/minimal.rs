use serde_json::Value;

use super::{flatten_fields, result_of, scalar_text};

/// Headline figure for each command, in priority order.
const HEADLINE_KEYS: [&str; 8] = [
    "monthly_payment",
    "unit_cost",
    "total_value",
    "valuation.unit_cost",
    "valuation.total_value",
    "net_income",
    "net_flow",
    "due_date",
];

/// Print just the headline value from the output, falling back to the first
/// field of the result.
pub fn print_minimal(value: &Value) {
    let result = result_of(value);

    let Value::Object(map) = result else {
        println!("{}", scalar_text(result));
        return;
    };

    let fields = flatten_fields(map);
    for key in HEADLINE_KEYS {
        if let Some((_, val)) = fields.iter().find(|(k, v)| k == key && !v.is_empty()) {
            println!("{}", val);
            return;
        }
    }

    if let Some((key, val)) = fields.first() {
        println!("{}: {}", key, val);
    }
}
