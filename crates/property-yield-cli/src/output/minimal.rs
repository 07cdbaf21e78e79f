use serde_json::Value;

use super::format_value;

/// Key answers in order of priority: the verdict for `analyze`, the rate for
/// `tax-rate`, the base case for `sensitivity`.
const PRIORITY_KEYS: [&str; 4] = ["meets_threshold", "best_yield", "rate", "base_case_value"];

/// Print just the key answer value from the output, falling back to the
/// first field of the result object.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        for key in PRIORITY_KEYS {
            if let Some(val) = map.get(key) {
                if !val.is_null() {
                    println!("{}", format_value(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_value(val));
            return;
        }
    }

    println!("{}", format_value(result_obj));
}
