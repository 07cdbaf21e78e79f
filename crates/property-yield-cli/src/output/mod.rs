pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Flatten nested objects into `(dotted.path, value)` rows, e.g.
/// `returns_and_yields.net_yield_levered.favorable`. Arrays stay as leaves.
pub fn flatten(value: &Value) -> Vec<(String, &Value)> {
    let mut rows = Vec::new();
    flatten_into(None, value, &mut rows);
    rows
}

fn flatten_into<'a>(prefix: Option<&str>, value: &'a Value, rows: &mut Vec<(String, &'a Value)>) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let path = match prefix {
                    Some(p) => format!("{}.{}", p, key),
                    None => key.clone(),
                };
                flatten_into(Some(path.as_str()), val, rows);
            }
        }
        _ => rows.push((prefix.unwrap_or_default().to_string(), value)),
    }
}

/// Render a leaf value as plain text.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) if arr.iter().all(|v| !v.is_object() && !v.is_array()) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
