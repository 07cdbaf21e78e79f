use serde_json::Value;
use std::io;

use super::{flatten, format_value};

/// Write output as `field,value` CSV to stdout. Only the `result` section of
/// an envelope is written.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let body = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let _ = wtr.write_record(["field", "value"]);
    for (key, val) in flatten(body) {
        let _ = wtr.write_record([key, format_value(val)]);
    }

    let _ = wtr.flush();
}
