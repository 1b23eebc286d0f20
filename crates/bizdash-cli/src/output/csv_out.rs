use serde_json::Value;
use std::collections::BTreeSet;
use std::io;

use super::{flatten_fields, scalar_text};

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => {
            let target = map.get("result").unwrap_or(value);
            let _ = wtr.write_record(["field", "value"]);
            for (field, text) in flatten_fields(target) {
                let _ = wtr.write_record([field, text]);
            }
        }
        Value::Array(arr) => write_array_csv(&mut wtr, arr),
        _ => {
            let _ = wtr.write_record([scalar_text(value)]);
        }
    }

    let _ = wtr.flush();
}

/// Columns are the union of keys across rows, since optional transaction
/// fields are omitted when empty.
fn write_array_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, arr: &[Value]) {
    let headers: BTreeSet<&str> = arr
        .iter()
        .filter_map(Value::as_object)
        .flat_map(|m| m.keys().map(String::as_str))
        .collect();

    if headers.is_empty() {
        for item in arr {
            let _ = wtr.write_record([scalar_text(item)]);
        }
        return;
    }

    let _ = wtr.write_record(&headers);
    for map in arr.iter().filter_map(Value::as_object) {
        let row: Vec<String> = headers
            .iter()
            .map(|h| map.get(*h).map(scalar_text).unwrap_or_default())
            .collect();
        let _ = wtr.write_record(&row);
    }
}
