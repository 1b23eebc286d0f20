use serde_json::Value;

use super::scalar_text;

/// Headline figure for each kind of result, as JSON pointers into `result`.
const PRIORITY_POINTERS: [&str; 6] = [
    "/analysis/break_even_point",
    "/current_month/profit",
    "/today/revenue",
    // top customer
    "/0/name",
    // --formatted metrics summary
    "/profit",
    "/break_even_point",
];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    for pointer in PRIORITY_POINTERS {
        if let Some(val) = result_obj.pointer(pointer) {
            if !val.is_null() {
                println!("{}", scalar_text(val));
                return;
            }
        }
    }

    if let Value::Object(map) = result_obj {
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, scalar_text(val));
            return;
        }
    }

    println!("{}", scalar_text(result_obj));
}
