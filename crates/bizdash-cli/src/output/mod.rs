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

/// Flatten nested objects into dotted `(field, value)` rows. Arrays of
/// objects (chart series, projections) collapse to a row count.
pub fn flatten_fields(value: &Value) -> Vec<(String, String)> {
    let mut rows = Vec::new();
    flatten_into("", value, &mut rows);
    rows
}

fn flatten_into(prefix: &str, value: &Value, rows: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let field = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_into(&field, val, rows);
            }
        }
        Value::Array(items) if items.iter().any(Value::is_object) => {
            rows.push((prefix.to_string(), format!("({} rows)", items.len())));
        }
        other => rows.push((prefix.to_string(), scalar_text(other))),
    }
}

/// Plain-text rendering of a JSON value.
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => arr.iter().map(scalar_text).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_nested_result() {
        let rows = flatten_fields(&json!({
            "current_month": {"revenue": "1395", "revenue_by_category": {"Services": "1145"}},
            "chart": [{"units": "1"}, {"units": "2"}],
            "advice": null
        }));
        assert!(rows.contains(&("current_month.revenue".to_string(), "1395".to_string())));
        assert!(rows.contains(&(
            "current_month.revenue_by_category.Services".to_string(),
            "1145".to_string()
        )));
        assert!(rows.contains(&("chart".to_string(), "(2 rows)".to_string())));
        assert!(rows.contains(&("advice".to_string(), String::new())));
    }
}
