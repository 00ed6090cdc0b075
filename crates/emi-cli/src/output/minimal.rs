use serde_json::Value;

use super::scalar_text;

/// Print just the key answer of the output.
///
/// The installment for schedule computations, the error for a rejected
/// request, the file for an export, the row count for a bare schedule.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let priority_keys = ["installment_amount", "emi", "error", "file"];

    match result_obj {
        Value::Object(map) => {
            for key in &priority_keys {
                if let Some(val) = map.get(*key) {
                    if !val.is_null() {
                        println!("{}", scalar_text(val));
                        return;
                    }
                }
            }
            if let Some((key, val)) = map.iter().next() {
                println!("{}: {}", key, scalar_text(val));
            }
        }
        Value::Array(rows) => println!("{} rows", rows.len()),
        other => println!("{}", scalar_text(other)),
    }
}
