//! Response envelope handling.
//!
//! Processing and get-by-id endpoints wrap their payload in `data`; older list
//! endpoints use `results`, sometimes nested inside `data`.

use serde_json::Value;

/// Return the `data` member of an object response, or the response unchanged.
pub fn unwrap_data(response: Value) -> Value {
    unwrap_key(response, "data")
}

/// Unwrap a list response: `data` first, then `results`.
pub fn unwrap_list(response: Value) -> Value {
    unwrap_key(unwrap_data(response), "results")
}

fn unwrap_key(response: Value, key: &str) -> Value {
    match response {
        Value::Object(mut map) if map.contains_key(key) => {
            map.remove(key).unwrap_or(Value::Null)
        }
        other => other,
    }
}
