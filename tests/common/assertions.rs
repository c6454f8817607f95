//! Custom assertions for integration tests
//!
//! Helpers for validating CLI output across text, TOON and JSON formats.

use serde_json::Value;

/// Assert that output is valid JSON and return parsed value
pub fn assert_valid_json(output: &str, context: &str) -> Value {
    serde_json::from_str(output).unwrap_or_else(|e| {
        panic!(
            "Expected valid JSON ({}): {}\nOutput:\n{}",
            context, e, output
        )
    })
}

/// Assert that output contains valid TOON markers
pub fn assert_valid_toon(output: &str, context: &str) {
    assert!(
        output.contains("_type:"),
        "Expected TOON output to contain '_type:' marker ({})\nOutput:\n{}",
        context,
        output
    );
}

/// Assert that JSON output has expected type
pub fn assert_json_type(json: &Value, expected_type: &str) {
    let actual_type = json["_type"]
        .as_str()
        .unwrap_or_else(|| panic!("JSON missing '_type' field"));
    assert_eq!(
        actual_type, expected_type,
        "Expected JSON type '{}' but got '{}'",
        expected_type, actual_type
    );
}

/// Assert that output contains a substring
pub fn assert_contains(output: &str, needle: &str) {
    assert!(
        output.contains(needle),
        "Expected output to contain '{}'\nOutput:\n{}",
        needle,
        output
    );
}

/// `scope::label` of every entry in a lookup JSON result
pub fn entry_names(json: &Value) -> Vec<String> {
    json["entries"]
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .map(|e| {
                    let label = e["label"].as_str().unwrap_or_default();
                    match e["scope"].as_str() {
                        Some(scope) => format!("{}::{}", scope, label),
                        None => label.to_string(),
                    }
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Keys listed in a keys JSON result
pub fn listed_keys(json: &Value) -> Vec<String> {
    json["keys"]
        .as_array()
        .map(|keys| {
            keys.iter()
                .filter_map(|k| k["key"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
