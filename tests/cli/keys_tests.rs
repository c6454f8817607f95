//! Tests for the `keys` CLI command

#![allow(unused_imports)]

use crate::common::{
    assert_contains, assert_json_type, assert_valid_json, assert_valid_toon, listed_keys,
    TestDocs, FUNCTIONS_C_KEYS, FUNCTIONS_D,
};

#[test]
fn test_keys_lists_all_in_order() {
    let docs = TestDocs::with_functions_c();

    let output = docs.run_cli_success(&["keys", "-d", "search", "-f", "json"]);
    let json = assert_valid_json(&output, "keys");
    assert_json_type(&json, "keys");

    assert_eq!(listed_keys(&json), FUNCTIONS_C_KEYS);
    assert_eq!(json["total_keys"], 12);
    assert_eq!(json["keys"][2]["label"], "CheckPoint");
    assert_eq!(json["keys"][2]["entries"], 3);
}

#[test]
fn test_keys_prefix_filter() {
    let docs = TestDocs::with_functions_c();

    let output = docs.run_cli_success(&["keys", "-d", "search", "--prefix", "Create", "-f", "json"]);
    let json = assert_valid_json(&output, "keys prefix");
    assert_eq!(
        listed_keys(&json),
        ["createbreaklines", "createfornewthread", "createptsearch"]
    );
    assert_eq!(json["count"], 3);
}

#[test]
fn test_keys_limit() {
    let docs = TestDocs::with_functions_c();

    let output = docs.run_cli_success(&["k", "-d", "search", "--limit", "2", "-f", "json"]);
    let json = assert_valid_json(&output, "keys limit");
    assert_eq!(listed_keys(&json), ["calctvals", "checkandswap"]);
    assert_eq!(json["total_keys"], 12);
}

#[test]
fn test_keys_span_pages() {
    let docs = TestDocs::with_functions_c();
    docs.add_search_page("functions", "3", FUNCTIONS_D)
        .add_search_scaffolding();

    let output = docs.run_cli_success(&["keys", "-d", "search", "-f", "json"]);
    let keys = listed_keys(&assert_valid_json(&output, "two pages"));
    assert_eq!(keys.len(), 14);
    assert_eq!(keys[12], "dataforcrosssection");
}

#[test]
fn test_keys_text_format() {
    let docs = TestDocs::with_functions_c();

    let output = docs.run_cli_success(&["keys", "-d", "search"]);
    assert_contains(&output, "calctvals (CalcTvals)\n");
    assert_contains(&output, "clear (Clear) [3]\n");
}

#[test]
fn test_keys_toon_format() {
    let docs = TestDocs::with_functions_c();

    let output = docs.run_cli_success(&["keys", "-d", "search", "-f", "toon"]);
    assert_valid_toon(&output, "keys toon");
    assert_contains(&output, "curridx");
}
