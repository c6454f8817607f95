//! Error Handling and Edge Case Tests
//!
//! Every failure is reported on stderr with a distinct exit code:
//! 1 missing input, 2 configuration, 3 syntax, 4 malformed record,
//! 5 duplicate key.

use crate::common::{assert_contains, assert_valid_json, TestDocs, ALL_C};

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

// ============================================================================
// BUILD ERRORS
// ============================================================================

#[test]
fn test_duplicate_key_across_sections() {
    let docs = TestDocs::with_functions_c();
    docs.add_search_page("all", "2", ALL_C);

    let output = docs.run_cli_failure(&["check", "-d", "search"]);
    assert_eq!(output.status.code(), Some(5));
    assert_contains(&stderr(&output), "Duplicate key 'clear'");
}

#[test]
fn test_duplicate_key_within_one_file() {
    let docs = TestDocs::new();
    docs.add_search_page(
        "all",
        "0",
        "var searchData=[['a',['A',['a.html',1,'A']]],['a',['A',['b.html',1,'B']]]];",
    );

    let output = docs.run_cli_failure(&["lookup", "a", "-d", "search"]);
    assert_eq!(output.status.code(), Some(5));
}

#[test]
fn test_record_without_occurrences() {
    let docs = TestDocs::new();
    docs.add_search_page(
        "all",
        "0",
        "var searchData=[['a',['A',['a.html',1,'A']]],['b',['B']]];",
    );

    let output = docs.run_cli_failure(&["check", "-d", "search"]);
    assert_eq!(output.status.code(), Some(4));
    assert_contains(&stderr(&output), "Malformed record #1");
}

#[test]
fn test_record_with_empty_key() {
    let docs = TestDocs::new();
    docs.add_search_page("all", "0", "var searchData=[['',['X',['x.html',1,'X']]]];");

    let output = docs.run_cli_failure(&["check", "-d", "search"]);
    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn test_occurrence_with_missing_fields() {
    let docs = TestDocs::new();
    docs.add_search_page("all", "0", "var searchData=[['x',['X',['x.html',1]]]];");

    let output = docs.run_cli_failure(&["check", "-d", "search"]);
    assert_eq!(output.status.code(), Some(4));
}

// ============================================================================
// SYNTAX ERRORS
// ============================================================================

#[test]
fn test_truncated_file() {
    let docs = TestDocs::new();
    docs.add_search_page("all", "0", "var searchData=\n[\n  ['x',['X',['x.html',1,'X']]");

    let output = docs.run_cli_failure(&["check", "-d", "search"]);
    assert_eq!(output.status.code(), Some(3));
    assert_contains(&stderr(&output), "Parse error");
}

#[test]
fn test_deeply_nested_file() {
    let docs = TestDocs::new();
    docs.add_search_page("all", "0", &"[".repeat(1_000_000));

    let output = docs.run_cli_failure(&["check", "-d", "search"]);
    assert_eq!(output.status.code(), Some(3));
    assert_contains(&stderr(&output), "nesting too deep");
}

#[test]
fn test_not_search_data() {
    let docs = TestDocs::new();
    docs.add_file("notes.js", "function init() { return 1; }\n");

    let output = docs.run_cli_failure(&["check", "-d", "notes.js"]);
    assert_eq!(output.status.code(), Some(3));
}

// ============================================================================
// INPUT AND CONFIGURATION ERRORS
// ============================================================================

#[test]
fn test_missing_data_path() {
    let docs = TestDocs::new();

    let output = docs.run_cli_failure(&["lookup", "x", "-d", "nowhere"]);
    assert_eq!(output.status.code(), Some(1));
    assert_contains(&stderr(&output), "File not found");
}

#[test]
fn test_no_data_configured() {
    let docs = TestDocs::new();

    let output = docs.run_cli_failure(&["keys"]);
    assert_eq!(output.status.code(), Some(2));
    assert_contains(&stderr(&output), "--data");
}

#[test]
fn test_invalid_config_file() {
    let docs = TestDocs::with_functions_c();
    docs.write_config("[search]\nmode = \"fuzzy\"\n");

    let output = docs.run_cli_failure(&["lookup", "clear", "-d", "search"]);
    assert_eq!(output.status.code(), Some(2));
    assert_contains(&stderr(&output), "Config error");
}

// ============================================================================
// EMPTY AND UNUSUAL INPUT
// ============================================================================

#[test]
fn test_empty_search_directory() {
    let docs = TestDocs::new();
    docs.add_search_scaffolding();

    let output = docs.run_cli_success(&["check", "-d", "search", "-f", "json"]);
    let json = assert_valid_json(&output, "empty directory");
    assert_eq!(json["keys"], 0);
    assert_eq!(json["entries"], 0);
}

#[test]
fn test_empty_record_list() {
    let docs = TestDocs::new();
    docs.add_search_page("all", "0", "var searchData=\n[\n];\n");

    let output = docs.run_cli_success(&["lookup", "", "-d", "search", "-f", "json"]);
    let json = assert_valid_json(&output, "empty list");
    assert_eq!(json["count"], 0);
}

#[test]
fn test_escaped_key_matches_raw_query() {
    let docs = TestDocs::new();
    docs.add_search_page(
        "all",
        "5",
        "var searchData=[['operator_3d_3d',['operator==',['classxms_1_1_pt.html#a1',1,'xms::Pt::operator==()']]]];",
    );

    let output = docs.run_cli_success(&["lookup", "operator==", "-d", "search", "-f", "json"]);
    let json = assert_valid_json(&output, "escaped key");
    assert_eq!(json["count"], 1);
    assert_eq!(json["entries"][0]["scope"], "xms::Pt");
}

#[test]
fn test_non_ascii_labels() {
    let docs = TestDocs::new();
    docs.add_search_page(
        "all",
        "1",
        "var searchData=[['größe',['Größe',['class_maß.html',0,'Maß']]]];",
    );

    let output = docs.run_cli_success(&["lookup", "GRÖSSE", "-d", "search", "-f", "json"]);
    let json = assert_valid_json(&output, "non-ascii miss");
    assert_eq!(json["count"], 0);

    let output = docs.run_cli_success(&["lookup", "Größe", "-d", "search", "-f", "json"]);
    let json = assert_valid_json(&output, "non-ascii hit");
    assert_eq!(json["count"], 1);
    assert_eq!(json["entries"][0]["target"], "blank");
}
