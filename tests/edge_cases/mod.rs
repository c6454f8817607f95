//! Edge case and error handling tests

pub mod error_handling_tests;
