//! CLI command integration tests
//!
//! This module contains tests for all CLI commands, verifying correct
//! behavior across subcommands, arguments, configuration and output
//! formats (text, toon, json).

pub mod keys_tests;
