//! TestDocs builder for integration testing
//!
//! Lays out a temporary documentation tree with a `search/` directory the way
//! the generator writes it, and runs the compiled `docsym` binary against it.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Builder for temporary documentation trees
pub struct TestDocs {
    dir: TempDir,
}

impl TestDocs {
    /// Create a new empty documentation tree
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Tree with `search/functions_2.js` holding the `c` page fixture
    pub fn with_functions_c() -> Self {
        let docs = Self::new();
        docs.add_search_page("functions", "2", super::FUNCTIONS_C);
        docs
    }

    /// Get the path to the tree root
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of the `search/` directory
    pub fn search_dir(&self) -> PathBuf {
        self.dir.path().join("search")
    }

    /// Path of the config file handed to the CLI
    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("docsym.toml")
    }

    /// Add a file with the given content
    pub fn add_file(&self, relative_path: &str, content: &str) -> &Self {
        let full_path = self.dir.path().join(relative_path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        self
    }

    /// Add `search/<section>_<page>.js`
    pub fn add_search_page(&self, section: &str, page: &str, content: &str) -> &Self {
        self.add_file(&format!("search/{}_{}.js", section, page), content)
    }

    /// Add the generator's non-record files to `search/`
    pub fn add_search_scaffolding(&self) -> &Self {
        self.add_file(
            "search/searchdata.js",
            "var indexSectionsWithContent =\n{\n  0: \"c\",\n  1: \"c\"\n};\n",
        )
        .add_file("search/search.js", "function convertToId(search) { return search; }\n")
        .add_file("search/search.css", "#MSearchBox { display: inline-block; }\n")
    }

    /// Write the config file used by every CLI run
    pub fn write_config(&self, content: &str) -> &Self {
        fs::write(self.config_path(), content).expect("Failed to write config");
        self
    }

    /// Run the docsym binary and return its output
    pub fn run_cli(&self, args: &[&str]) -> std::io::Result<Output> {
        Command::new(env!("CARGO_BIN_EXE_docsym"))
            .current_dir(self.path())
            .env("DOCSYM_CONFIG", self.config_path())
            .env_remove("RUST_LOG")
            .args(args)
            .output()
    }

    /// Run CLI and expect success, return stdout
    pub fn run_cli_success(&self, args: &[&str]) -> String {
        let output = self.run_cli(args).expect("Failed to run CLI");
        assert!(
            output.status.success(),
            "CLI failed with args {:?}\nstdout: {}\nstderr: {}",
            args,
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    /// Run CLI and expect failure, return the raw output
    pub fn run_cli_failure(&self, args: &[&str]) -> Output {
        let output = self.run_cli(args).expect("Failed to run CLI");
        assert!(
            !output.status.success(),
            "CLI unexpectedly succeeded with args {:?}\nstdout: {}",
            args,
            String::from_utf8_lossy(&output.stdout)
        );
        output
    }
}
