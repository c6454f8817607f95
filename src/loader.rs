//! Loading search-data files from disk
//!
//! The generator writes one file per section and leading character into its
//! `search/` directory (`all_0.js`, `functions_2.js`, ...), next to the widget
//! script `search.js` and the section table `searchdata.js`. Only the
//! record files are read here.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::entry::SourceRecord;
use crate::error::{DocsymError, Result};
use crate::index::{BuildOptions, SymbolIndex};
use crate::searchdata::parse_search_data;

/// Files in a search directory that never hold records
const NON_RECORD_FILES: &[&str] = &["search.js", "searchdata.js"];

/// Options for loading data files into an index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Only read `<section>_<n>.js` files from directories
    pub section: Option<String>,
    pub build: BuildOptions,
}

impl LoadOptions {
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    pub fn merging(mut self, merge: bool) -> Self {
        self.build.merge_duplicates = merge;
        self
    }
}

/// Read and parse one search-data file
pub fn load_file(path: &Path) -> Result<Vec<SourceRecord>> {
    if !path.is_file() {
        return Err(DocsymError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let content = fs::read_to_string(path)?;
    let records = parse_search_data(&content).map_err(|e| {
        warn!("Failed to load {}: {}", path.display(), e);
        e
    })?;

    debug!("Read {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Split `functions_2` into (`functions`, `2`)
fn section_of(stem: &str) -> Option<(&str, &str)> {
    let (section, page) = stem.rsplit_once('_')?;
    if section.is_empty() || page.is_empty() || !page.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some((section, page))
}

/// List record files of a search directory in page order
pub fn collect_data_files(dir: &Path, section: Option<&str>) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(DocsymError::FileNotFound {
            path: dir.display().to_string(),
        });
    }

    let mut files: Vec<(String, u64, PathBuf)> = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }

        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if NON_RECORD_FILES.contains(&name) {
            continue;
        }

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if ext != "js" && ext != "json" {
            continue;
        }

        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
        let (file_section, page) = match section_of(stem) {
            Some(parts) => parts,
            None => (stem, ""),
        };

        if let Some(wanted) = section {
            if file_section != wanted {
                continue;
            }
        }

        // Pages are numbered 0, 1, ... 10 (or hex digits); order numerically
        let order = u64::from_str_radix(page, 16).unwrap_or(0);
        files.push((file_section.to_string(), order, path));
    }

    files.sort();
    debug!("Found {} search-data files in {}", files.len(), dir.display());

    Ok(files.into_iter().map(|(_, _, path)| path).collect())
}

/// Read every record file of a search directory
pub fn load_dir(dir: &Path, section: Option<&str>) -> Result<Vec<SourceRecord>> {
    let mut records = Vec::new();
    for file in collect_data_files(dir, section)? {
        records.extend(load_file(&file)?);
    }
    Ok(records)
}

/// Read records from files and directories, in argument order
pub fn load_paths<P: AsRef<Path>>(paths: &[P], section: Option<&str>) -> Result<Vec<SourceRecord>> {
    let mut records = Vec::new();

    for path in paths {
        let path = path.as_ref();
        if path.is_dir() {
            records.extend(load_dir(path, section)?);
        } else {
            records.extend(load_file(path)?);
        }
    }

    Ok(records)
}

/// Load all paths and build one index
pub fn load_index<P: AsRef<Path>>(paths: &[P], options: &LoadOptions) -> Result<SymbolIndex> {
    let records = load_paths(paths, options.section.as_deref())?;
    let record_count = records.len();
    let index = SymbolIndex::build_with(records, options.build)?;

    info!(
        "Loaded {} records from {} path(s): {} keys, {} entries",
        record_count,
        paths.len(),
        index.len(),
        index.entry_count()
    );

    Ok(index)
}
