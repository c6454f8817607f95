//! docsym: symbol lookup over generated documentation search indexes
//!
//! Documentation generators such as Doxygen ship a client-side search index:
//! a list of `[key, [label, [url, flag, scope], ...]]` records, one file per
//! section and leading character. This crate loads those records into an
//! immutable [`SymbolIndex`] and answers exact, prefix and substring queries
//! over it.
//!
//! # Example
//!
//! ```
//! use docsym::{parse_search_data, SymbolIndex};
//!
//! let data = "var searchData=\n[\n  ['clear',['Clear',\
//!     ['../classxms_1_1_gm_extents2d.html#a6078',1,'xms::GmExtents2d::Clear()'],\
//!     ['../classxms_1_1_gm_extents3d.html#af7b8',1,'xms::GmExtents3d::Clear()']]]\n];";
//!
//! let index = SymbolIndex::build(parse_search_data(data)?)?;
//! let names: Vec<_> = index.lookup("clear").map(|e| e.display_name()).collect();
//! assert_eq!(names, ["xms::GmExtents2d::Clear", "xms::GmExtents3d::Clear"]);
//! # Ok::<(), docsym::DocsymError>(())
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod entry;
pub mod error;
pub mod index;
pub mod loader;
pub mod searchdata;

// Re-export commonly used types
pub use cli::{Cli, OutputFormat};
pub use config::DocsymConfig;
pub use entry::{normalize_query, Entry, LinkTarget, Occurrence, SourceRecord};
pub use error::{DocsymError, Result};
pub use index::{BuildOptions, Lookup, MatchMode, SymbolIndex};
pub use loader::{load_dir, load_file, load_index, LoadOptions};
pub use searchdata::{parse_search_data, render_search_data};
