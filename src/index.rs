//! Symbol index
//!
//! [`SymbolIndex`] holds key -> [`Entry`] groups in input order and answers
//! lookups with a lazy [`Lookup`] iterator. The index is built once from
//! [`SourceRecord`]s and never mutated afterwards, so a shared reference can be
//! queried from any number of threads.
//!
//! # Example
//!
//! ```
//! use docsym::{SourceRecord, SymbolIndex};
//!
//! let records = vec![
//!     SourceRecord::new("clear", "Clear")
//!         .with_occurrence("a.html#x", 1, "xms::GmExtents2d::Clear()")
//!         .with_occurrence("b.html#y", 1, "xms::GmExtents3d::Clear()"),
//!     SourceRecord::new("cleardefault", "ClearDefault")
//!         .with_occurrence("c.html#z", 1, "xms::ETestMessagingState"),
//! ];
//!
//! let index = SymbolIndex::build(records)?;
//! let scopes: Vec<_> = index
//!     .lookup("Clear")
//!     .filter_map(|e| e.scope.as_deref())
//!     .collect();
//! assert_eq!(scopes, ["xms::GmExtents2d", "xms::GmExtents3d"]);
//! assert_eq!(index.lookup("clea").count(), 3);
//! # Ok::<(), docsym::DocsymError>(())
//! ```

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entry::{normalize_query, Entry, SourceRecord};
use crate::error::{DocsymError, Result};
use crate::searchdata::render_search_data;

/// How a query is matched against index keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Exact key when present, otherwise every key with the query as prefix
    #[default]
    Auto,
    /// Exact key only
    Exact,
    /// Every key starting with the query
    Prefix,
    /// Every key containing the query
    Substring,
}

impl MatchMode {
    pub fn name(self) -> &'static str {
        match self {
            MatchMode::Auto => "auto",
            MatchMode::Exact => "exact",
            MatchMode::Prefix => "prefix",
            MatchMode::Substring => "substring",
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MatchMode {
    type Err = DocsymError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(MatchMode::Auto),
            "exact" => Ok(MatchMode::Exact),
            "prefix" => Ok(MatchMode::Prefix),
            "substring" | "contains" => Ok(MatchMode::Substring),
            other => Err(DocsymError::Config {
                message: format!("unknown match mode '{}'", other),
            }),
        }
    }
}

/// Options controlling index construction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Append occurrences of repeated keys to the first record instead of failing
    pub merge_duplicates: bool,
}

impl BuildOptions {
    pub fn merging() -> Self {
        Self {
            merge_duplicates: true,
        }
    }
}

/// All entries listed under one key
#[derive(Debug, Clone, PartialEq, Eq)]
struct KeyGroup {
    key: String,
    /// Lowercased key used for case-insensitive matching
    folded: String,
    label: String,
    entries: Vec<Entry>,
}

/// Immutable key -> entries index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolIndex {
    groups: Vec<KeyGroup>,
    by_key: HashMap<String, usize>,
    entry_count: usize,
}

impl SymbolIndex {
    /// Build an index, failing on a key repeated across records
    pub fn build<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = SourceRecord>,
    {
        Self::build_with(records, BuildOptions::default())
    }

    /// Build an index with explicit options
    ///
    /// Keys must be non-empty and every record needs at least one occurrence.
    /// On error nothing is retained.
    pub fn build_with<I>(records: I, options: BuildOptions) -> Result<Self>
    where
        I: IntoIterator<Item = SourceRecord>,
    {
        let mut index = SymbolIndex::default();
        let mut merged = 0usize;

        for (position, record) in records.into_iter().enumerate() {
            if record.key.is_empty() {
                return Err(DocsymError::malformed(position, "key is empty"));
            }
            if record.occurrences.is_empty() {
                return Err(DocsymError::malformed(
                    position,
                    format!("'{}': record has no occurrences", record.key),
                ));
            }

            let existing = index.by_key.get(&record.key).copied();
            if let Some(slot) = existing {
                if !options.merge_duplicates {
                    return Err(DocsymError::DuplicateKey { key: record.key });
                }
                debug!("Merging repeated key '{}' (record #{})", record.key, position);
                let group = &mut index.groups[slot];
                // Merged entries keep the first record's label
                let label = group.label.clone();
                group.entries.extend(
                    record
                        .occurrences
                        .iter()
                        .map(|occ| Entry::from_occurrence(&record.key, &label, occ)),
                );
                index.entry_count += record.occurrences.len();
                merged += 1;
                continue;
            }

            let entries: Vec<Entry> = record
                .occurrences
                .iter()
                .map(|occ| Entry::from_occurrence(&record.key, &record.label, occ))
                .collect();
            index.entry_count += entries.len();
            index.by_key.insert(record.key.clone(), index.groups.len());
            index.groups.push(KeyGroup {
                folded: record.key.to_lowercase(),
                key: record.key,
                label: record.label,
                entries,
            });
        }

        debug!(
            "Built symbol index: {} keys, {} entries, {} merged records",
            index.groups.len(),
            index.entry_count,
            merged
        );

        Ok(index)
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of entries across all keys
    pub fn entry_count(&self) -> usize {
        self.entry_count
    }

    /// All keys in insertion order
    pub fn all_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.groups.iter().map(|g| g.key.as_str())
    }

    /// Entries of exactly `key`
    pub fn get(&self, key: &str) -> Option<&[Entry]> {
        self.by_key
            .get(key)
            .map(|&slot| self.groups[slot].entries.as_slice())
    }

    /// Display label recorded for `key`
    pub fn label(&self, key: &str) -> Option<&str> {
        self.by_key
            .get(key)
            .map(|&slot| self.groups[slot].label.as_str())
    }

    /// Entries matching `query` by exact key, or by case-insensitive prefix
    /// when no key matches exactly
    ///
    /// The empty query yields every entry.
    pub fn lookup(&self, query: &str) -> Lookup<'_> {
        self.lookup_with(query, MatchMode::Auto)
    }

    /// Entries matching `query` under an explicit [`MatchMode`]
    pub fn lookup_with(&self, query: &str, mode: MatchMode) -> Lookup<'_> {
        let needle = normalize_query(query);
        // Queries already in key form (`m_5fvalue`) are matched verbatim too
        let literal = query.trim_start_matches(' ').to_lowercase();
        let alternate = (literal != needle).then_some(literal);

        let exact = self.exact_slot(&needle).or_else(|| {
            alternate
                .as_deref()
                .and_then(|literal| self.exact_slot(literal))
        });

        let scan = |substring| GroupSource::Scan { next: 0, substring };
        let source = match (mode, exact) {
            (MatchMode::Exact, slot) => GroupSource::Single(slot),
            (MatchMode::Auto, Some(slot)) => GroupSource::Single(Some(slot)),
            (MatchMode::Auto, None) | (MatchMode::Prefix, _) => scan(false),
            (MatchMode::Substring, _) => scan(true),
        };

        Lookup {
            index: self,
            needle,
            alternate,
            source,
            current: None,
        }
    }

    fn exact_slot(&self, needle: &str) -> Option<usize> {
        self.by_key
            .get(needle)
            .copied()
            // Keys are normally lowercase already; fall back to a folded scan
            .or_else(|| self.groups.iter().position(|g| g.folded == needle))
    }

    /// Matching keys only, in index order
    pub fn matching_keys(&self, query: &str, mode: MatchMode) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for entry in self.lookup_with(query, mode) {
            if keys.last() != Some(&entry.key.as_str()) {
                keys.push(entry.key.as_str());
            }
        }
        keys
    }

    /// Write the index back out as source records
    ///
    /// Building an index from the result reproduces this index.
    pub fn records(&self) -> Vec<SourceRecord> {
        self.groups
            .iter()
            .map(|g| SourceRecord {
                key: g.key.clone(),
                label: g.label.clone(),
                occurrences: g.entries.iter().map(Entry::to_occurrence).collect(),
            })
            .collect()
    }

    /// Render the index in the generator's JavaScript search-data form
    pub fn to_search_data(&self) -> String {
        render_search_data(&self.records())
    }
}

#[derive(Debug, Clone)]
enum GroupSource {
    /// One known group (or none)
    Single(Option<usize>),
    /// Walk all groups from `next`, testing each key
    Scan { next: usize, substring: bool },
}

/// Lazy iterator over matching entries
///
/// Produced by [`SymbolIndex::lookup`]; holds no state in the index itself, so
/// calling `lookup` again restarts from the beginning.
#[derive(Debug, Clone)]
pub struct Lookup<'a> {
    index: &'a SymbolIndex,
    needle: String,
    alternate: Option<String>,
    source: GroupSource,
    /// Group being drained and the next entry position in it
    current: Option<(usize, usize)>,
}

impl<'a> Lookup<'a> {
    /// Normalized form of the query being matched
    pub fn needle(&self) -> &str {
        &self.needle
    }

    fn matches(&self, folded: &str, substring: bool) -> bool {
        let hit = |needle: &str| {
            if substring {
                folded.contains(needle)
            } else {
                folded.starts_with(needle)
            }
        };
        hit(&self.needle) || self.alternate.as_deref().map_or(false, hit)
    }

    fn next_group(&mut self) -> Option<usize> {
        let (mut next, substring) = match &mut self.source {
            GroupSource::Single(slot) => return slot.take(),
            GroupSource::Scan { next, substring } => (*next, *substring),
        };

        let groups = &self.index.groups;
        let mut found = None;
        while next < groups.len() {
            let slot = next;
            next += 1;
            if self.matches(&groups[slot].folded, substring) {
                found = Some(slot);
                break;
            }
        }

        self.source = GroupSource::Scan { next, substring };
        found
    }
}

impl<'a> Iterator for Lookup<'a> {
    type Item = &'a Entry;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((slot, pos)) = self.current {
                let index = self.index;
                let entries = &index.groups[slot].entries;
                if pos < entries.len() {
                    self.current = Some((slot, pos + 1));
                    return Some(&entries[pos]);
                }
                self.current = None;
            }

            let slot = self.next_group()?;
            self.current = Some((slot, 0));
        }
    }
}
