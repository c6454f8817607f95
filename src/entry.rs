//! Index data model
//!
//! A search-data file is a list of [`SourceRecord`]s, each holding one key,
//! the key's display label and one [`Occurrence`] per documented symbol that
//! shares the key. Building an index turns every occurrence into an [`Entry`],
//! splitting the link into URL and anchor and deriving the enclosing scope from
//! the generator's qualified name.

use serde::{Deserialize, Serialize};

/// How the documentation page behind an entry should be opened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkTarget {
    /// Same documentation site (generator flag `1`)
    Parent,
    /// Separate window (generator flag `0`)
    Blank,
}

impl LinkTarget {
    /// Map the generator's integer flag to a target
    pub fn from_tag(tag: i64) -> Self {
        if tag != 0 {
            LinkTarget::Parent
        } else {
            LinkTarget::Blank
        }
    }

}

/// One `[url, tag, qualified]` triple of a source record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    /// Link including the `#anchor` fragment, if any
    pub url: String,
    /// Generator link flag
    pub tag: i64,
    /// Qualified name or enclosing scope as written by the generator
    pub qualified: String,
}

impl Occurrence {
    pub fn new(url: impl Into<String>, tag: i64, qualified: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            tag,
            qualified: qualified.into(),
        }
    }
}

/// One top-level record of the input: `[key, [label, occurrences...]]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRecord {
    pub key: String,
    pub label: String,
    pub occurrences: Vec<Occurrence>,
}

impl SourceRecord {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            occurrences: Vec::new(),
        }
    }

    /// Append an occurrence (builder style)
    pub fn with_occurrence(mut self, url: &str, tag: i64, qualified: &str) -> Self {
        self.occurrences.push(Occurrence::new(url, tag, qualified));
        self
    }
}

/// One (symbol, location) record in the index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Normalized searchable token
    pub key: String,
    /// Human-readable symbol name
    pub label: String,
    /// Enclosing namespace or class
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Document part of the link
    pub url: String,
    /// Fragment after `#`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
    /// Link ended in a bare `#`
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub empty_fragment: bool,
    /// Generator link flag, kept verbatim
    pub tag: i64,
    pub target: LinkTarget,
    /// Raw qualified text from the generator
    pub qualified: String,
}

impl Entry {
    /// Build an entry for `occurrence`, listed under `key` with record label `label`
    pub fn from_occurrence(key: &str, label: &str, occurrence: &Occurrence) -> Self {
        let (url, anchor) = split_anchor(&occurrence.url);
        let (label, scope) = derive_scope(label, &occurrence.qualified);

        Self {
            key: key.to_string(),
            label,
            scope,
            url: url.to_string(),
            anchor: anchor.map(str::to_string),
            empty_fragment: anchor.is_none() && occurrence.url.contains('#'),
            tag: occurrence.tag,
            target: LinkTarget::from_tag(occurrence.tag),
            qualified: occurrence.qualified.clone(),
        }
    }

    /// Turn the entry back into the occurrence it was built from
    pub fn to_occurrence(&self) -> Occurrence {
        Occurrence::new(self.href(), self.tag, self.qualified.clone())
    }

    /// Link with the anchor re-attached, exactly as written in the input
    pub fn href(&self) -> String {
        match &self.anchor {
            Some(anchor) => format!("{}#{}", self.url, anchor),
            None if self.empty_fragment => format!("{}#", self.url),
            None => self.url.clone(),
        }
    }

    /// `scope::label`, or just the label for free symbols
    pub fn display_name(&self) -> String {
        match &self.scope {
            Some(scope) => format!("{}::{}", scope, self.label),
            None => self.label.clone(),
        }
    }

    /// Resolve a relative link against `base_url`
    ///
    /// Absolute links (`scheme://...`) and links without a base are returned
    /// unchanged. Leading `./` and `../` segments are dropped since the
    /// generator writes links relative to its `search/` subdirectory.
    pub fn resolve_href(&self, base_url: Option<&str>) -> String {
        let href = self.href();
        let base = match base_url {
            Some(base) if !base.is_empty() => base,
            _ => return href,
        };
        if href.contains("://") {
            return href;
        }

        let mut rest = href.as_str();
        loop {
            if let Some(stripped) = rest.strip_prefix("../") {
                rest = stripped;
            } else if let Some(stripped) = rest.strip_prefix("./") {
                rest = stripped;
            } else {
                break;
            }
        }

        format!("{}/{}", base.trim_end_matches('/'), rest)
    }
}

/// Split `url#anchor` into its parts; an empty fragment counts as absent
pub fn split_anchor(url: &str) -> (&str, Option<&str>) {
    match url.split_once('#') {
        Some((base, anchor)) if !anchor.is_empty() => (base, Some(anchor)),
        Some((base, _)) => (base, None),
        None => (url, None),
    }
}

/// Derive `(label, scope)` for one occurrence of a record labelled `record_label`
///
/// The generator writes the enclosing scope for keys with a single symbol
/// (`xms::TrTinImpl`) and the fully qualified member for shared keys
/// (`xms::GmExtents2d::Clear()`). Both shapes are handled here.
pub fn derive_scope(record_label: &str, qualified: &str) -> (String, Option<String>) {
    let trimmed = qualified.trim();
    let name = strip_params(trimmed);

    // Labels such as `operator()` end in parentheses themselves
    for candidate in [trimmed, name] {
        if candidate.eq_ignore_ascii_case(record_label) {
            return (candidate.to_string(), None);
        }
        if let Some((scope, segment)) = split_last_segment(candidate) {
            if segment.eq_ignore_ascii_case(record_label) && !scope.is_empty() {
                return (segment.to_string(), Some(scope.to_string()));
            }
        }
    }

    let scope = (!trimmed.is_empty()).then(|| trimmed.to_string());
    (record_label.to_string(), scope)
}

/// Split `a::b::c` at the last `::` outside any parameter list
fn split_last_segment(name: &str) -> Option<(&str, &str)> {
    let mut depth = 0usize;
    let bytes = name.as_bytes();
    for i in (0..bytes.len()).rev() {
        match bytes[i] {
            b')' => depth += 1,
            b'(' => depth = depth.saturating_sub(1),
            b':' if depth == 0 && i > 0 && bytes[i - 1] == b':' => {
                return Some((&name[..i - 1], &name[i + 1..]));
            }
            _ => {}
        }
    }
    None
}

/// Drop the trailing parameter list: `Clear()` -> `Clear`,
/// `Apply(void(*)(int))` -> `Apply`
fn strip_params(name: &str) -> &str {
    if !name.ends_with(')') {
        return name;
    }

    let mut depth = 0usize;
    for (i, b) in name.bytes().enumerate().rev() {
        match b {
            b')' => depth += 1,
            b'(' => {
                depth -= 1;
                if depth == 0 {
                    return name[..i].trim_end();
                }
            }
            _ => {}
        }
    }
    name
}

/// Convert free text into the generator's search id form
///
/// Lowercases the text, keeps ASCII letters and digits plus any non-ASCII
/// character, and encodes everything else as `_` followed by the lowercase hex
/// character code (at least two digits). Leading spaces are ignored.
///
/// # Example
///
/// ```
/// use docsym::entry::normalize_query;
///
/// assert_eq!(normalize_query("Clear"), "clear");
/// assert_eq!(normalize_query("operator=="), "operator_3d_3d");
/// assert_eq!(normalize_query("m_value"), "m_5fvalue");
/// ```
pub fn normalize_query(query: &str) -> String {
    let lowered = query.trim_start_matches(' ').to_lowercase();
    let mut id = String::with_capacity(lowered.len());

    for c in lowered.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() || !c.is_ascii() {
            id.push(c);
        } else {
            id.push_str(&format!("_{:02x}", c as u32));
        }
    }

    id
}
