//! Search-data file parsing
//!
//! The documentation generator writes its search index as a JavaScript
//! assignment:
//!
//! ```text
//! var searchData=
//! [
//!   ['clear',['Clear',['../a.html#x',1,'xms::GmExtents2d::Clear()'],['../b.html#y',1,'xms::GmExtents3d::Clear()']]],
//!   ['cleardefault',['ClearDefault',['../c.html#z',1,'xms::ETestMessagingState']]]
//! ];
//! ```
//!
//! Parsing happens in two steps: the array literal is read into a
//! `serde_json::Value` with json5 (single-quoted strings, comments and
//! trailing commas accepted), then every element is decoded into a
//! [`SourceRecord`]. Plain JSON input goes through the same path.

use serde_json::Value;

use crate::entry::{Occurrence, SourceRecord};
use crate::error::{DocsymError, Result};

/// Deepest bracket nesting accepted in a search-data file
///
/// Generator records nest at most five levels (`[[key, [label, [[occ]]]]]`).
const MAX_DEPTH: usize = 16;

/// Parse a complete search-data file into records
pub fn parse_search_data(content: &str) -> Result<Vec<SourceRecord>> {
    let value = parse_literal(content)?;
    decode_records(&value)
}

/// Parse the array literal of a search-data file
///
/// Accepts either `var <name> = <literal>;` or a bare literal. The literal is
/// read as JSON, falling back to json5 for single quotes, comments and
/// trailing commas.
pub fn parse_literal(content: &str) -> Result<Value> {
    let start = literal_start(content)?;
    let end = literal_end(content, start)?;
    expect_terminator(content, end)?;
    let literal = &content[start..end];

    // Try standard JSON first
    if let Ok(value) = serde_json::from_str(literal) {
        return Ok(value);
    }

    json5::from_str(literal).map_err(|e| match e {
        json5::Error::Message { msg, location } => {
            let (line, column) = match location {
                Some(loc) => shift_position(content, start, loc.line, loc.column),
                None => position(content, end),
            };
            DocsymError::Parse {
                line,
                column,
                message: json5_reason(&msg).to_string(),
            }
        }
    })
}

/// Decode a parsed literal into records
///
/// Each element must be `[key, [label, occurrence, ...]]` or
/// `[key, [label, [occurrence, ...]]]` where an occurrence is
/// `[url, tag, qualified]`.
pub fn decode_records(value: &Value) -> Result<Vec<SourceRecord>> {
    let items = value.as_array().ok_or(DocsymError::MalformedRecord {
        index: 0,
        message: "search data must be an array of records".to_string(),
    })?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| decode_record(index, item))
        .collect()
}

fn decode_record(index: usize, item: &Value) -> Result<SourceRecord> {
    let parts = match item.as_array() {
        Some(parts) if parts.len() == 2 => parts,
        Some(parts) => {
            return Err(DocsymError::malformed(
                index,
                format!("expected [key, [label, ...]], found {} elements", parts.len()),
            ))
        }
        None => return Err(DocsymError::malformed(index, "record is not an array")),
    };

    let key = parts[0]
        .as_str()
        .ok_or_else(|| DocsymError::malformed(index, "key is not a string"))?;
    if key.is_empty() {
        return Err(DocsymError::malformed(index, "key is empty"));
    }

    let body = parts[1]
        .as_array()
        .ok_or_else(|| DocsymError::malformed(index, format!("'{}': body is not an array", key)))?;
    let label = body
        .first()
        .and_then(Value::as_str)
        .ok_or_else(|| DocsymError::malformed(index, format!("'{}': missing label", key)))?;

    let rest = &body[1..];
    let raw_occurrences: &[Value] = match rest {
        [Value::Array(inner)] if inner.first().map_or(false, Value::is_array) => inner.as_slice(),
        _ => rest,
    };
    if raw_occurrences.is_empty() {
        return Err(DocsymError::malformed(
            index,
            format!("'{}': record has no occurrences", key),
        ));
    }

    let occurrences = raw_occurrences
        .iter()
        .enumerate()
        .map(|(n, raw)| decode_occurrence(index, key, n, raw))
        .collect::<Result<Vec<_>>>()?;

    Ok(SourceRecord {
        key: key.to_string(),
        label: label.to_string(),
        occurrences,
    })
}

fn decode_occurrence(index: usize, key: &str, n: usize, raw: &Value) -> Result<Occurrence> {
    let fail = |what: &str| DocsymError::malformed(index, format!("'{}': occurrence {} {}", key, n, what));

    let fields = match raw.as_array() {
        Some(fields) if fields.len() == 3 => fields,
        Some(_) => return Err(fail("must have exactly [url, tag, name]")),
        None => return Err(fail("is not an array")),
    };

    let url = fields[0].as_str().ok_or_else(|| fail("has a non-string url"))?;
    if url.is_empty() {
        return Err(fail("has an empty url"));
    }
    let tag = match &fields[1] {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .ok_or_else(|| fail("has a non-integer tag"))?,
        Value::Bool(b) => i64::from(*b),
        _ => return Err(fail("has a non-integer tag")),
    };
    let qualified = fields[2].as_str().ok_or_else(|| fail("has a non-string name"))?;

    Ok(Occurrence::new(url, tag, qualified))
}

/// Render records in the generator's JavaScript form
pub fn render_search_data(records: &[SourceRecord]) -> String {
    let mut out = String::from("var searchData=\n[\n");

    for (i, record) in records.iter().enumerate() {
        out.push_str("  [");
        out.push_str(&quote(&record.key));
        out.push_str(",[");
        out.push_str(&quote(&record.label));
        for occ in &record.occurrences {
            out.push_str(&format!(
                ",[{},{},{}]",
                quote(&occ.url),
                occ.tag,
                quote(&occ.qualified)
            ));
        }
        out.push_str("]]");
        if i + 1 < records.len() {
            out.push(',');
        }
        out.push('\n');
    }

    out.push_str("];\n");
    out
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

// ============================================================================
// Literal boundaries
// ============================================================================

fn parse_error(content: &str, pos: usize, message: impl Into<String>) -> DocsymError {
    let (line, column) = position(content, pos);
    DocsymError::Parse {
        line,
        column,
        message: message.into(),
    }
}

/// 1-based line and column of byte offset `pos`
fn position(content: &str, pos: usize) -> (usize, usize) {
    let consumed = &content[..pos.min(content.len())];
    let line = consumed.matches('\n').count() + 1;
    let column = consumed
        .rsplit('\n')
        .next()
        .map_or(1, |l| l.chars().count() + 1);
    (line, column)
}

/// Map a json5 location inside the literal back onto the whole file
fn shift_position(content: &str, start: usize, line: usize, column: usize) -> (usize, usize) {
    let (start_line, start_column) = position(content, start);
    if line <= 1 {
        (start_line, start_column + column.saturating_sub(1))
    } else {
        (start_line + line - 1, column)
    }
}

/// The `= expected ...` line of a json5 error, without the source excerpt
fn json5_reason(msg: &str) -> &str {
    msg.lines()
        .find_map(|l| l.trim_start().strip_prefix("= "))
        .unwrap_or_else(|| msg.trim())
}

/// Skip whitespace, comments and a byte order mark
fn skip_trivia(content: &str, mut pos: usize) -> Result<usize> {
    let bytes = content.as_bytes();
    loop {
        match bytes.get(pos).copied() {
            Some(b) if b.is_ascii_whitespace() => pos += 1,
            Some(b'/') if bytes.get(pos + 1) == Some(&b'/') => {
                pos = content[pos..].find('\n').map_or(content.len(), |n| pos + n);
            }
            Some(b'/') if bytes.get(pos + 1) == Some(&b'*') => match content[pos + 2..].find("*/") {
                Some(n) => pos += n + 4,
                None => return Err(parse_error(content, pos, "unterminated comment")),
            },
            Some(0xEF) if content[pos..].starts_with('\u{feff}') => pos += 3,
            _ => return Ok(pos),
        }
    }
}

/// Offset of the literal, past an optional `var name =` (or `let`/`const`)
fn literal_start(content: &str) -> Result<usize> {
    let bytes = content.as_bytes();
    let pos = skip_trivia(content, 0)?;

    let keyword = ["var", "let", "const"].iter().copied().find(|kw| {
        content[pos..].starts_with(kw)
            && matches!(bytes.get(pos + kw.len()), Some(b) if b.is_ascii_whitespace() || *b == b'/')
    });
    let Some(keyword) = keyword else {
        return Ok(pos);
    };

    let name_start = skip_trivia(content, pos + keyword.len())?;
    let name_len = content[name_start..]
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_' || *b == b'$')
        .count();
    if name_len == 0 {
        return Err(parse_error(content, name_start, "expected variable name"));
    }

    let eq = skip_trivia(content, name_start + name_len)?;
    if bytes.get(eq) != Some(&b'=') {
        return Err(parse_error(content, eq, "expected '='"));
    }
    skip_trivia(content, eq + 1)
}

/// Offset just past the literal starting at `start`
///
/// Strings and comments are skipped; brackets are only counted, so the
/// nesting limit is enforced before any recursive parser sees the text.
fn literal_end(content: &str, start: usize) -> Result<usize> {
    let bytes = content.as_bytes();
    let mut depth = 0usize;
    let mut pos = start;

    while let Some(&b) = bytes.get(pos) {
        match b {
            b'\'' | b'"' => {
                pos += 1;
                while let Some(&c) = bytes.get(pos) {
                    pos += if c == b'\\' { 2 } else { 1 };
                    if c == b || c == b'\n' {
                        break;
                    }
                }
                continue;
            }
            b'/' if matches!(bytes.get(pos + 1).copied(), Some(b'/') | Some(b'*')) => {
                pos = skip_trivia(content, pos)?;
                continue;
            }
            b'[' | b'{' => {
                depth += 1;
                if depth > MAX_DEPTH {
                    return Err(parse_error(content, pos, "nesting too deep"));
                }
            }
            b']' | b'}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Ok(pos + 1);
                }
            }
            b';' if depth == 0 => return Ok(pos),
            _ => {}
        }
        pos += 1;
    }

    Ok(content.len())
}

/// Only trivia and one optional `;` may follow the literal
fn expect_terminator(content: &str, end: usize) -> Result<()> {
    let mut pos = skip_trivia(content, end)?;
    if content.as_bytes().get(pos) == Some(&b';') {
        pos = skip_trivia(content, pos + 1)?;
    }
    if pos < content.len() {
        return Err(parse_error(content, pos, "unexpected trailing content"));
    }
    Ok(())
}
