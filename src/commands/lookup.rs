//! Lookup command handler - find entries for a symbol name or key prefix

use serde::Serialize;

use crate::cli::LookupArgs;
use crate::commands::{render_structured, CommandContext};
use crate::entry::{Entry, LinkTarget};
use crate::error::Result;
use crate::index::{MatchMode, SymbolIndex};

/// One matched entry as shown to the user
#[derive(Debug, Clone, Serialize)]
pub struct LookupEntry {
    pub key: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    pub href: String,
    pub target: LinkTarget,
}

impl LookupEntry {
    fn from_entry(entry: &Entry, base_url: Option<&str>) -> Self {
        Self {
            key: entry.key.clone(),
            label: entry.label.clone(),
            scope: entry.scope.clone(),
            href: entry.resolve_href(base_url),
            target: entry.target,
        }
    }

    fn display_name(&self) -> String {
        match &self.scope {
            Some(scope) => format!("{}::{}", scope, self.label),
            None => self.label.clone(),
        }
    }
}

/// Result of one query, limited for display
#[derive(Debug, Clone, Serialize)]
pub struct LookupResult {
    pub query: String,
    pub mode: MatchMode,
    pub entries: Vec<LookupEntry>,
    /// Matches before the limit was applied
    pub total: usize,
}

impl LookupResult {
    pub fn truncated(&self) -> bool {
        self.total > self.entries.len()
    }
}

/// Run a query against an index, keeping at most `limit` entries (0 = all)
pub fn query_index(
    index: &SymbolIndex,
    query: &str,
    mode: MatchMode,
    limit: usize,
    base_url: Option<&str>,
) -> LookupResult {
    let mut matches = index.lookup_with(query, mode);
    let take = if limit == 0 { usize::MAX } else { limit };

    let entries: Vec<LookupEntry> = matches
        .by_ref()
        .take(take)
        .map(|e| LookupEntry::from_entry(e, base_url))
        .collect();
    let total = entries.len() + matches.count();

    LookupResult {
        query: query.to_string(),
        mode,
        entries,
        total,
    }
}

/// Run the lookup command
pub fn run_lookup(args: &LookupArgs, ctx: &CommandContext) -> Result<String> {
    let index = ctx.open_index(&args.source)?;
    let result = query_index(
        &index,
        &args.query,
        args.match_mode(&ctx.config),
        args.effective_limit(&ctx.config),
        args.effective_base_url(&ctx.config),
    );

    let json_value = serde_json::json!({
        "_type": "lookup",
        "query": result.query,
        "mode": result.mode,
        "count": result.entries.len(),
        "total": result.total,
        "truncated": result.truncated(),
        "entries": result.entries,
    });

    if let Some(output) = render_structured(ctx.format, &json_value) {
        return Ok(output);
    }

    let mut output = String::new();
    output.push_str(&format!("query: \"{}\" ({})\n", result.query, result.mode));

    if result.entries.is_empty() {
        output.push_str("(no matching symbols)\n");
        return Ok(output);
    }

    output.push_str(&format!("{} entries\n\n", result.total));
    for entry in &result.entries {
        output.push_str(&format!("• {}      {}\n", entry.display_name(), entry.href));
        if ctx.verbose {
            output.push_str(&format!("  key: {} | target: {:?}\n", entry.key, entry.target));
        }
    }
    if result.truncated() {
        output.push_str(&format!(
            "\n... {} more (use --limit 0 to show all)\n",
            result.total - result.entries.len()
        ));
    }

    Ok(output)
}
