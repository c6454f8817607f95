//! Keys command handler - list index keys in order

use serde::Serialize;

use crate::cli::KeysArgs;
use crate::commands::{render_structured, CommandContext};
use crate::error::Result;
use crate::index::{MatchMode, SymbolIndex};

#[derive(Debug, Clone, Serialize)]
pub struct KeySummary {
    pub key: String,
    pub label: String,
    pub entries: usize,
}

/// Summaries of the keys matching `prefix` (all keys when `None`)
pub fn list_keys(index: &SymbolIndex, prefix: Option<&str>, limit: usize) -> Vec<KeySummary> {
    let keys: Vec<&str> = match prefix {
        Some(prefix) => index.matching_keys(prefix, MatchMode::Prefix),
        None => index.all_keys().collect(),
    };
    let take = if limit == 0 { usize::MAX } else { limit };

    keys.into_iter()
        .take(take)
        .map(|key| KeySummary {
            key: key.to_string(),
            label: index.label(key).unwrap_or(key).to_string(),
            entries: index.get(key).map_or(0, <[_]>::len),
        })
        .collect()
}

/// Run the keys command
pub fn run_keys(args: &KeysArgs, ctx: &CommandContext) -> Result<String> {
    let index = ctx.open_index(&args.source)?;
    let keys = list_keys(&index, args.prefix.as_deref(), args.limit);

    let json_value = serde_json::json!({
        "_type": "keys",
        "count": keys.len(),
        "total_keys": index.len(),
        "keys": keys,
    });

    if let Some(output) = render_structured(ctx.format, &json_value) {
        return Ok(output);
    }

    let mut output = String::new();
    for summary in &keys {
        if summary.entries > 1 {
            output.push_str(&format!("{} ({}) [{}]\n", summary.key, summary.label, summary.entries));
        } else {
            output.push_str(&format!("{} ({})\n", summary.key, summary.label));
        }
    }
    if ctx.verbose {
        output.push_str(&format!("\n{} of {} keys\n", keys.len(), index.len()));
    }

    Ok(output)
}
